use egui::{RichText, Ui};

use scenario_timeline::{Diagnostic, Frame, Timeline};

use crate::ui::theme;

/// List load-time and focus-time warnings.
pub fn show_diagnostics(timeline: Option<&Timeline>, frame: Option<&Frame>, ui: &mut Ui) {
    ui.heading(RichText::new("Warnings").size(14.0));
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let load = timeline.map(Timeline::load_diagnostics);
            let focus = frame.map(|frame| &frame.diagnostics);
            let mut shown = 0;

            for (title, diagnostics) in [("Scenario", load), ("Focus", focus)] {
                let Some(diagnostics) = diagnostics.filter(|d| !d.is_empty()) else {
                    continue;
                };
                ui.label(RichText::new(title).small().weak());
                for diagnostic in diagnostics {
                    show_entry(diagnostic, ui);
                    shown += 1;
                }
                ui.add_space(6.0);
            }

            if shown == 0 {
                ui.label(RichText::new("No warnings").color(theme::TEXT_DIM));
            }
        });
}

fn show_entry(diagnostic: &Diagnostic, ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        ui.label(
            RichText::new(diagnostic.subject().as_str())
                .strong()
                .color(theme::TEXT_WARNING),
        );
        ui.label(RichText::new(diagnostic.to_string()).color(theme::TEXT_MUTED));
    });
}
