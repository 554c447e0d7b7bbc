use egui::{menu, RichText, Ui};

use scenario_timeline::{FocusRule, TickGranularity};

use crate::app::ScenarioApp;
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut ScenarioApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Open...       Ctrl+O").clicked() {
                app.open_scenario();
                ui.close_menu();
            }
            if ui.button("  Reload").clicked() {
                app.reload_scenario();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save As...").clicked() {
                app.save_scenario_as();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Timeline Scale").small().weak());
            for (granularity, label) in [
                (TickGranularity::Days, "Days"),
                (TickGranularity::Weeks, "Weeks"),
                (TickGranularity::Months, "Months"),
            ] {
                if ui
                    .radio_value(&mut app.granularity, granularity, label)
                    .clicked()
                {
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui
                .checkbox(&mut app.show_diagnostics, "Show warnings")
                .clicked()
            {
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Focus  ").font(theme::font_menu()), |ui| {
            if ui
                .add_enabled(
                    app.focus().is_focused(),
                    egui::Button::new("  Clear focus     Esc"),
                )
                .clicked()
            {
                app.clear_focus();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Show around focus").small().weak());
            let current = app.config.focus_rule;
            for (rule, label) in [
                (FocusRule::Hierarchy, "Hierarchy"),
                (FocusRule::DirectLinks, "Direct links"),
                (FocusRule::HierarchyAndLinks, "Hierarchy and links"),
            ] {
                if ui.radio(current == rule, label).clicked() {
                    app.set_focus_rule(rule);
                    ui.close_menu();
                }
            }
        });

        // Right-aligned scenario name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let name = app
                .file_path
                .as_ref()
                .and_then(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Sample scenario".to_string());
            let focus = match app.focus().focused_key() {
                Some(key) => format!("  ·  focus: {}", key),
                None => String::new(),
            };
            ui.label(RichText::new(format!("{}{}", name, focus)).size(11.0).weak());
        });
    });
}
