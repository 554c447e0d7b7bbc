use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use log::{error, info};

use scenario_timeline::{
    io, Dependency, DependencyKind, FocusRule, FocusSelection, Frame, Item, ItemKey, ItemKind,
    Scenario, TickGranularity, Timeline, TimelineConfig,
};

use crate::args::Args;
use crate::ui;

/// Main application state.
pub struct ScenarioApp {
    pub config: TimelineConfig,
    pub scenario: Scenario,
    pub timeline: Option<Timeline>,
    pub frame: Option<Frame>,
    pub file_path: Option<PathBuf>,
    pub today: NaiveDate,

    // View state
    pub granularity: TickGranularity,
    pub show_diagnostics: bool,

    // Status message
    pub status_message: String,
}

impl ScenarioApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: TimelineConfig, args: &Args) -> Self {
        ui::theme::apply_theme(&cc.egui_ctx);

        let today = args
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let mut app = Self {
            config,
            scenario: Scenario::default(),
            timeline: None,
            frame: None,
            file_path: None,
            today,
            granularity: TickGranularity::default(),
            show_diagnostics: false,
            status_message: "Ready".to_string(),
        };

        match args.scenario.as_ref() {
            Some(path) => app.open_path(path.clone()),
            None => {
                let sample = Self::sample_scenario(today);
                app.set_scenario(sample, None);
            }
        }
        app
    }

    /// A small epic/story/task tree laid out around `today`.
    fn sample_scenario(today: NaiveDate) -> Scenario {
        let day = |offset: i64| today + Duration::days(offset);

        let items = vec![
            Item::new("PLAN-1", day(-10), day(20))
                .with_kind(ItemKind::Epic)
                .with_summary("Checkout redesign"),
            Item::new("PLAN-2", day(-10), day(-2))
                .with_kind(ItemKind::Story)
                .with_parent("PLAN-1")
                .with_rank(1)
                .with_summary("Research and wireframes"),
            Item::new("PLAN-3", day(-1), day(12))
                .with_kind(ItemKind::Story)
                .with_parent("PLAN-1")
                .with_rank(2)
                .with_summary("Payment form"),
            Item::new("PLAN-4", day(0), day(6))
                .with_kind(ItemKind::Task)
                .with_parent("PLAN-3")
                .with_summary("Card validation"),
            Item::new("PLAN-5", day(5), day(12))
                .with_kind(ItemKind::Bug)
                .with_parent("PLAN-3")
                .with_summary("Rounding in totals"),
            Item::new("PLAN-6", day(14), day(20))
                .with_kind(ItemKind::Story)
                .with_parent("PLAN-1")
                .with_rank(3)
                .with_summary("Rollout"),
            Item::new("PLAN-7", day(20), day(20))
                .with_kind(ItemKind::Milestone)
                .with_summary("Launch"),
            Item::new("OPS-1", day(2), day(25))
                .with_kind(ItemKind::Epic)
                .with_summary("Observability"),
            Item::new("OPS-2", day(4), day(11))
                .with_kind(ItemKind::Story)
                .with_parent("OPS-1")
                .with_summary("Payment dashboards"),
            Item::undated("OPS-3")
                .with_kind(ItemKind::Story)
                .with_parent("OPS-1")
                .with_summary("Alert runbooks (unscheduled)"),
        ];
        let dependencies = vec![
            Dependency::new("PLAN-2", "PLAN-3"),
            Dependency::new("PLAN-4", "PLAN-5").with_kind(DependencyKind::StartToStart),
            Dependency::new("PLAN-3", "PLAN-6"),
            Dependency::new("PLAN-6", "PLAN-7").with_kind(DependencyKind::FinishToFinish),
            Dependency::new("OPS-2", "PLAN-6"),
            Dependency::new("OPS-3", "PLAN-7"),
        ];
        Scenario::new(items, dependencies)
    }

    /// Replace the loaded scenario and show its unfocused frame.
    fn set_scenario(&mut self, scenario: Scenario, path: Option<PathBuf>) {
        match Timeline::load(scenario.clone(), self.config.clone()) {
            Ok(timeline) => {
                let frame = timeline.frame(&FocusSelection::None);
                let warnings = timeline.load_diagnostics().len();
                self.status_message = if warnings == 0 {
                    format!("Loaded {} items", timeline.items().len())
                } else {
                    format!(
                        "Loaded {} items ({} warnings)",
                        timeline.items().len(),
                        warnings
                    )
                };
                self.scenario = scenario;
                self.timeline = Some(timeline);
                self.frame = Some(frame);
                self.file_path = path;
            }
            Err(e) => {
                error!("Scenario rejected: {e}");
                self.status_message = format!("Cannot show scenario: {}", e);
            }
        }
    }

    fn open_path(&mut self, path: PathBuf) {
        match io::load_scenario(&path) {
            Ok(scenario) => self.set_scenario(scenario, Some(path)),
            Err(e) => {
                error!("Failed to open {}: {e}", path.display());
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn open_scenario(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Scenario", &["json"])
            .pick_file()
        {
            self.open_path(path);
        }
    }

    pub fn reload_scenario(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.open_path(path),
            None => self.status_message = "Sample scenario has no file to reload".to_string(),
        }
    }

    pub fn save_scenario_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Scenario", &["json"])
            .set_file_name("scenario.json")
            .save_file()
        {
            match io::save_scenario(&self.scenario, &path) {
                Ok(()) => {
                    self.status_message = "Scenario saved".to_string();
                    self.file_path = Some(path);
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    /// Rebuild the timeline under a different focus rule, keeping the focus.
    pub fn set_focus_rule(&mut self, rule: FocusRule) {
        if self.config.focus_rule == rule {
            return;
        }
        let focus = self.focus();
        self.config = self.config.clone().with_focus_rule(rule);
        let path = self.file_path.clone();
        self.set_scenario(self.scenario.clone(), path);
        if focus.is_focused() {
            self.refocus(focus);
        }
        info!(rule:? = rule; "Focus rule changed");
    }

    pub fn focus(&self) -> FocusSelection {
        self.frame
            .as_ref()
            .map(|frame| frame.focus.clone())
            .unwrap_or_default()
    }

    pub fn toggle_focus(&mut self, key: &ItemKey) {
        let (Some(timeline), Some(frame)) = (self.timeline.as_ref(), self.frame.as_ref()) else {
            return;
        };
        let next = timeline.toggle_focus(frame, key);
        self.status_message = match next.focus.focused_key() {
            Some(focused) => format!("Focused {} ({} visible)", focused, next.visible.len()),
            None => "Focus cleared".to_string(),
        };
        self.frame = Some(next);
    }

    pub fn clear_focus(&mut self) {
        if self.focus().is_focused() {
            self.refocus(FocusSelection::None);
            self.status_message = "Focus cleared".to_string();
        }
    }

    fn refocus(&mut self, selection: FocusSelection) {
        if let (Some(timeline), Some(frame)) = (self.timeline.as_ref(), self.frame.as_ref()) {
            self.frame = Some(timeline.refocus(frame, selection));
        }
    }

    fn warning_count(&self) -> usize {
        let load = self
            .timeline
            .as_ref()
            .map_or(0, |timeline| timeline.load_diagnostics().len());
        let frame = self.frame.as_ref().map_or(0, |frame| frame.diagnostics.len());
        load + frame
    }
}

impl eframe::App for ScenarioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let should_open = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::O));
        let should_clear = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if should_open {
            self.open_scenario();
        }
        if should_clear {
            self.clear_focus();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::HEADER_BG)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_MUTED),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let warnings = self.warning_count();
                        let color = if warnings > 0 {
                            ui::theme::TEXT_WARNING
                        } else {
                            ui::theme::TEXT_DIM
                        };
                        if ui
                            .add(
                                egui::Label::new(
                                    egui::RichText::new(format!("Warnings: {}", warnings))
                                        .size(10.5)
                                        .color(color),
                                )
                                .sense(egui::Sense::click()),
                            )
                            .clicked()
                        {
                            self.show_diagnostics = !self.show_diagnostics;
                        }
                        if let Some(frame) = self.frame.as_ref() {
                            ui.label(
                                egui::RichText::new(" · ")
                                    .size(10.5)
                                    .color(ui::theme::TEXT_DIM),
                            );
                            ui.label(
                                egui::RichText::new(format!(
                                    "Visible: {} · Links: {}",
                                    frame.bars.len(),
                                    frame.edges.len()
                                ))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                            );
                        }
                    });
                });
            });

        // Right panel: diagnostics
        if self.show_diagnostics {
            egui::SidePanel::right("diagnostics_panel")
                .default_width(320.0)
                .resizable(true)
                .show(ctx, |ui| {
                    ui::diagnostics_panel::show_diagnostics(
                        self.timeline.as_ref(),
                        self.frame.as_ref(),
                        ui,
                    );
                });
        }

        // Central panel: timeline
        let chart_frame = egui::Frame::default().fill(ui::theme::CANVAS_BG);
        let mut interaction = ui::timeline_view::TimelineInteraction::default();
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            match (self.timeline.as_ref(), self.frame.as_ref()) {
                (Some(timeline), Some(frame)) => {
                    interaction = ui::timeline_view::show_timeline(
                        timeline,
                        frame,
                        self.today,
                        self.granularity,
                        ui,
                    );
                }
                _ => {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new("No scenario loaded. Use File → Open…")
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                }
            }
        });

        if let Some(key) = interaction.clicked {
            self.toggle_focus(&key);
        } else if interaction.background_clicked {
            self.clear_focus();
        }
    }
}
