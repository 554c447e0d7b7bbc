//! Colors and sizes for the timeline viewer.

use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use scenario_timeline::ItemKind;

// Canvas
pub const CANVAS_BG: Color32 = Color32::from_rgb(24, 24, 32);
pub const ROW_STRIPE: Color32 = Color32::from_rgb(30, 30, 40);
pub const HEADER_BG: Color32 = Color32::from_rgb(34, 37, 48);
pub const ROW_RULE: Color32 = Color32::from_rgb(50, 52, 64);
pub const TICK_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);

// Text
pub const TEXT: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_WARNING: Color32 = Color32::from_rgb(240, 180, 80);

// Focus and dependency links
pub const FOCUS_RING: Color32 = Color32::from_rgb(90, 140, 220);
pub const LINK: Color32 = Color32::from_rgb(170, 175, 195);
pub const LINK_FOCUSED: Color32 = Color32::from_rgb(80, 140, 220);

pub const HEADER_HEIGHT: f32 = 44.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const BAR_ROUNDING: f32 = 5.0;
/// Bars narrower than this are drawn as a diamond.
pub const MIN_BAR_WIDTH: f32 = 6.0;
pub const ARROW_SIZE: f32 = 5.0;

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_tick() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

pub fn kind_color(kind: &ItemKind) -> Color32 {
    match kind {
        ItemKind::Epic => Color32::from_rgb(171, 71, 188),
        ItemKind::Story => Color32::from_rgb(66, 133, 244),
        ItemKind::Task => Color32::from_rgb(52, 168, 83),
        ItemKind::Bug => Color32::from_rgb(229, 57, 53),
        ItemKind::Milestone => Color32::from_rgb(251, 140, 0),
        ItemKind::Other(_) => Color32::from_rgb(0, 188, 212),
    }
}

/// Dark visuals tinted to match the timeline canvas.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT);
    visuals.panel_fill = ROW_STRIPE;
    visuals.window_fill = ROW_STRIPE;
    visuals.extreme_bg_color = CANVAS_BG;
    visuals.window_stroke = Stroke::new(1.0, ROW_RULE);

    for widgets in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
    ] {
        widgets.rounding = Rounding::same(4.0);
    }
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, FOCUS_RING);
    visuals.selection.bg_fill = FOCUS_RING.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, FOCUS_RING);

    ctx.set_visuals(visuals);
}
