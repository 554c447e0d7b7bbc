use chrono::NaiveDate;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use scenario_timeline::{Frame, ItemKey, ItemKind, RoutedEdge, TickGranularity, Timeline};

use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
/// Room left of the domain start and right of its end, so edge stubs and
/// detours that leave the domain stay on the canvas.
const CANVAS_PAD: f32 = 32.0;

/// What the user clicked this frame.
#[derive(Debug, Clone, Default)]
pub struct TimelineInteraction {
    pub clicked: Option<ItemKey>,
    pub background_clicked: bool,
}

/// Paint `frame` over the fixed timeline geometry and report clicks.
pub fn show_timeline(
    timeline: &Timeline,
    frame: &Frame,
    today: NaiveDate,
    granularity: TickGranularity,
    ui: &mut Ui,
) -> TimelineInteraction {
    let mut interaction = TimelineInteraction::default();
    let available = ui.available_size();
    let chart_width = (timeline.scale().width() + CANVAS_PAD * 2.0).max(available.x);
    let chart_height = HEADER_HEIGHT + timeline.content_height() + 40.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            // Layout coordinates are relative to the top-left of the first row.
            let origin = response.rect.min + Vec2::new(CANVAS_PAD, HEADER_HEIGHT);
            let to_screen = |x: f32, y: f32| Pos2::new(origin.x + x, origin.y + y);
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::CANVAS_BG);

            // Rows keep their place whether or not their bar is visible
            let pitch = timeline.config().row_pitch();
            for row in 0..timeline.bars().row_count() {
                let top = origin.y + row as f32 * pitch;
                let row_bg = if row % 2 == 0 {
                    theme::ROW_STRIPE
                } else {
                    theme::CANVAS_BG
                };
                painter.rect_filled(
                    Rect::from_min_size(
                        Pos2::new(response.rect.left(), top),
                        Vec2::new(chart_width, pitch),
                    ),
                    0.0,
                    row_bg,
                );
                painter.line_segment(
                    [
                        Pos2::new(response.rect.left(), top + pitch),
                        Pos2::new(response.rect.left() + chart_width, top + pitch),
                    ],
                    Stroke::new(0.5, theme::ROW_RULE),
                );
            }

            draw_timeline_header(
                &painter,
                response.rect,
                origin,
                timeline,
                granularity,
                chart_height,
            );

            if let Some(x) = timeline.today_x(today) {
                draw_today_line(&painter, to_screen(x, 0.0), response.rect.bottom());
            }

            let focused = frame.focus.focused_key();
            for edge in &frame.edges {
                let touches_focus =
                    focused.is_some_and(|key| *key == edge.from || *key == edge.to);
                draw_edge(&painter, edge, &to_screen, touches_focus);
            }

            for (key, bar) in &frame.bars {
                let Some(item) = timeline.item(key.as_str()) else {
                    continue;
                };
                let is_focused = focused == Some(key);
                let bar_rect = Rect::from_min_size(
                    to_screen(bar.x, bar.y),
                    Vec2::new(bar.width, bar.height),
                );
                let hit_rect = if item.kind == ItemKind::Milestone || bar.width < theme::MIN_BAR_WIDTH {
                    draw_milestone(&painter, bar_rect, theme::kind_color(&item.kind), is_focused)
                } else {
                    draw_item_bar(
                        &painter,
                        bar_rect,
                        theme::kind_color(&item.kind),
                        item.label(),
                        is_focused,
                    )
                };

                let bar_response = ui.interact(
                    hit_rect,
                    ui.make_persistent_id(("bar", key.as_str())),
                    Sense::click(),
                );
                if bar_response.clicked() {
                    interaction.clicked = Some(key.clone());
                    consumed_click = true;
                }
                if bar_response.hovered() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("bar-tip", key.as_str())),
                        |ui| {
                            ui.strong(item.label());
                            ui.label(format!("{} · {}", key, item.kind.name()));
                            if let Some((start, end)) = item.date_range() {
                                ui.label(format!(
                                    "{} → {}",
                                    start.format("%d/%m/%Y"),
                                    end.format("%d/%m/%Y")
                                ));
                            }
                            ui.label(
                                egui::RichText::new("Click to toggle focus")
                                    .small()
                                    .color(theme::TEXT_DIM),
                            );
                        },
                    );
                }
            }

            draw_row_hint(&painter, timeline, frame, origin, pitch);

            if response.clicked() && !consumed_click {
                interaction.background_clicked = true;
            }
        });

    interaction
}

fn draw_timeline_header(
    painter: &egui::Painter,
    canvas: Rect,
    origin: Pos2,
    timeline: &Timeline,
    granularity: TickGranularity,
    height: f32,
) {
    let header = Rect::from_min_size(canvas.min, Vec2::new(canvas.width(), HEADER_HEIGHT));
    painter.rect_filled(header, 0.0, theme::HEADER_BG);
    painter.line_segment(
        [
            Pos2::new(header.left(), header.bottom()),
            Pos2::new(header.right(), header.bottom()),
        ],
        Stroke::new(1.0, theme::ROW_RULE),
    );

    let (start, end) = timeline.scale().domain();
    painter.text(
        Pos2::new(origin.x, canvas.top() + 12.0),
        egui::Align2::LEFT_CENTER,
        format!("{} – {}", start.format("%d %b %Y"), end.format("%d %b %Y")),
        theme::font_header(),
        theme::TEXT,
    );

    for tick in timeline.scale().ticks(granularity) {
        let x = origin.x + tick.x;
        painter.line_segment(
            [Pos2::new(x, header.bottom()), Pos2::new(x, canvas.top() + height)],
            Stroke::new(0.5, theme::TICK_LINE),
        );
        painter.text(
            Pos2::new(x + 3.0, canvas.top() + 30.0),
            egui::Align2::LEFT_CENTER,
            tick.label,
            theme::font_tick(),
            theme::TEXT_MUTED,
        );
    }
}

fn draw_today_line(painter: &egui::Painter, top: Pos2, bottom: f32) {
    painter.line_segment(
        [top, Pos2::new(top.x, bottom)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(top.x - badge_w / 2.0, top.y - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_tick(),
        Color32::WHITE,
    );
}

fn draw_edge(
    painter: &egui::Painter,
    edge: &RoutedEdge,
    to_screen: &impl Fn(f32, f32) -> Pos2,
    highlighted: bool,
) {
    let points: Vec<Pos2> = edge
        .path
        .points()
        .iter()
        .map(|p| to_screen(p.x, p.y))
        .collect();
    let [.., before, tip] = points.as_slice() else {
        return;
    };
    let (color, width) = if highlighted {
        (theme::LINK_FOCUSED, 1.8)
    } else {
        (theme::LINK, 1.2)
    };
    let (before, tip) = (*before, *tip);

    painter.add(egui::Shape::line(points, Stroke::new(width, color)));

    // Arrow head along the last segment
    let dir = (tip - before).normalized();
    let normal = Vec2::new(-dir.y, dir.x);
    let base = tip - dir * theme::ARROW_SIZE * 1.6;
    painter.add(egui::Shape::convex_polygon(
        vec![
            tip,
            base + normal * theme::ARROW_SIZE,
            base - normal * theme::ARROW_SIZE,
        ],
        color,
        Stroke::NONE,
    ));
}

fn draw_item_bar(
    painter: &egui::Painter,
    bar_rect: Rect,
    color: Color32,
    label: &str,
    is_focused: bool,
) -> Rect {
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, color);
    let highlight_rect = Rect::from_min_size(
        bar_rect.min,
        Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
    );
    painter.rect_filled(
        highlight_rect,
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    if is_focused {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::FOCUS_RING),
        );
    }

    // Label, clipped to the bar
    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(label.to_string(), theme::font_bar(), Color32::WHITE);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

/// Diamond centred on the bar's start; used for milestones and bars too narrow to read.
fn draw_milestone(painter: &egui::Painter, bar_rect: Rect, color: Color32, is_focused: bool) -> Rect {
    let center = Pos2::new(bar_rect.left(), bar_rect.center().y);
    let r = bar_rect.height() / 2.0;
    let diamond = vec![
        Pos2::new(center.x, center.y - r),
        Pos2::new(center.x + r, center.y),
        Pos2::new(center.x, center.y + r),
        Pos2::new(center.x - r, center.y),
    ];
    let stroke = if is_focused {
        Stroke::new(2.0, theme::FOCUS_RING)
    } else {
        Stroke::NONE
    };
    painter.add(egui::Shape::convex_polygon(diamond, color, stroke));
    Rect::from_center_size(center, Vec2::splat(r * 2.0)).union(bar_rect)
}

/// Name hidden rows faintly while focused, so the gaps read as intentional.
fn draw_row_hint(painter: &egui::Painter, timeline: &Timeline, frame: &Frame, origin: Pos2, pitch: f32) {
    if !frame.focus.is_focused() {
        return;
    }
    for (key, bar) in timeline.bars().iter() {
        if frame.bars.contains_key(key) {
            continue;
        }
        painter.text(
            Pos2::new(origin.x + bar.x + 4.0, origin.y + bar.row as f32 * pitch + pitch / 2.0),
            egui::Align2::LEFT_CENTER,
            key.as_str(),
            theme::font_tick(),
            theme::TEXT_DIM.gamma_multiply(0.6),
        );
    }
}
