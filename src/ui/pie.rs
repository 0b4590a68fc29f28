use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};

use crate::charts::PieSpec;
use crate::color::generate_palette;

// ---------------------------------------------------------------------------
// Proportion chart (custom painter)
// ---------------------------------------------------------------------------

/// Radians per tessellation step along a slice arc.
const ARC_STEP: f32 = 0.12;

/// Render a [`PieSpec`] as a pie with a legend to its right. A spec whose
/// slice total is zero renders a placeholder message instead of erroring.
pub fn pie_chart(ui: &mut Ui, spec: &PieSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&spec.title);
    });

    let desired = egui::vec2(ui.available_width().min(680.0), 280.0);
    let (response, painter) = ui.allocate_painter(desired, Sense::hover());
    let rect = response.rect;

    let total = spec.total();
    if total == 0 {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "No launches match the current selection",
            FontId::proportional(14.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }

    let radius = (rect.height() * 0.5).min(rect.width() * 0.25) - 8.0;
    let center = egui::pos2(rect.left() + rect.width() * 0.30, rect.center().y);
    let colors = generate_palette(spec.slices.len());

    // Slices, clockwise from 12 o'clock.
    let mut angle = -FRAC_PI_2;
    for (slice, color) in spec.slices.iter().zip(colors.iter()) {
        if slice.value == 0 {
            continue;
        }
        let sweep = (slice.value as f32 / total as f32) * TAU;
        paint_slice(&painter, center, radius, angle, sweep, *color);
        angle += sweep;
    }

    // Legend: swatch, label, count and share per slice.
    let mut legend_pos = egui::pos2(
        rect.left() + rect.width() * 0.58,
        rect.top() + 12.0,
    );
    for (slice, color) in spec.slices.iter().zip(colors.iter()) {
        let swatch = egui::Rect::from_min_size(legend_pos, egui::vec2(12.0, 12.0));
        painter.rect_filled(swatch, egui::CornerRadius::same(2), *color);
        let share = 100.0 * slice.value as f64 / total as f64;
        painter.text(
            egui::pos2(swatch.right() + 6.0, swatch.center().y),
            Align2::LEFT_CENTER,
            format!("{} — {} ({share:.1}%)", slice.label, slice.value),
            FontId::proportional(13.0),
            ui.visuals().text_color(),
        );
        legend_pos.y += 20.0;
    }
}

/// Fill one slice as a fan of small triangles so wide slices (> half the
/// disc) stay convex per shape.
fn paint_slice(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start: f32,
    sweep: f32,
    color: Color32,
) {
    let steps = ((sweep / ARC_STEP).ceil() as usize).max(1);
    let on_arc = |a: f32| center + radius * egui::vec2(a.cos(), a.sin());

    for i in 0..steps {
        let a0 = start + sweep * (i as f32 / steps as f32);
        let a1 = start + sweep * ((i + 1) as f32 / steps as f32);
        painter.add(Shape::convex_polygon(
            vec![center, on_arc(a0), on_arc(a1)],
            color,
            Stroke::NONE,
        ));
    }
}
