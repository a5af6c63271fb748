// src/ui/donut.rs
use eframe::egui;
use crate::analysis::donut_slices;

pub const USABLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x00, 0xd9, 0x9b);
pub const LOSS_COLOR: egui::Color32 = egui::Color32::from_rgb(0xff, 0x52, 0x52);

const PADDING_DEG: f32 = 4.0;
// Ring proportions of a 350px chart with radii 100..140
const OUTER_RATIO: f32 = 140.0 / 350.0;
const INNER_RATIO: f32 = 100.0 / 350.0;
const SEGMENT_DEG: f32 = 3.0;

/// Two-tone ring chart with a block of centred text.
pub fn donut_chart(
    ui: &mut egui::Ui,
    size: f32,
    values: &[f64],
    colors: &[egui::Color32],
    center_lines: &[String],
) -> egui::Response {
    let (response, painter) = ui.allocate_painter(egui::vec2(size, size), egui::Sense::hover());
    let center = response.rect.center();
    let outer = size * OUTER_RATIO;
    let inner = size * INNER_RATIO;

    for slice in donut_slices(values, PADDING_DEG) {
        let color = colors.get(slice.index).copied().unwrap_or(egui::Color32::GRAY);
        let steps = (slice.sweep_deg / SEGMENT_DEG).ceil().max(1.0) as usize;
        let step_deg = slice.sweep_deg / steps as f32;

        // Each segment is a thin convex quad
        for i in 0..steps {
            let a0 = slice.start_deg + step_deg * i as f32;
            let a1 = a0 + step_deg;
            let points = vec![
                ring_point(center, outer, a0),
                ring_point(center, outer, a1),
                ring_point(center, inner, a1),
                ring_point(center, inner, a0),
            ];
            painter.add(egui::Shape::convex_polygon(points, color, egui::Stroke::NONE));
        }
    }

    let line_height = (size / 350.0 * 22.0).max(12.0);
    let font = egui::FontId::proportional((size / 350.0 * 15.0).max(10.0));
    let first_y = center.y - line_height * (center_lines.len() as f32 - 1.0) / 2.0;
    for (i, line) in center_lines.iter().enumerate() {
        painter.text(
            egui::pos2(center.x, first_y + line_height * i as f32),
            egui::Align2::CENTER_CENTER,
            line,
            font.clone(),
            ui.visuals().strong_text_color(),
        );
    }

    response
}

fn ring_point(center: egui::Pos2, radius: f32, deg: f32) -> egui::Pos2 {
    let rad = deg.to_radians();
    // Screen y grows downwards, so counter-clockwise means subtracting sin
    egui::pos2(center.x + radius * rad.cos(), center.y - radius * rad.sin())
}

pub fn legend(ui: &mut egui::Ui, entries: &[(&str, egui::Color32)]) {
    ui.horizontal(|ui| {
        for (label, color) in entries {
            ui.colored_label(*color, "■");
            ui.label(*label);
            ui.add_space(12.0);
        }
    });
}
