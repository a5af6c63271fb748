// src/ui/steps.rs
use eframe::egui;
use crate::state::{AppState, Step};

const CIRCLE_SIZE: f32 = 48.0;
const CIRCLE_GAP: f32 = 24.0;

/// Numbered step indicator; clicking a number jumps straight to that step.
pub fn show_step_navigator(ui: &mut egui::Ui, state: &mut AppState) {
    let total_width = Step::ALL.len() as f32 * CIRCLE_SIZE
        + (Step::ALL.len() - 1) as f32 * CIRCLE_GAP;

    ui.horizontal(|ui| {
        ui.add_space(((ui.available_width() - total_width) / 2.0).max(0.0));
        ui.spacing_mut().item_spacing.x = CIRCLE_GAP;

        for step in Step::ALL {
            let current = state.step == step;
            let (rect, response) = ui.allocate_exact_size(
                egui::vec2(CIRCLE_SIZE, CIRCLE_SIZE),
                egui::Sense::click(),
            );

            let (fill, text_color, ring_color) = circle_colors(ui.visuals(), current, response.hovered());
            let painter = ui.painter();
            let radius = CIRCLE_SIZE / 2.0 - 2.0;

            painter.circle(rect.center(), radius, fill, egui::Stroke::new(3.0, ring_color));
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                step.number().to_string(),
                egui::FontId::proportional(20.0),
                text_color,
            );

            if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                state.go_to(step);
            }
        }
    });
}

/// Fill, number and ring colours for one step circle in the active theme.
fn circle_colors(visuals: &egui::Visuals, current: bool, hovered: bool) -> (egui::Color32, egui::Color32, egui::Color32) {
    let strong = visuals.strong_text_color();
    if current {
        (visuals.selection.bg_fill, visuals.selection.stroke.color, visuals.selection.bg_fill)
    } else if hovered {
        (visuals.widgets.hovered.weak_bg_fill, strong, strong)
    } else {
        (egui::Color32::TRANSPARENT, strong, strong)
    }
}
