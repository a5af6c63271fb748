// src/ui/intro.rs
use eframe::egui;
use crate::state::AppState;

pub fn show_intro_view(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.set_max_width(750.0);
        ui.add_space(40.0);

        ui.heading(egui::RichText::new("☀ Solar Energy AI Predictor").size(32.0).strong());
        ui.add_space(16.0);

        ui.label(
            "Our Solar Energy AI Predictor uses advanced deep-learning models to analyze \
             your solar panel image, detect faults such as dust, cracks, snow, shading, \
             and bird drops, and accurately calculate the resulting energy loss.",
        );
        ui.add_space(8.0);
        ui.label(
            "Simply upload an image and let the AI estimate performance, panel health, \
             and efficiency loss, helping you maintain maximum solar output with ease.",
        );
        ui.add_space(16.0);
        ui.label(egui::RichText::new("Upload an image & analyze faults + energy loss.").size(18.0));
        ui.add_space(24.0);

        let start = egui::Button::new(egui::RichText::new("Start →").strong().size(18.0))
            .min_size(egui::vec2(160.0, 40.0))
            .rounding(20.0);
        if ui.add(start).clicked() {
            state.start();
        }
    });
}
