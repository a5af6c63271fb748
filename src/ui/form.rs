// src/ui/form.rs
use eframe::egui;
use crate::config::Location;
use crate::state::AppState;
use super::{steps, ViewAction};

pub fn show_form_view(ui: &mut egui::Ui, state: &mut AppState) -> Option<ViewAction> {
    let mut action = None;

    steps::show_step_navigator(ui, state);
    ui.add_space(8.0);

    ui.vertical_centered(|ui| {
        ui.heading(egui::RichText::new("✨ Solar Panel Energy Loss Input").strong());
    });
    ui.add_space(16.0);

    ui.vertical_centered(|ui| {
        ui.set_max_width(480.0);

        ui.group(|ui| {
            ui.set_width(ui.available_width());

            // Location
            ui.strong("📍 Where Installed?");
            let mut location = state.form.location;
            egui::ComboBox::from_id_source("location_select")
                .selected_text(location.as_str())
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for option in Location::ALL {
                        ui.selectable_value(&mut location, option, option.as_str());
                    }
                });
            if location != state.form.location {
                state.form.set_location(location);
            }
            ui.add_space(12.0);

            // Numbers are free-form; positivity is checked on submit
            ui.strong("⚡ Total System Capacity (kW)");
            let mut capacity = state.form.capacity;
            let response = ui.add(egui::DragValue::new(&mut capacity).speed(0.1).suffix(" kW"))
                .on_hover_text("Enter 5, 10, 20...");
            if response.changed() {
                state.form.set_capacity(capacity);
            }
            ui.add_space(12.0);

            ui.strong("🌞 Sunlight Hours per Day");
            let mut sun_hours = state.form.sun_hours;
            let response = ui.add(egui::DragValue::new(&mut sun_hours).speed(0.1).suffix(" h"))
                .on_hover_text("Enter 5–8 hours");
            if response.changed() {
                state.form.set_sun_hours(sun_hours);
            }
            ui.add_space(12.0);

            ui.strong("🖼 Upload Image");
            ui.horizontal(|ui| {
                if ui.button("Choose File").clicked() {
                    action = Some(ViewAction::PickImage);
                }
                ui.label(&state.form.file_name);
            });
            ui.small("or drop an image onto this window");
        });

        ui.add_space(16.0);

        ui.horizontal(|ui| {
            if ui.button("← Back").clicked() {
                state.back();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if state.loading { "Processing..." } else { "Analyze →" };
                let analyze = egui::Button::new(egui::RichText::new(label).strong());
                if ui.add_enabled(!state.loading, analyze).clicked() {
                    if let Some(submission) = state.begin_analysis() {
                        action = Some(ViewAction::Submit(submission));
                    }
                }
                if state.loading {
                    ui.spinner();
                }
            });
        });
    });

    action
}
