// src/ui/results.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

use crate::analysis::EnergyBreakdown;
use crate::config::{AnalysisResult, Fault, PanelResult};
use crate::state::{AnnotatedImage, AppState};
use super::{donut, steps, ViewAction};

const CARD_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(40, 40, 40, 120);
const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 193, 7);
const SUCCESS: egui::Color32 = egui::Color32::from_rgb(25, 135, 84);

/// One side of a panel's breakdown.
#[derive(Debug, PartialEq)]
pub struct PanelCard<'a> {
    pub title: String,
    pub faults: &'a [Fault],
    pub empty_label: &'static str,
}

pub fn panel_cards(panel: &PanelResult) -> [PanelCard<'_>; 2] {
    [
        PanelCard {
            title: format!("🔧 Panel {}", panel.panel_number),
            faults: &panel.faults_left,
            empty_label: "✔ No visible faults",
        },
        PanelCard {
            title: "📌 Additional Info".to_string(),
            faults: &panel.faults_right,
            empty_label: "✔ No extra faults",
        },
    ]
}

pub fn fault_lines(fault: &Fault) -> [String; 4] {
    [
        format!("Fault: {}", fault.fault),
        format!("Confidence: {}", fault.confidence_label()),
        format!("Affected: {}%", fault.affected_area),
        format!("Loss %: {}%", fault.loss_percentage),
    ]
}

pub fn daily_loss_line(fault: &Fault) -> String {
    format!("🌞 Daily Loss: {} kWh", fault.daily_loss)
}

pub fn show_results_view(ui: &mut egui::Ui, state: &mut AppState, backend_origin: &str) -> Option<ViewAction> {
    let mut action = None;

    steps::show_step_navigator(ui, state);
    ui.add_space(8.0);

    ui.vertical_centered(|ui| {
        ui.heading(egui::RichText::new("📊 Solar Panel Energy Loss Analysis").strong());
    });
    ui.add_space(16.0);

    if let Some(result) = &state.analysis_result {
        let breakdown = EnergyBreakdown::derive(state.form.capacity, state.form.sun_hours, Some(result));

        draw_annotated_image(ui, &state.annotated_image);
        ui.add_space(16.0);

        draw_summary(ui, &breakdown, result);
        ui.add_space(16.0);

        draw_panel_breakdown(ui, result);
        ui.add_space(16.0);

        ui.vertical_centered(|ui| {
            if result.has_download() {
                let url = format!("{}{}", backend_origin, result.download_url);
                ui.hyperlink_to("Download Annotated Image", url);
            }
            ui.horizontal(|ui| {
                let image_ready = matches!(state.annotated_image, AnnotatedImage::Ready { .. });
                if ui.add_enabled(image_ready, egui::Button::new("💾 Save Annotated Image…")).clicked() {
                    action = Some(ViewAction::SaveAnnotatedImage);
                }
                if ui.button("📄 Export Report…").clicked() {
                    action = Some(ViewAction::ExportReport);
                }
            });
            if let Some(analyzed_at) = state.analyzed_at {
                ui.small(format!("Analyzed {}", analyzed_at.format("%Y-%m-%d %H:%M:%S")));
            }
        });
    } else {
        ui.vertical_centered(|ui| {
            ui.label("No analysis yet. Go back, choose an image and press Analyze.");
        });
    }

    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        if ui.button("← Back").clicked() {
            state.back();
        }
    });

    action
}

fn draw_annotated_image(ui: &mut egui::Ui, image: &AnnotatedImage) {
    ui.vertical_centered(|ui| match image {
        AnnotatedImage::None => {}
        AnnotatedImage::Loading { .. } => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading annotated image…");
            });
        }
        AnnotatedImage::Ready { image, .. } => {
            let texture = &image.texture;
            let max_width = ui.available_width().min(900.0);
            ui.add(
                egui::Image::new(egui::load::SizedTexture::new(texture.id(), texture.size_vec2()))
                    .max_width(max_width)
                    .rounding(6.0),
            );
        }
        AnnotatedImage::Failed { message, .. } => {
            ui.colored_label(egui::Color32::RED, format!("Annotated image unavailable: {}", message));
        }
    });
}

fn draw_summary(ui: &mut egui::Ui, breakdown: &EnergyBreakdown, result: &AnalysisResult) {
    egui::Frame::group(ui.style()).fill(CARD_FILL).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.heading("📘 System Summary");
            ui.add_space(8.0);

            let size = ui.available_width().min(350.0);
            donut::donut_chart(
                ui,
                size,
                &breakdown.chart_values(),
                &[donut::USABLE_COLOR, donut::LOSS_COLOR],
                &breakdown.summary_lines(result),
            );
            donut::legend(ui, &[
                ("Usable Energy", donut::USABLE_COLOR),
                ("Energy Loss", donut::LOSS_COLOR),
            ]);
        });
    });
}

fn draw_panel_breakdown(ui: &mut egui::Ui, result: &AnalysisResult) {
    ui.heading(egui::RichText::new("🟦 Panel-wise Breakdown").strong());
    ui.add_space(8.0);

    if !result.panel_analysis.is_empty() {
        draw_panel_loss_chart(ui, &result.panel_analysis);
        ui.add_space(8.0);
    }

    for (idx, panel) in result.panel_analysis.iter().enumerate() {
        ui.push_id(("panel", idx), |ui| {
            ui.columns(2, |columns| {
                for (column, card) in columns.iter_mut().zip(panel_cards(panel)) {
                    draw_panel_card(column, &card);
                }
            });

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                egui::Frame::group(ui.style()).fill(CARD_FILL).show(ui, |ui| {
                    ui.set_min_width(260.0);
                    ui.vertical_centered(|ui| {
                        ui.heading(egui::RichText::new("⚡ Panel Loss").strong());
                        ui.heading(format!("{} kWh", panel.panel_loss_kwh));
                    });
                });
            });
            ui.add_space(24.0);
        });
    }
}

fn draw_panel_card(ui: &mut egui::Ui, card: &PanelCard<'_>) {
    egui::Frame::group(ui.style()).fill(CARD_FILL).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(&card.title);
        ui.add_space(6.0);

        if card.faults.is_empty() {
            ui.colored_label(SUCCESS, card.empty_label);
            return;
        }

        for fault in card.faults {
            egui::Frame::none()
                .fill(egui::Color32::from_black_alpha(64))
                .rounding(6.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    for line in fault_lines(fault) {
                        ui.label(line);
                    }
                    ui.colored_label(WARNING, egui::RichText::new(daily_loss_line(fault)).strong());
                });
            ui.add_space(6.0);
        }
    });
}

fn draw_panel_loss_chart(ui: &mut egui::Ui, panels: &[PanelResult]) {
    let bars: Vec<Bar> = panels.iter()
        .map(|panel| {
            Bar::new(panel.panel_number as f64, panel.panel_loss_kwh)
                .width(0.6)
                .name(format!("Panel {}", panel.panel_number))
                .fill(donut::LOSS_COLOR)
        })
        .collect();

    Plot::new("panel_loss_chart")
        .height(180.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .y_axis_label("kWh lost / day")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Panel loss"));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use crate::config::Summary;
    use crate::state::Step;

    fn dusty() -> Fault {
        Fault {
            fault: "Dusty".to_string(),
            confidence: 0.923,
            affected_area: 40.2,
            loss_percentage: 14.0,
            daily_loss: 3.5,
        }
    }

    fn result_with(panels: Vec<PanelResult>) -> AnalysisResult {
        AnalysisResult {
            download_url: "/download/roof.jpg".to_string(),
            summary: Summary {
                total_panels: panels.len() as u32,
                total_daily_loss_kwh: 3.5,
                overall_loss_percentage: 14.0,
            },
            panel_analysis: panels,
        }
    }

    fn render(state: &mut AppState) -> Option<ViewAction> {
        let ctx = egui::Context::default();
        let mut action = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = show_results_view(ui, state, "https://backend.example.com");
            });
        });
        action
    }

    #[test]
    fn test_empty_left_faults_show_success_label() {
        let panel = PanelResult {
            panel_number: 3,
            panel_loss_kwh: 0.0,
            faults_left: Vec::new(),
            faults_right: vec![dusty()],
        };

        let [left, right] = panel_cards(&panel);
        assert_eq!(left.title, "🔧 Panel 3");
        assert!(left.faults.is_empty());
        assert_eq!(left.empty_label, "✔ No visible faults");
        assert_eq!(right.faults.len(), 1);
        assert_eq!(right.empty_label, "✔ No extra faults");
    }

    #[test]
    fn test_fault_lines() {
        let fault = dusty();
        assert_eq!(
            fault_lines(&fault),
            ["Fault: Dusty", "Confidence: 92.3%", "Affected: 40.2%", "Loss %: 14%"]
        );
        assert_eq!(daily_loss_line(&fault), "🌞 Daily Loss: 3.5 kWh");
    }

    #[test]
    fn test_results_render_without_panels() {
        let mut state = AppState::new();
        state.finish_analysis(Uuid::new_v4(), Ok(result_with(Vec::new())));
        assert_eq!(state.step, Step::Results);

        assert!(render(&mut state).is_none());
        assert_eq!(state.step, Step::Results);
    }

    #[test]
    fn test_results_render_with_panels() {
        let mut state = AppState::new();
        let panels = vec![
            PanelResult { panel_number: 1, panel_loss_kwh: 3.5, faults_left: vec![dusty()], faults_right: Vec::new() },
            PanelResult { panel_number: 2, panel_loss_kwh: 0.0, ..Default::default() },
        ];
        state.finish_analysis(Uuid::new_v4(), Ok(result_with(panels)));
        state.annotated_image_requested("/download/roof.jpg".to_string());

        assert!(render(&mut state).is_none());
    }

    #[test]
    fn test_results_render_before_any_analysis() {
        let mut state = AppState::new();
        state.go_to(Step::Results);
        assert!(render(&mut state).is_none());
    }
}
