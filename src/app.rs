// src/app.rs
use eframe::egui;
use rfd::FileDialog;
use tokio::runtime::Runtime;
use tokio::sync::oneshot::{self, error::TryRecvError};
use uuid::Uuid;

use crate::client::{decode_image, AnalysisClient, ClientError, Submission};
use crate::config::AnalysisResult;
use crate::file::{self, AnalysisReport, FileHandler, ReportFileHandler};
use crate::state::{AnnotatedImage, AppState, LoadedImage, Notice, Step};
use crate::ui::ViewAction;

type ImageOutcome = Result<(Vec<u8>, egui::ColorImage), ClientError>;

struct PendingAnalysis {
    id: Uuid,
    receiver: oneshot::Receiver<Result<AnalysisResult, ClientError>>,
}

struct PendingImage {
    url: String,
    receiver: oneshot::Receiver<ImageOutcome>,
}

pub struct WizardApp {
    state: AppState,
    client: AnalysisClient,
    runtime: Runtime,
    report_handler: ReportFileHandler,
    pending_analysis: Option<PendingAnalysis>,
    pending_image: Option<PendingImage>,
}

impl WizardApp {
    pub fn new(runtime: Runtime, client: AnalysisClient) -> Self {
        Self {
            state: AppState::new(),
            client,
            runtime,
            report_handler: ReportFileHandler::new(),
            pending_analysis: None,
            pending_image: None,
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Analysis").clicked() {
                    self.new_analysis();
                    ui.close_menu();
                }

                ui.separator();

                let has_result = self.state.analysis_result.is_some();
                if ui.add_enabled(has_result, egui::Button::new("Export Report...")).clicked() {
                    self.export_report();
                    ui.close_menu();
                }

                let image_ready = matches!(self.state.annotated_image, AnnotatedImage::Ready { .. });
                if ui.add_enabled(image_ready, egui::Button::new("Save Annotated Image...")).clicked() {
                    self.save_annotated_image();
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Quit").clicked() {
                    ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.separator();

            if self.state.loading {
                ui.spinner();
                ui.label("Analyzing...");
            }
        });
    }

    fn new_analysis(&mut self) {
        // Dropping the receivers makes any in-flight reply go nowhere
        self.pending_analysis = None;
        self.pending_image = None;
        self.state.reset();
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: ViewAction) {
        match action {
            ViewAction::PickImage => self.pick_image(),
            ViewAction::Submit(submission) => self.submit(ctx, submission),
            ViewAction::SaveAnnotatedImage => self.save_annotated_image(),
            ViewAction::ExportReport => self.export_report(),
        }
    }

    fn pick_image(&mut self) {
        let file_dialog = FileDialog::new()
            .set_title("Choose Image");

        if let Some(path) = file_dialog.pick_file() {
            tracing::debug!(path = %path.display(), "Image chosen");
            self.state.form.set_image(Some(path));
        }
    }

    fn accept_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if self.state.step != Step::Form {
            return;
        }
        if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
            tracing::debug!(path = %path.display(), "Image dropped");
            self.state.form.set_image(Some(path));
        }
    }

    fn submit(&mut self, ctx: &egui::Context, submission: Submission) {
        let (sender, receiver) = oneshot::channel();
        let client = self.client.clone();
        let ctx = ctx.clone();
        let id = submission.id;

        self.runtime.spawn(async move {
            let outcome = client.analyze(&submission).await;
            let _ = sender.send(outcome);
            ctx.request_repaint();
        });

        self.pending_analysis = Some(PendingAnalysis { id, receiver });
    }

    fn fetch_annotated_image(&mut self, ctx: &egui::Context) {
        let Some(result) = &self.state.analysis_result else {
            return;
        };
        if !result.has_download() {
            return;
        }

        let url = result.download_url.clone();
        self.state.annotated_image_requested(url.clone());

        let (sender, receiver) = oneshot::channel();
        let client = self.client.clone();
        let ctx = ctx.clone();
        let download_url = url.clone();

        self.runtime.spawn(async move {
            let outcome = match client.fetch_annotated_image(&download_url).await {
                Ok(bytes) => decode_image(&bytes).map(|image| (bytes, image)),
                Err(e) => Err(e),
            };
            let _ = sender.send(outcome);
            ctx.request_repaint();
        });

        self.pending_image = Some(PendingImage { url, receiver });
    }

    fn poll_jobs(&mut self, ctx: &egui::Context) {
        if let Some(pending) = self.pending_analysis.as_mut() {
            let id = pending.id;
            let outcome = match pending.receiver.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => Some(Err(ClientError::Aborted)),
            };

            if let Some(outcome) = outcome {
                self.pending_analysis = None;
                if self.state.finish_analysis(id, outcome) {
                    self.fetch_annotated_image(ctx);
                }
            }
        }

        if let Some(pending) = self.pending_image.as_mut() {
            let outcome = match pending.receiver.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Closed) => Some(Err(ClientError::Aborted)),
            };

            if let Some(outcome) = outcome {
                let url = pending.url.clone();
                self.pending_image = None;

                let loaded = outcome
                    .map(|(bytes, image)| LoadedImage {
                        bytes,
                        texture: ctx.load_texture("annotated-image", image, egui::TextureOptions::LINEAR),
                    })
                    .map_err(|e| e.to_string());
                self.state.annotated_image_loaded(url, loaded);
            }
        }
    }

    fn export_report(&mut self) {
        let Some(report) = AnalysisReport::from_state(&self.state, self.client.origin()) else {
            return;
        };

        let file_dialog = FileDialog::new()
            .add_filter("RON files", &["ron"])
            .set_file_name("solar-analysis.ron")
            .set_title("Export Report");

        if let Some(path) = file_dialog.save_file() {
            match self.report_handler.save(&report, &path) {
                Ok(()) => tracing::info!(path = %path.display(), "Report exported"),
                Err(e) => {
                    tracing::warn!(error = %e, "Report export failed");
                    self.state.notice = Some(Notice::Failed(format!("Error exporting report: {:#}", e)));
                }
            }
        }
    }

    fn save_annotated_image(&mut self) {
        let AnnotatedImage::Ready { url, image } = &self.state.annotated_image else {
            return;
        };

        let file_dialog = FileDialog::new()
            .set_file_name(file::annotated_file_name(url))
            .set_title("Save Annotated Image");

        if let Some(path) = file_dialog.save_file() {
            match file::save_annotated_image(&image.bytes, &path) {
                Ok(()) => tracing::info!(path = %path.display(), "Annotated image saved"),
                Err(e) => {
                    tracing::warn!(error = %e, "Saving annotated image failed");
                    self.state.notice = Some(Notice::Failed(format!("{:#}", e)));
                }
            }
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.state.notice.clone() else {
            return;
        };

        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(notice.message());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    self.state.dismiss_notice();
                }
            });
    }
}

impl eframe::App for WizardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_jobs(ctx);
        self.accept_dropped_files(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        let origin = self.client.origin().to_string();
        let blocked = self.state.notice.is_some();
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                ui.set_enabled(!blocked);
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| match self.state.step {
                        Step::Intake => {
                            crate::ui::intro::show_intro_view(ui, &mut self.state);
                            None
                        }
                        Step::Form => crate::ui::form::show_form_view(ui, &mut self.state),
                        Step::Results => crate::ui::results::show_results_view(ui, &mut self.state, &origin),
                    })
                    .inner
            })
            .inner;

        if let Some(action) = action {
            self.handle_action(ctx, action);
        }

        // Blocking notice goes on top of everything else
        self.show_notice(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn test_app(origin: &str) -> WizardApp {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let client = AnalysisClient::new(origin, Duration::from_secs(5)).unwrap();
        WizardApp::new(runtime, client)
    }

    fn submitted(app: &mut WizardApp, image: PathBuf) -> Submission {
        app.state.go_to(Step::Form);
        app.state.form.set_image(Some(image));
        app.state.begin_analysis().unwrap()
    }

    fn poll_until(app: &mut WizardApp, ctx: &egui::Context, done: impl Fn(&WizardApp) -> bool) {
        for _ in 0..500 {
            app.poll_jobs(ctx);
            if done(&*app) {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("background job did not finish");
    }

    fn png_bytes() -> Vec<u8> {
        let mut png = Vec::new();
        image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 217, 155, 255]))
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        png
    }

    fn decoded_png() -> ImageOutcome {
        let bytes = png_bytes();
        let image = decode_image(&bytes)?;
        Ok((bytes, image))
    }

    #[test]
    fn test_dropped_analysis_sender_clears_loading() {
        let ctx = egui::Context::default();
        let mut app = test_app("http://127.0.0.1:9");
        let submission = submitted(&mut app, PathBuf::from("roof.jpg"));

        let (sender, receiver) = oneshot::channel();
        app.pending_analysis = Some(PendingAnalysis { id: submission.id, receiver });
        drop(sender);

        app.poll_jobs(&ctx);

        assert!(app.pending_analysis.is_none());
        assert!(!app.state.loading);
        assert_eq!(app.state.step, Step::Form);
        assert_eq!(app.state.notice, Some(Notice::BackendFailed));
    }

    #[test]
    fn test_pending_analysis_keeps_loading() {
        let ctx = egui::Context::default();
        let mut app = test_app("http://127.0.0.1:9");
        let submission = submitted(&mut app, PathBuf::from("roof.jpg"));

        let (_sender, receiver) = oneshot::channel();
        app.pending_analysis = Some(PendingAnalysis { id: submission.id, receiver });

        app.poll_jobs(&ctx);

        assert!(app.pending_analysis.is_some());
        assert!(app.state.loading);
        assert!(app.state.notice.is_none());
    }

    #[test]
    fn test_image_for_stale_result_is_discarded() {
        let ctx = egui::Context::default();
        let mut app = test_app("http://127.0.0.1:9");
        app.state.annotated_image_requested("/download/new.png".to_string());

        let (sender, receiver) = oneshot::channel();
        app.pending_image = Some(PendingImage { url: "/download/old.png".to_string(), receiver });
        sender.send(decoded_png()).ok();

        app.poll_jobs(&ctx);

        assert!(app.pending_image.is_none());
        assert!(matches!(
            &app.state.annotated_image,
            AnnotatedImage::Loading { url } if url == "/download/new.png"
        ));
    }

    #[test]
    fn test_dropped_image_sender_marks_image_failed() {
        let ctx = egui::Context::default();
        let mut app = test_app("http://127.0.0.1:9");
        app.state.annotated_image_requested("/download/roof.png".to_string());

        let (sender, receiver) = oneshot::channel::<ImageOutcome>();
        app.pending_image = Some(PendingImage { url: "/download/roof.png".to_string(), receiver });
        drop(sender);

        app.poll_jobs(&ctx);

        assert!(matches!(
            &app.state.annotated_image,
            AnnotatedImage::Failed { message, .. } if message == &ClientError::Aborted.to_string()
        ));
    }

    #[test]
    fn test_submit_then_poll_reaches_results_with_image() {
        let mut app = test_app("http://127.0.0.1:9");
        let mock_server = app.runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "download_url": "/download/roof.png",
                    "summary": {
                        "total_panels": 1,
                        "total_daily_loss_kwh": 3.5,
                        "overall_loss_percentage": 14.0
                    },
                    "panel_analysis": []
                })))
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/download/roof.png"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
                .mount(&server)
                .await;
            server
        });
        app.client = AnalysisClient::new(mock_server.uri(), Duration::from_secs(5)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("roof.jpg");
        std::fs::write(&image_path, b"jpeg-bytes").unwrap();

        let ctx = egui::Context::default();
        let submission = submitted(&mut app, image_path);
        app.submit(&ctx, submission);

        poll_until(&mut app, &ctx, |app| app.pending_analysis.is_none());
        assert!(!app.state.loading);
        assert_eq!(app.state.step, Step::Results);
        assert_eq!(app.state.analysis_result.as_ref().unwrap().summary.total_daily_loss_kwh, 3.5);

        poll_until(&mut app, &ctx, |app| app.pending_image.is_none());
        match &app.state.annotated_image {
            AnnotatedImage::Ready { url, image } => {
                assert_eq!(url, "/download/roof.png");
                assert_eq!(image.bytes, png_bytes());
                assert_eq!(image.texture.size(), [2, 2]);
            }
            _ => panic!("annotated image not ready"),
        }
    }
}
