// src/state/mod.rs
use chrono::{DateTime, Local};
use eframe::egui;
use uuid::Uuid;

use crate::client::{ClientError, Submission};
use crate::config::AnalysisResult;

pub mod form_state;

pub use form_state::FormState;

// Wizard steps, numbered 1..=3 in the navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Intake,
    Form,
    Results,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::Intake, Step::Form, Step::Results];

    pub fn number(&self) -> u8 {
        match self {
            Step::Intake => 1,
            Step::Form => 2,
            Step::Results => 3,
        }
    }
}

/// Blocking message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    MissingImage,
    InvalidParameter { field: &'static str },
    BackendFailed,
    Failed(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::MissingImage => "Please upload an image first.".to_string(),
            Notice::InvalidParameter { field } => format!("{} must be a number greater than zero.", field),
            Notice::BackendFailed => "Backend connection failed".to_string(),
            Notice::Failed(message) => message.clone(),
        }
    }
}

pub struct LoadedImage {
    pub bytes: Vec<u8>,
    pub texture: egui::TextureHandle,
}

#[derive(Default)]
pub enum AnnotatedImage {
    #[default]
    None,
    Loading { url: String },
    Ready { url: String, image: LoadedImage },
    Failed { url: String, message: String },
}

impl AnnotatedImage {
    fn url(&self) -> Option<&str> {
        match self {
            AnnotatedImage::None => None,
            AnnotatedImage::Loading { url }
            | AnnotatedImage::Ready { url, .. }
            | AnnotatedImage::Failed { url, .. } => Some(url),
        }
    }
}

// Core application state
#[derive(Default)]
pub struct AppState {
    pub step: Step,
    pub form: FormState,
    pub loading: bool,
    pub analysis_result: Option<AnalysisResult>,
    pub analyzed_at: Option<DateTime<Local>>,
    pub annotated_image: AnnotatedImage,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free navigation from the step indicator; nothing gates a jump.
    pub fn go_to(&mut self, step: Step) {
        self.step = step;
    }

    pub fn start(&mut self) {
        self.step = Step::Form;
    }

    pub fn back(&mut self) {
        self.step = match self.step {
            Step::Intake | Step::Form => Step::Intake,
            Step::Results => Step::Form,
        };
    }

    /// Validates the form and marks the request in flight. `None` means
    /// nothing should be sent, either because a notice was raised or a
    /// request is already running.
    pub fn begin_analysis(&mut self) -> Option<Submission> {
        if self.loading {
            tracing::debug!("Analysis already in flight, ignoring submit");
            return None;
        }

        match self.form.to_submission() {
            Ok(submission) => {
                self.loading = true;
                Some(submission)
            }
            Err(notice) => {
                self.notice = Some(notice);
                None
            }
        }
    }

    /// Applies the backend outcome. Returns true when a new result was stored.
    pub fn finish_analysis(&mut self, id: Uuid, outcome: Result<AnalysisResult, ClientError>) -> bool {
        self.loading = false;

        match outcome {
            Ok(result) => {
                tracing::info!(
                    request_id = %id,
                    panels = result.summary.total_panels,
                    loss_kwh = result.summary.total_daily_loss_kwh,
                    "Analysis complete"
                );
                self.annotated_image = AnnotatedImage::None;
                self.analysis_result = Some(result);
                self.analyzed_at = Some(Local::now());
                self.step = Step::Results;
                true
            }
            Err(e) => {
                tracing::error!(request_id = %id, error = %e, "Analysis request failed");
                self.notice = Some(Notice::BackendFailed);
                false
            }
        }
    }

    pub fn annotated_image_requested(&mut self, url: String) {
        self.annotated_image = AnnotatedImage::Loading { url };
    }

    /// Stores a fetched annotated image unless a newer result replaced the one it belongs to.
    pub fn annotated_image_loaded(&mut self, url: String, loaded: Result<LoadedImage, String>) {
        if self.annotated_image.url() != Some(url.as_str()) {
            tracing::debug!(%url, "Discarding annotated image for a stale result");
            return;
        }

        self.annotated_image = match loaded {
            Ok(image) => AnnotatedImage::Ready { url, image },
            Err(message) => {
                tracing::warn!(%url, %message, "Annotated image unavailable");
                AnnotatedImage::Failed { url, message }
            }
        };
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
