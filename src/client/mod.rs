// src/client/mod.rs
// Multipart POST of the photo and form values to the backend root; the
// annotated photo is then served from the result's `download_url` path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use eframe::egui;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use uuid::Uuid;

use crate::config::{AnalysisResult, Location};
use crate::settings::Settings;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid annotated image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("request task ended without a response")]
    Aborted,
}

/// One press of "Analyze", validated and ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub image_path: PathBuf,
    pub location: Location,
    pub capacity: f64,
    pub sun_hours: f64,
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    origin: String,
}

impl AnalysisClient {
    pub fn new(origin: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            origin: origin.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(settings.backend_origin.clone(), settings.request_timeout())
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Absolute URL of the annotated image; `download_url` is a path on the backend.
    pub fn annotated_image_url(&self, download_url: &str) -> String {
        format!("{}{}", self.origin, download_url)
    }

    pub async fn analyze(&self, submission: &Submission) -> Result<AnalysisResult, ClientError> {
        let bytes = tokio::fs::read(&submission.image_path)
            .await
            .map_err(|source| ClientError::ImageRead {
                path: submission.image_path.clone(),
                source,
            })?;

        let file_name = submission.image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        let image_part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_type(&submission.image_path))?;

        let form = Form::new()
            .part("greyImage", image_part)
            .text("location", submission.location.as_str())
            .text("capacity", submission.capacity.to_string())
            .text("sunHours", submission.sun_hours.to_string());

        tracing::info!(
            request_id = %submission.id,
            location = %submission.location,
            capacity = submission.capacity,
            sun_hours = submission.sun_hours,
            "Submitting image for analysis"
        );

        let response = self.client
            .post(format!("{}/", self.origin))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16(), body });
        }

        Ok(AnalysisResult::from_json(&body)?)
    }

    pub async fn fetch_annotated_image(&self, download_url: &str) -> Result<Vec<u8>, ClientError> {
        let response = self.client
            .get(self.annotated_image_url(download_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status: status.as_u16(), body });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

pub fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage, ClientError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

fn mime_type(path: &Path) -> &'static str {
    let extension = path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}
