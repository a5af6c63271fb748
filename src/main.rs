// src/main.rs
use eframe::egui;
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod analysis;
mod app;
mod client;
mod config;
mod file;
mod settings;
mod state;
mod ui;

use app::WizardApp;
use client::AnalysisClient;
use settings::Settings;

const APP_NAME: &str = "Solar Energy AI Predictor";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load()?;
    tracing::info!(
        backend = %settings.backend_origin,
        timeout_secs = settings.request_timeout_secs,
        "Starting {}", APP_NAME
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("backend-io")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let client = AnalysisClient::from_settings(&settings)
        .context("Failed to build HTTP client")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width as f32, settings.window_height as f32])
            .with_drag_and_drop(true)
            .with_title(APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |_cc| Box::new(WizardApp::new(runtime, client))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
