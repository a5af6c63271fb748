// src/settings.rs
use anyhow::{anyhow, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BACKEND_ORIGIN: &str = "https://energy-project-backend-ol3t.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_WINDOW_WIDTH: f64 = 1024.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 768.0;

const APP_DIR: &str = "solar-loss-wizard";
const SETTINGS_FILE: &str = "settings.ron";
const ENV_PREFIX: &str = "SOLAR_WIZARD";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub backend_origin: String,
    pub request_timeout_secs: u64,
    pub window_width: f64,
    pub window_height: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_origin: DEFAULT_BACKEND_ORIGIN.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Defaults, then the user's settings file if present, then `SOLAR_WIZARD_*` variables.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("No config directory on this platform, using built-in settings");
                Self::build(None)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Self::build(Some(path))
            .with_context(|| format!("Failed to load settings from {}", path.display()))
    }

    fn build(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("backend_origin", DEFAULT_BACKEND_ORIGIN)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
            .set_default("window_width", DEFAULT_WINDOW_WIDTH)?
            .set_default("window_height", DEFAULT_WINDOW_HEIGHT)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Ron).required(false));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.normalized()
    }

    fn normalized(mut self) -> Result<Self> {
        self.backend_origin = self.backend_origin.trim().trim_end_matches('/').to_string();

        if !(self.backend_origin.starts_with("http://") || self.backend_origin.starts_with("https://")) {
            return Err(anyhow!("backend_origin must be an http(s) URL, got '{}'", self.backend_origin));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request_timeout_secs must be greater than zero"));
        }

        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
