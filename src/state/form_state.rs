// src/state/form_state.rs
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::client::Submission;
use crate::config::Location;
use super::Notice;

pub const NO_FILE_CHOSEN: &str = "No file chosen";
pub const DEFAULT_CAPACITY_KW: f64 = 5.0;
pub const DEFAULT_SUN_HOURS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub image: Option<PathBuf>,
    pub file_name: String,
    pub location: Location,
    pub capacity: f64,
    pub sun_hours: f64,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            image: None,
            file_name: NO_FILE_CHOSEN.to_string(),
            location: Location::default(),
            capacity: DEFAULT_CAPACITY_KW,
            sun_hours: DEFAULT_SUN_HOURS,
        }
    }
}

impl FormState {
    pub fn set_image(&mut self, path: Option<PathBuf>) {
        self.file_name = path.as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| NO_FILE_CHOSEN.to_string());
        self.image = path;
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn set_capacity(&mut self, capacity: f64) {
        self.capacity = capacity;
    }

    pub fn set_sun_hours(&mut self, sun_hours: f64) {
        self.sun_hours = sun_hours;
    }

    /// Builds the backend submission, or the notice explaining why it can't be sent.
    pub fn to_submission(&self) -> Result<Submission, Notice> {
        let image_path = self.image.clone().ok_or(Notice::MissingImage)?;

        if !is_positive(self.capacity) {
            return Err(Notice::InvalidParameter { field: "System capacity" });
        }
        if !is_positive(self.sun_hours) {
            return Err(Notice::InvalidParameter { field: "Sunlight hours" });
        }

        Ok(Submission {
            id: Uuid::new_v4(),
            image_path,
            location: self.location,
            capacity: self.capacity,
            sun_hours: self.sun_hours,
        })
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
