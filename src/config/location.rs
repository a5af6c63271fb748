// src/config/location.rs
use serde::{Serialize, Deserialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Location {
    #[default]
    Home,
    Office,
    Factory,
    Agriculture,
    #[serde(rename = "Solar Plant")]
    SolarPlant,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::Home,
        Location::Office,
        Location::Factory,
        Location::Agriculture,
        Location::SolarPlant,
    ];

    /// Value sent to the backend in the `location` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Home => "Home",
            Location::Office => "Office",
            Location::Factory => "Factory",
            Location::Agriculture => "Agriculture",
            Location::SolarPlant => "Solar Plant",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
