// src/config/mod.rs
pub mod location;
pub mod result;

// Re-export commonly used types
pub use location::Location;
pub use result::{AnalysisResult, Summary, PanelResult, Fault};
