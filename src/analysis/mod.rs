// src/analysis/mod.rs
pub mod energy;
pub mod chart;

// Re-export commonly used types
pub use energy::EnergyBreakdown;
pub use chart::donut_slices;
