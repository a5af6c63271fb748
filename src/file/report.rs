// src/file/report.rs
use super::FileHandler;
use std::path::Path;
use std::fs;
use anyhow::{Result, Context};
use chrono::prelude::*;
use serde::{Serialize, Deserialize};

use crate::analysis::EnergyBreakdown;
use crate::config::AnalysisResult;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub version: String,
    pub generated: DateTime<Utc>,
    pub analyzed: Option<DateTime<Utc>>,
    pub image_file: String,
    pub location: String,
    pub capacity_kw: f64,
    pub sun_hours: f64,
    pub energy: EnergyBreakdown,
    pub annotated_image_url: Option<String>,
    pub result: AnalysisResult,
}

impl AnalysisReport {
    /// `None` until an analysis has completed.
    pub fn from_state(state: &AppState, backend_origin: &str) -> Option<Self> {
        let result = state.analysis_result.as_ref()?;
        let form = &state.form;

        Some(Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated: Utc::now(),
            analyzed: state.analyzed_at.map(|t| t.with_timezone(&Utc)),
            image_file: form.file_name.clone(),
            location: form.location.as_str().to_string(),
            capacity_kw: form.capacity,
            sun_hours: form.sun_hours,
            energy: EnergyBreakdown::derive(form.capacity, form.sun_hours, Some(result)),
            annotated_image_url: result.has_download()
                .then(|| format!("{}{}", backend_origin, result.download_url)),
            result: result.clone(),
        })
    }
}

#[derive(Debug)]
pub struct ReportFileHandler;

impl ReportFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<AnalysisReport> for ReportFileHandler {
    fn load(&self, path: &Path) -> Result<AnalysisReport> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {}", path.display()))?;
        ron::from_str(&content).context("Failed to parse report file")
    }

    fn save(&self, data: &AnalysisReport, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(
            data,
            ron::ser::PrettyConfig::new()
                .new_line("\n".to_string())
                .depth_limit(5)
                .separate_tuple_members(true)
        )?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;
    use crate::config::{Fault, Location, PanelResult, Summary};

    fn analyzed_state() -> AppState {
        let mut state = AppState::new();
        state.form.set_image(Some(PathBuf::from("roof.jpg")));
        state.form.set_location(Location::Agriculture);

        let result = AnalysisResult {
            download_url: "/download/roof.jpg".to_string(),
            summary: Summary {
                total_panels: 1,
                total_daily_loss_kwh: 3.5,
                overall_loss_percentage: 14.0,
            },
            panel_analysis: vec![PanelResult {
                panel_number: 1,
                panel_loss_kwh: 3.5,
                faults_left: vec![Fault {
                    fault: "Snow-Covered".to_string(),
                    confidence: 0.81,
                    affected_area: 22.0,
                    loss_percentage: 14.0,
                    daily_loss: 3.5,
                }],
                faults_right: Vec::new(),
            }],
        };
        state.finish_analysis(Uuid::new_v4(), Ok(result));
        state
    }

    #[test]
    fn test_no_report_before_analysis() {
        assert!(AnalysisReport::from_state(&AppState::new(), "https://backend").is_none());
    }

    #[test]
    fn test_report_from_state() {
        let report = AnalysisReport::from_state(&analyzed_state(), "https://backend").unwrap();
        assert_eq!(report.image_file, "roof.jpg");
        assert_eq!(report.location, "Agriculture");
        assert_eq!(report.energy.final_energy, 21.5);
        assert_eq!(report.annotated_image_url.as_deref(), Some("https://backend/download/roof.jpg"));
        assert!(report.analyzed.is_some());
    }

    #[test]
    fn test_exported_report_reads_back() {
        let report = AnalysisReport::from_state(&analyzed_state(), "https://backend").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.ron");

        let handler = ReportFileHandler::new();
        handler.save(&report, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Snow-Covered"));
        assert_eq!(handler.load(&path).unwrap(), report);
    }
}
