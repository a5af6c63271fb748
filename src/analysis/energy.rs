// src/analysis/energy.rs

use serde::{Serialize, Deserialize};
use crate::config::AnalysisResult;

/// Daily energy figures derived from the form inputs and the backend summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EnergyBreakdown {
    pub max_energy: f64,
    pub total_loss: f64,
    pub final_energy: f64,
}

impl EnergyBreakdown {
    pub fn derive(capacity: f64, sun_hours: f64, result: Option<&AnalysisResult>) -> Self {
        let max_energy = capacity * sun_hours;
        let total_loss = result.map_or(0.0, |r| r.summary.total_daily_loss_kwh);

        // Not clamped: a loss above the theoretical maximum yields a negative value.
        Self {
            max_energy,
            total_loss,
            final_energy: max_energy - total_loss,
        }
    }

    /// Donut slice values, usable energy first.
    pub fn chart_values(&self) -> [f64; 2] {
        [self.final_energy, self.total_loss]
    }

    pub fn summary_lines(&self, result: &AnalysisResult) -> Vec<String> {
        vec![
            format!("Panels: {}", result.summary.total_panels),
            format!("Max: {} kWh", self.max_energy),
            format!("Loss: {} kWh", self.total_loss),
            format!("Final: {} kWh", format_kwh(self.final_energy)),
            format!("Perf: {}%", result.summary.overall_loss_percentage),
        ]
    }
}

pub fn format_kwh(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Summary;

    fn result_with_loss(loss: f64) -> AnalysisResult {
        AnalysisResult {
            summary: Summary {
                total_panels: 4,
                total_daily_loss_kwh: loss,
                overall_loss_percentage: 14.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_max_energy_is_plain_product() {
        for (c, h) in [(5.0, 5.0), (0.1, 0.3), (12.75, 6.5), (1e-3, 7.0), (250.0, 4.2)] {
            let breakdown = EnergyBreakdown::derive(c, h, None);
            assert_eq!(breakdown.max_energy, c * h);
        }
    }

    #[test]
    fn test_default_scenario() {
        let result = result_with_loss(3.5);
        let breakdown = EnergyBreakdown::derive(5.0, 5.0, Some(&result));
        assert_eq!(breakdown.max_energy, 25.0);
        assert_eq!(breakdown.total_loss, 3.5);
        assert_eq!(breakdown.final_energy, 21.5);
        assert_eq!(format_kwh(breakdown.final_energy), "21.50");
    }

    #[test]
    fn test_final_energy_not_clamped() {
        let result = result_with_loss(30.0);
        let breakdown = EnergyBreakdown::derive(2.0, 5.0, Some(&result));
        assert_eq!(breakdown.final_energy, -20.0);
        assert_eq!(format_kwh(breakdown.final_energy), "-20.00");
    }

    #[test]
    fn test_no_result_means_no_loss() {
        let breakdown = EnergyBreakdown::derive(5.0, 5.0, None);
        assert_eq!(breakdown.total_loss, 0.0);
        assert_eq!(breakdown.final_energy, 25.0);
    }

    #[test]
    fn test_summary_lines() {
        let result = result_with_loss(3.5);
        let lines = EnergyBreakdown::derive(5.0, 5.0, Some(&result)).summary_lines(&result);
        assert_eq!(
            lines,
            [
                "Panels: 4",
                "Max: 25 kWh",
                "Loss: 3.5 kWh",
                "Final: 21.50 kWh",
                "Perf: 14%",
            ]
        );
    }
}
