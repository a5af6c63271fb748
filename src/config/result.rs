// src/config/result.rs
use serde::{Serialize, Deserialize, Deserializer};
use serde::de::{self, Visitor};
use serde_json::Value;
use std::fmt;

// Every field defaults so a partial response still renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisResult {
    pub download_url: String,
    pub summary: Summary,
    pub panel_analysis: Vec<PanelResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Summary {
    #[serde(deserialize_with = "whole_number")]
    pub total_panels: u32,
    pub total_daily_loss_kwh: f64,
    pub overall_loss_percentage: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PanelResult {
    #[serde(deserialize_with = "whole_number")]
    pub panel_number: u32,
    pub panel_loss_kwh: f64,
    pub faults_left: Vec<Fault>,
    pub faults_right: Vec<Fault>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Fault {
    pub fault: String,
    pub confidence: f64,
    pub affected_area: f64,
    pub loss_percentage: f64,
    pub daily_loss: f64,
}

impl Fault {
    /// Confidence as a percentage with one decimal, e.g. `92.3%`.
    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

impl AnalysisResult {
    /// Parses a backend response body. A field sent as `null` counts as missing.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let mut value: Value = serde_json::from_str(body)?;
        strip_nulls(&mut value);
        serde_json::from_value(value)
    }

    pub fn has_download(&self) -> bool {
        !self.download_url.is_empty()
    }
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

// Counts arrive as `2` or `2.0` depending on the backend.
fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl<'de> Visitor<'de> for WholeNumber {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            Ok(u32::try_from(v).unwrap_or(u32::MAX))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            Ok(u32::try_from(v.max(0)).unwrap_or(u32::MAX))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            if v.is_finite() && v > 0.0 {
                Ok(v.round() as u32)
            } else {
                Ok(0)
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}
