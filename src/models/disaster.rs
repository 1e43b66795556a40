//! Historical disaster records and forecast scenario parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical severity levels for a disaster event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Normalize a free-text severity into one of the four canonical levels.
    ///
    /// Matching is case-insensitive substring containment, checked from the
    /// most severe level down. Unrecognized input maps to `Low`, so the
    /// function is total and idempotent on canonical names.
    pub fn normalize(raw: &str) -> Self {
        let s = raw.trim().to_lowercase();
        if s.contains("crit") {
            Severity::Critical
        } else if s.contains("high") {
            Severity::High
        } else if s.contains("med") {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of past-disaster spending data.
///
/// Produced by CSV ingestion or the demonstration seed; lives only in session
/// memory and is replaced wholesale when a new dataset is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRecord {
    pub disaster_type: String,
    pub severity: Severity,
    pub duration_days: f64,
    pub year: f64,
    pub area: String,
    pub population_impacted: f64,
    pub food_budget: f64,
    pub water_budget: f64,
    pub shelter_budget: f64,
    pub rescue_budget: f64,
    pub medical_budget: f64,
    pub logistics_budget: f64,
    pub comm_budget: f64,
    pub rehab_budget: f64,
    pub total_budget: f64,
}

/// The hypothetical event to forecast. Plain form payload, no persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParameters {
    pub disaster_type: String,
    pub severity: Severity,
    pub population: u64,
    pub duration_days: i64,
    pub area: String,
}
