//! Typed forecast returned by the advisory budget prediction.

use serde::{Deserialize, Serialize};

/// Eight-category split of a total budget figure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetBreakdown {
    pub food: f64,
    pub water: f64,
    pub shelter: f64,
    pub rescue: f64,
    pub medical: f64,
    pub logistics: f64,
    pub comm: f64,
    pub rehab: f64,
}

impl BudgetBreakdown {
    pub fn total(&self) -> f64 {
        self.food
            + self.water
            + self.shelter
            + self.rescue
            + self.medical
            + self.logistics
            + self.comm
            + self.rehab
    }
}

/// Structured budget forecast.
///
/// Every field carries a zero/empty default so a partially-populated advisory
/// response still yields a fully usable value. Owned by the session that
/// requested it and replaced wholesale on each new request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PredictionResult {
    pub predicted_total: f64,
    pub breakdown: BudgetBreakdown,
    pub reasoning: String,
    /// Model self-assessed confidence in [0, 1].
    pub confidence_score: f64,
    pub key_factors: Vec<String>,
    pub executive_briefing: String,
}
