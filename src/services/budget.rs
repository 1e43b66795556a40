//! Budget prediction request builder and fiscal advisor chat.
//!
//! Combines the full historical dataset with the target scenario into one
//! advisory request and maps the structured reply onto a fully-defaulted
//! [`PredictionResult`]. The mapping never fails on a partially-populated
//! response; transport and parse failures surface as one generic error.

use serde_json::json;
use tracing::info;

use crate::advisory::{decode, AdvisoryClient, AdvisoryError, AdvisoryRequest, ModelTier};
use crate::models::{HistoricalRecord, PredictionResult, ScenarioParameters};

/// Result type for budget operations.
pub type BudgetResult<T> = Result<T, BudgetError>;

#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// No historical records are loaded; checked before any request is issued.
    #[error("No historical dataset loaded; upload or seed records before predicting")]
    EmptyDataset,

    #[error(transparent)]
    Advisory(#[from] AdvisoryError),
}

/// Fixed instruction template for the eight-category forecast.
fn prediction_prompt(
    records: &[HistoricalRecord],
    scenario: &ScenarioParameters,
    language: &str,
) -> Result<String, AdvisoryError> {
    let context = serde_json::to_string(records)?;
    Ok(format!(
        "Task: Act as a high-fidelity Multi-Output Random Forest Regressor & Bayesian Econometrician for the RESQ platform.\n\
Data Context (Audit History): {context}.\n\n\
Objective: Predict 8 discrete budget categories for a NEW scenario. Respond in {language} language.\n\
SCENARIO:\n\
- Event: {event}\n\
- Severity: {severity} (Scale logic: Critical=2.5x, High=1.8x, Med=1.2x, Low=0.8x base)\n\
- Impacted Pop: {population}\n\
- Forecast Duration: {duration} days\n\
- Region: {area}\n\n\
Analysis Protocol:\n\
1. Normalization: Calculate mean cost-per-capita-per-day from history for each category.\n\
2. Feature Engineering: Scale the coefficients based on {severity} and {event} characteristics.\n\
3. Regression: Perform a multi-output forecast for: Food, Water, Shelter, Rescue, Medical, Logistics, Comm, Rehab.\n\
4. Total = Sum of outputs.\n\n\
Return STRICT JSON:\n\
- predictedTotal: (number, integer)\n\
- breakdown: {{ food: number, water: number, shelter: number, rescue: number, medical: number, logistics: number, comm: number, rehab: number }}\n\
- reasoning: (Professional mathematical derivation explanation)\n\
- confidenceScore: (0.0 to 1.0)\n\
- keyFactors: (Array of strings identifying primary cost drivers)\n\
- executiveBriefing: (2-paragraph professional summary for Treasury/Ministry officials)",
        context = context,
        language = language,
        event = scenario.disaster_type,
        severity = scenario.severity,
        population = scenario.population,
        duration = scenario.duration_days,
        area = scenario.area,
    ))
}

fn prediction_schema() -> serde_json::Value {
    let number = json!({ "type": "NUMBER" });
    json!({
        "type": "OBJECT",
        "properties": {
            "predictedTotal": number,
            "breakdown": {
                "type": "OBJECT",
                "properties": {
                    "food": number, "water": number, "shelter": number, "rescue": number,
                    "medical": number, "logistics": number, "comm": number, "rehab": number
                }
            },
            "reasoning": { "type": "STRING" },
            "confidenceScore": number,
            "keyFactors": { "type": "ARRAY", "items": { "type": "STRING" } },
            "executiveBriefing": { "type": "STRING" }
        },
        "required": [
            "predictedTotal", "breakdown", "reasoning",
            "confidenceScore", "keyFactors", "executiveBriefing"
        ]
    })
}

/// Map reply JSON onto a prediction, applying zero/empty defaults for every
/// missing or malformed field.
fn map_prediction(value: &serde_json::Value) -> PredictionResult {
    PredictionResult {
        predicted_total: decode::f64_or(value, "predictedTotal", 0.0),
        breakdown: decode::field_or_default(value, "breakdown"),
        reasoning: decode::str_or(
            value,
            "reasoning",
            "Derivation complete based on historical baseline.",
        ),
        confidence_score: decode::f64_or(value, "confidenceScore", 0.0).clamp(0.0, 1.0),
        key_factors: decode::str_list(value, "keyFactors"),
        executive_briefing: decode::str_or(
            value,
            "executiveBriefing",
            "Forecast generated for strategic review.",
        ),
    }
}

/// Issue one forecast request for the scenario against the loaded dataset.
///
/// Fails with [`BudgetError::EmptyDataset`] before any request when no records
/// are loaded.
pub async fn predict(
    client: &dyn AdvisoryClient,
    records: &[HistoricalRecord],
    scenario: &ScenarioParameters,
    language: &str,
) -> BudgetResult<PredictionResult> {
    if records.is_empty() {
        return Err(BudgetError::EmptyDataset);
    }

    let prompt = prediction_prompt(records, scenario, language)?;
    let request = AdvisoryRequest::new(prompt)
        .with_tier(ModelTier::Reasoning)
        .with_schema(prediction_schema());

    let reply = client.generate(request).await?;
    let value = decode::parse_reply(&reply.text);
    info!(records = records.len(), area = %scenario.area, "budget forecast mapped");

    Ok(map_prediction(&value))
}

/// Fiscal advisor chat over the loaded dataset and the active forecast.
/// Returns static advisory text when the upstream call fails.
pub async fn chat(
    client: &dyn AdvisoryClient,
    message: &str,
    records: &[HistoricalRecord],
    prediction: Option<&PredictionResult>,
    language: &str,
) -> String {
    let history_context = if records.is_empty() {
        "No historical audit data uploaded.".to_string()
    } else {
        format!(
            "Historical Context (Audit History): {}",
            serde_json::to_string(records).unwrap_or_default()
        )
    };
    let prediction_context = match prediction {
        Some(p) => format!(
            "Active Forecast Result: {}",
            serde_json::to_string(p).unwrap_or_default()
        ),
        None => "No forecast active.".to_string(),
    };

    let prompt = format!(
        "You are the \"RESQ Strategic Fiscal Advisor\".\n\
You help government officials understand disaster budget forecasts. Respond in {language} language.\n\n\
CONTEXT:\n{history_context}\n{prediction_context}\n\n\
USER QUERY: \"{message}\"\n\n\
GUIDELINES:\n\
1. Reference specific ₹ values in bold.\n\
2. Use professional, authoritative tone.\n\
3. Be concise and structured.\n\
4. If asked about methodology, explain it's based on Multi-Output Regression of local history.\n\n\
FORMAT: Markdown."
    );

    match client.generate(AdvisoryRequest::new(prompt)).await {
        Ok(reply) if !reply.text.is_empty() => reply.text,
        Ok(_) => "Communication with fiscal node interrupted.".to_string(),
        Err(_) => "Error communicating with the fiscal advisor node.".to_string(),
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod budget_tests;
