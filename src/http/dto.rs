//! Data Transfer Objects for the HTTP API.
//!
//! Request/response bodies serialize in camelCase to match the dashboard
//! frontend. Domain types that already derive Serialize/Deserialize
//! (prediction, zones, alerts, location details) travel as-is.

use serde::{Deserialize, Serialize};

use crate::models::{NodeRecord, RegistrationKind, ScenarioParameters};
use crate::services::upload_tracker::{ProgressEntry, UploadStage};

fn default_language() -> String {
    "en".to_string()
}

/// Body for the relay pass-through endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Request body for uploading a CSV dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDatasetRequest {
    /// Raw text content of the uploaded file.
    pub csv: String,
}

/// Response for dataset upload: the staged job to watch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDatasetResponse {
    pub job_id: String,
    pub message: String,
}

/// Upload job status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub job_id: String,
    pub stage: UploadStage,
    pub progress: u8,
    pub log: Vec<ProgressEntry>,
    pub record_count: Option<usize>,
    pub error: Option<String>,
}

/// Summary of the loaded session dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub records: usize,
    pub historical_average: f64,
}

/// Request body for the budget forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub scenario: ScenarioParameters,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertGenerateRequest {
    pub location: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertBroadcastRequest {
    pub brief: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneRequest {
    pub location: String,
    #[serde(default = "default_language")]
    pub language: String,
}

/// Query string for the location lookup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationQuery {
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRequest {
    pub image_base64: String,
    pub mime_type: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSearchRequest {
    pub query: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyFacilityRequest {
    pub location: String,
    pub facility: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationImpactRequest {
    pub amount: String,
    pub category: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationImpactResponse {
    pub impact: String,
}

/// Volunteer/donation registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub kind: RegistrationKind,
    pub name: String,
    pub contact: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub reference_code: String,
    pub message: String,
}

/// Telemetry sample pushed by a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRequest {
    pub lat: f64,
    pub lng: f64,
    pub accuracy: f64,
    #[serde(default)]
    pub user_agent: String,
}

/// Admin node listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeListResponse {
    pub nodes: Vec<NodeRecord>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub registry: String,
}
