//! HTTP handlers for the REST API.
//!
//! Each handler parses its request, delegates to the service layer, and maps
//! failures at its own boundary per the error taxonomy: 400 for input errors,
//! a generic upstream error for advisory failures, 404 for unknown lookups.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use rand::Rng;
use std::convert::Infallible;
use std::time::Duration;
use tracing::info;

use crate::advisory::AdvisoryError;
use crate::ingest;
use crate::models::{
    GeoSample, GroundedAnswer, IncidentAnalysis, LocationDetails, NewsUpdate, PredictionResult,
    ReliefRegistration, TrackingStatus, ZoneMap,
};
use crate::registry::{self, TRACKING_PREFIX};
use crate::services::{alerts, budget, donations, incident, location, places, upload_tracker, zones};

use super::dto::{
    AlertBroadcastRequest, AlertGenerateRequest, ChatRequest, ChatResponse, DatasetSummary,
    DonationImpactRequest, DonationImpactResponse, EmergencyFacilityRequest, GenerateRequest,
    HealthResponse, IncidentRequest, JobStatusResponse, LocationQuery, NodeListResponse,
    PlaceSearchRequest, PredictRequest, RegistrationRequest, RegistrationResponse,
    TelemetryRequest, UploadDatasetRequest, UploadDatasetResponse, ZoneRequest,
};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let registry_status = match state.registry.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        registry: registry_status,
    }))
}

// =============================================================================
// Relay
// =============================================================================

/// POST /api/generate
///
/// Pass-through route: forward the bare prompt to the advisory text endpoint
/// and return the raw response body. Failures become a generic 500 with no
/// detail, matching the relay contract.
pub async fn relay_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> HandlerResult<serde_json::Value> {
    let raw = state
        .advisory
        .relay(&request.prompt)
        .await
        .map_err(|_: AdvisoryError| AppError::Internal("Server error".to_string()))?;
    Ok(Json(raw))
}

// =============================================================================
// Dataset lifecycle
// =============================================================================

/// POST /v1/datasets
///
/// Start the staged ingestion of an uploaded CSV. Returns 202 with a job ID;
/// the parsed records become the session dataset once the job reaches Ready.
pub async fn upload_dataset(
    State(state): State<AppState>,
    Json(request): Json<UploadDatasetRequest>,
) -> Result<(axum::http::StatusCode, Json<UploadDatasetResponse>), AppError> {
    let job_id = state.upload_tracker.create_job();
    let response_job_id = job_id.clone();

    let tracker = state.upload_tracker.clone();
    let dataset = state.dataset.clone();
    tokio::spawn(async move {
        if let Ok(records) = upload_tracker::run_upload(tracker, job_id, request.csv).await {
            *dataset.write() = records;
        }
    });

    Ok((
        axum::http::StatusCode::ACCEPTED,
        Json(UploadDatasetResponse {
            job_id: response_job_id.clone(),
            message: format!(
                "Dataset upload started. Track progress at /v1/jobs/{}/logs",
                response_job_id
            ),
        }),
    ))
}

/// POST /v1/datasets/demo
///
/// Install the two-row demonstration dataset.
pub async fn seed_demo_dataset(State(state): State<AppState>) -> HandlerResult<DatasetSummary> {
    let records = ingest::demo_dataset();
    let summary = DatasetSummary {
        records: records.len(),
        historical_average: ingest::historical_average(&records),
    };
    *state.dataset.write() = records;
    info!("demonstration dataset installed");
    Ok(Json(summary))
}

/// GET /v1/datasets
pub async fn dataset_summary(State(state): State<AppState>) -> HandlerResult<DatasetSummary> {
    let dataset = state.dataset.read();
    Ok(Json(DatasetSummary {
        records: dataset.len(),
        historical_average: ingest::historical_average(&dataset),
    }))
}

/// DELETE /v1/datasets
///
/// Reset the session: drop the dataset and the active prediction.
pub async fn reset_dataset(State(state): State<AppState>) -> HandlerResult<DatasetSummary> {
    state.dataset.write().clear();
    *state.active_prediction.write() = None;
    Ok(Json(DatasetSummary {
        records: 0,
        historical_average: 0.0,
    }))
}

// =============================================================================
// Upload job status
// =============================================================================

/// GET /v1/jobs/{job_id}
pub async fn get_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> HandlerResult<JobStatusResponse> {
    let job = state
        .upload_tracker
        .get_job(&job_id)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;

    Ok(Json(JobStatusResponse {
        job_id: job.job_id,
        stage: job.stage,
        progress: job.progress,
        log: job.log,
        record_count: job.record_count,
        error: job.error,
    }))
}

/// GET /v1/jobs/{job_id}/logs
///
/// Stream upload progress via Server-Sent Events.
pub async fn stream_job_log(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if state.upload_tracker.get_job(&job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {} not found", job_id)));
    }

    let tracker = state.upload_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_entry_count = 0;
        loop {
            let log = tracker.get_log(&job_id);
            for entry in log.iter().skip(last_entry_count) {
                let event_data = serde_json::to_string(entry).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_entry_count = log.len();

            if let Some(job) = tracker.get_job(&job_id) {
                if job.is_terminal() {
                    let final_event = serde_json::json!({
                        "stage": job.stage,
                        "progress": job.progress,
                        "recordCount": job.record_count,
                        "error": job.error,
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}

// =============================================================================
// Budget forecasting
// =============================================================================

/// POST /v1/predictions
///
/// Run one forecast for the scenario against the loaded dataset. The result
/// replaces the session's active prediction wholesale.
pub async fn predict_budget(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> HandlerResult<PredictionResult> {
    let records = state.dataset.read().clone();

    let prediction = budget::predict(
        state.advisory.as_ref(),
        &records,
        &request.scenario,
        &request.language,
    )
    .await?;

    *state.active_prediction.write() = Some(prediction.clone());
    Ok(Json(prediction))
}

/// POST /v1/chat
pub async fn budget_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> HandlerResult<ChatResponse> {
    let records = state.dataset.read().clone();
    let prediction = state.active_prediction.read().clone();

    let reply = budget::chat(
        state.advisory.as_ref(),
        &request.message,
        &records,
        prediction.as_ref(),
        &request.language,
    )
    .await;

    Ok(Json(ChatResponse { reply }))
}

// =============================================================================
// Situational awareness
// =============================================================================

/// POST /v1/alerts/generate
pub async fn generate_alerts(
    State(state): State<AppState>,
    Json(request): Json<AlertGenerateRequest>,
) -> HandlerResult<Vec<NewsUpdate>> {
    let updates =
        alerts::generate(state.advisory.as_ref(), &request.location, &request.language).await;
    Ok(Json(updates))
}

/// POST /v1/alerts/broadcast
pub async fn broadcast_alert(
    State(state): State<AppState>,
    Json(request): Json<AlertBroadcastRequest>,
) -> HandlerResult<NewsUpdate> {
    let update =
        alerts::broadcast(state.advisory.as_ref(), &request.brief, &request.language).await;
    Ok(Json(update))
}

/// POST /v1/zones
pub async fn generate_zones(
    State(state): State<AppState>,
    Json(request): Json<ZoneRequest>,
) -> HandlerResult<ZoneMap> {
    let map = zones::generate(state.advisory.as_ref(), &request.location, &request.language).await;
    Ok(Json(map))
}

/// GET /v1/locations/{place}
pub async fn lookup_location(
    State(state): State<AppState>,
    Path(place): Path<String>,
    Query(query): Query<LocationQuery>,
) -> HandlerResult<LocationDetails> {
    let details = location::lookup(state.advisory.as_ref(), &place, &query.language).await?;
    Ok(Json(details))
}

/// POST /v1/incidents
pub async fn analyze_incident(
    State(state): State<AppState>,
    Json(request): Json<IncidentRequest>,
) -> HandlerResult<IncidentAnalysis> {
    if request.image_base64.is_empty() {
        return Err(AppError::BadRequest("Image payload is required".to_string()));
    }
    let analysis = incident::analyze(
        state.advisory.as_ref(),
        &request.image_base64,
        &request.mime_type,
        &request.language,
    )
    .await?;
    Ok(Json(analysis))
}

/// POST /v1/places/search
pub async fn search_places(
    State(state): State<AppState>,
    Json(request): Json<PlaceSearchRequest>,
) -> HandlerResult<GroundedAnswer> {
    let answer = places::search(
        state.advisory.as_ref(),
        &request.query,
        request.lat,
        request.lng,
        &request.language,
    )
    .await;
    Ok(Json(answer))
}

/// POST /v1/places/emergency
pub async fn find_emergency_facilities(
    State(state): State<AppState>,
    Json(request): Json<EmergencyFacilityRequest>,
) -> HandlerResult<GroundedAnswer> {
    let answer = places::emergency(
        state.advisory.as_ref(),
        &request.location,
        &request.facility,
        &request.language,
    )
    .await;
    Ok(Json(answer))
}

/// POST /v1/donations/impact
pub async fn donation_impact(
    State(state): State<AppState>,
    Json(request): Json<DonationImpactRequest>,
) -> HandlerResult<DonationImpactResponse> {
    let impact = donations::impact(
        state.advisory.as_ref(),
        &request.amount,
        &request.category,
        &request.language,
    )
    .await;
    Ok(Json(DonationImpactResponse { impact }))
}

// =============================================================================
// Registrations and tracking
// =============================================================================

/// POST /v1/registrations
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> HandlerResult<RegistrationResponse> {
    if request.name.trim().is_empty() || request.contact.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and contact are required".to_string(),
        ));
    }

    let reference_code = format!(
        "{}{}",
        TRACKING_PREFIX,
        rand::thread_rng().gen_range(1000..10000)
    );
    let registration = ReliefRegistration {
        reference_code: reference_code.clone(),
        kind: request.kind,
        name: request.name,
        contact: request.contact,
        details: request.details,
        submitted_at: chrono::Utc::now(),
    };
    state.registry.store_registration(registration).await?;
    info!(code = %reference_code, "relief registration stored");

    Ok(Json(RegistrationResponse {
        reference_code,
        message: "Registration received. Keep the reference code for tracking.".to_string(),
    }))
}

/// GET /v1/tracking/{code}
///
/// Always resolves to a status, never a hard failure: a stored code reports
/// its record, an unknown code with the recognized prefix is acknowledged as
/// received, anything else is NotFound.
pub async fn track_registration(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<TrackingStatus> {
    let status = registry::resolve_tracking(state.registry.as_ref(), &code).await?;
    Ok(Json(status))
}

// =============================================================================
// Node telemetry and admin listing
// =============================================================================

/// PUT /v1/nodes/{node_id}/location
pub async fn record_telemetry(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
    Json(request): Json<TelemetryRequest>,
) -> HandlerResult<crate::models::NodeRecord> {
    let sample = GeoSample {
        lat: request.lat,
        lng: request.lng,
        accuracy: request.accuracy,
    };
    let record = state
        .registry
        .record_location(&node_id, sample, &request.user_agent)
        .await?;
    Ok(Json(record))
}

/// GET /v1/nodes/{node_id}
pub async fn get_node(
    State(state): State<AppState>,
    Path(node_id): Path<String>,
) -> HandlerResult<crate::models::NodeRecord> {
    let record = state.registry.get_node(&node_id).await?;
    Ok(Json(record))
}

/// GET /v1/nodes
///
/// Admin-only listing, gated by the `X-Admin-Key` header.
pub async fn list_nodes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<NodeListResponse> {
    let presented = headers
        .get("x-admin-key")
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;
    if !state.admin_guard.verify(presented) {
        return Err(AppError::Unauthorized);
    }

    let nodes = state.registry.list_nodes().await?;
    let total = nodes.len();
    Ok(Json(NodeListResponse { nodes, total }))
}
