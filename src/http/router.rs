//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Dataset lifecycle
        .route("/datasets", post(handlers::upload_dataset))
        .route("/datasets", get(handlers::dataset_summary))
        .route("/datasets", delete(handlers::reset_dataset))
        .route("/datasets/demo", post(handlers::seed_demo_dataset))
        // Upload job tracking
        .route("/jobs/{job_id}", get(handlers::get_job_status))
        .route("/jobs/{job_id}/logs", get(handlers::stream_job_log))
        // Budget forecasting
        .route("/predictions", post(handlers::predict_budget))
        .route("/chat", post(handlers::budget_chat))
        // Situational awareness
        .route("/alerts/generate", post(handlers::generate_alerts))
        .route("/alerts/broadcast", post(handlers::broadcast_alert))
        .route("/zones", post(handlers::generate_zones))
        .route("/locations/{place}", get(handlers::lookup_location))
        .route("/incidents", post(handlers::analyze_incident))
        .route("/places/search", post(handlers::search_places))
        .route("/places/emergency", post(handlers::find_emergency_facilities))
        .route("/donations/impact", post(handlers::donation_impact))
        // Registrations and tracking
        .route("/registrations", post(handlers::submit_registration))
        .route("/tracking/{code}", get(handlers::track_registration))
        // Node telemetry and admin listing
        .route("/nodes", get(handlers::list_nodes))
        .route("/nodes/{node_id}", get(handlers::get_node))
        .route("/nodes/{node_id}/location", put(handlers::record_telemetry));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/generate", post(handlers::relay_generate))
        .nest("/v1", api_v1)
        // Allow large CSV and image payloads during uploads.
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
