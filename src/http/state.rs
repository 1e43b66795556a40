//! Application state for the HTTP server.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::advisory::AdvisoryClient;
use crate::models::{HistoricalRecord, PredictionResult};
use crate::registry::NodeRegistry;
use crate::services::UploadTracker;

use super::auth::AdminGuard;

/// Shared application state passed to all handlers.
///
/// The dataset and active prediction are session-scoped values replaced
/// wholesale: uploading installs a new dataset, a new forecast replaces the
/// previous one, and reset clears both.
#[derive(Clone)]
pub struct AppState {
    pub advisory: Arc<dyn AdvisoryClient>,
    pub registry: Arc<dyn NodeRegistry>,
    pub upload_tracker: UploadTracker,
    pub dataset: Arc<RwLock<Vec<HistoricalRecord>>>,
    pub active_prediction: Arc<RwLock<Option<PredictionResult>>>,
    pub admin_guard: AdminGuard,
}

impl AppState {
    pub fn new(
        advisory: Arc<dyn AdvisoryClient>,
        registry: Arc<dyn NodeRegistry>,
        admin_guard: AdminGuard,
    ) -> Self {
        Self {
            advisory,
            registry,
            upload_tracker: UploadTracker::new(),
            dataset: Arc::new(RwLock::new(Vec::new())),
            active_prediction: Arc::new(RwLock::new(None)),
            admin_guard,
        }
    }
}
