//! Staged tracking for dataset uploads.
//!
//! The dashboard shows a "sanitizing" phase and a stepped "training" progress
//! bar while a CSV is ingested. Neither is real computation: the parse is
//! synchronous and the phases exist for perceived progress only. This tracker
//! makes that pacing explicit: an upload job walks
//! Sanitizing → Training(0..100) → Ready | Error with fixed-interval steps,
//! and its progress log is observable via the job endpoints and SSE stream.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::ingest::{self, IngestError};
use crate::models::HistoricalRecord;

/// Synthetic pause before parsing, standing in for the "sanitizing" phase.
pub const SANITIZE_DELAY: Duration = Duration::from_millis(500);
/// Size of each synthetic training-progress step, in percent.
pub const TRAINING_STEP: u8 = 10;
/// Pause between training-progress steps.
pub const TRAINING_TICK: Duration = Duration::from_millis(100);

/// Stage of an upload job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStage {
    Sanitizing,
    Training,
    Ready,
    Error,
}

/// A single progress entry with timestamp and message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProgressEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub stage: UploadStage,
    pub message: String,
}

/// Upload job state and progress log.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadJob {
    pub job_id: String,
    pub stage: UploadStage,
    /// Training progress in percent; meaningful during `Training`, 100 at `Ready`.
    pub progress: u8,
    pub log: Vec<ProgressEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Record count once the dataset is ready.
    pub record_count: Option<usize>,
    pub error: Option<String>,
}

impl UploadJob {
    pub fn is_terminal(&self) -> bool {
        matches!(self.stage, UploadStage::Ready | UploadStage::Error)
    }
}

/// In-memory tracker for upload jobs.
#[derive(Clone)]
pub struct UploadTracker {
    jobs: Arc<RwLock<HashMap<String, UploadJob>>>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new job in the sanitizing stage and return its ID.
    pub fn create_job(&self) -> String {
        let job_id = Uuid::new_v4().to_string();
        let now = chrono::Utc::now();
        let job = UploadJob {
            job_id: job_id.clone(),
            stage: UploadStage::Sanitizing,
            progress: 0,
            log: vec![ProgressEntry {
                timestamp: now,
                stage: UploadStage::Sanitizing,
                message: "Sanitizing uploaded dataset".to_string(),
            }],
            created_at: now,
            completed_at: None,
            record_count: None,
            error: None,
        };
        self.jobs.write().insert(job_id.clone(), job);
        job_id
    }

    fn update<F: FnOnce(&mut UploadJob)>(&self, job_id: &str, apply: F) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(job_id) {
            apply(job);
        }
    }

    /// Advance the job into the training stage.
    pub fn begin_training(&self, job_id: &str) {
        self.update(job_id, |job| {
            job.stage = UploadStage::Training;
            job.progress = 0;
            job.log.push(ProgressEntry {
                timestamp: chrono::Utc::now(),
                stage: UploadStage::Training,
                message: "Calibrating prediction baseline".to_string(),
            });
        });
    }

    /// Bump training progress by one fixed step.
    pub fn step_training(&self, job_id: &str) {
        self.update(job_id, |job| {
            job.progress = job.progress.saturating_add(TRAINING_STEP).min(100);
        });
    }

    /// Mark the job ready with the parsed record count.
    pub fn complete(&self, job_id: &str, record_count: usize) {
        self.update(job_id, |job| {
            job.stage = UploadStage::Ready;
            job.progress = 100;
            job.completed_at = Some(chrono::Utc::now());
            job.record_count = Some(record_count);
            job.log.push(ProgressEntry {
                timestamp: chrono::Utc::now(),
                stage: UploadStage::Ready,
                message: format!("{record_count} records ingested"),
            });
        });
    }

    /// Mark the job failed.
    pub fn fail(&self, job_id: &str, message: impl Into<String>) {
        let message = message.into();
        self.update(job_id, |job| {
            job.stage = UploadStage::Error;
            job.completed_at = Some(chrono::Utc::now());
            job.error = Some(message.clone());
            job.log.push(ProgressEntry {
                timestamp: chrono::Utc::now(),
                stage: UploadStage::Error,
                message,
            });
        });
    }

    pub fn get_job(&self, job_id: &str) -> Option<UploadJob> {
        self.jobs.read().get(job_id).cloned()
    }

    pub fn get_log(&self, job_id: &str) -> Vec<ProgressEntry> {
        self.jobs
            .read()
            .get(job_id)
            .map(|job| job.log.clone())
            .unwrap_or_default()
    }
}

impl Default for UploadTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the staged ingestion of raw CSV text.
///
/// The parse itself is synchronous; the sanitize delay and training ticks are
/// deliberate simulated latency. Returns the parsed records so the caller can
/// install them as the session dataset.
pub async fn run_upload(
    tracker: UploadTracker,
    job_id: String,
    raw_csv: String,
) -> Result<Vec<HistoricalRecord>, IngestError> {
    tokio::time::sleep(SANITIZE_DELAY).await;

    let records = match ingest::parse_dataset(&raw_csv) {
        Ok(records) => records,
        Err(e) => {
            tracker.fail(&job_id, e.to_string());
            return Err(e);
        }
    };

    tracker.begin_training(&job_id);
    let mut progress = 0u8;
    while progress < 100 {
        tokio::time::sleep(TRAINING_TICK).await;
        tracker.step_training(&job_id);
        progress = progress.saturating_add(TRAINING_STEP);
    }

    tracker.complete(&job_id, records.len());
    Ok(records)
}
