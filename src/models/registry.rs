//! Records persisted in the node registry: telemetry samples and relief
//! registrations with their tracking status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single best-effort geolocation sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoSample {
    pub lat: f64,
    pub lng: f64,
    pub accuracy: f64,
}

/// Per-browser pseudo-user record keyed by its generated node identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub last_location: Option<GeoSample>,
    pub last_seen: DateTime<Utc>,
    pub user_agent: String,
}

/// Contribution category of a relief registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationKind {
    Volunteer,
    Donation,
}

/// A volunteer or donation submission, identified by its `RN-` reference code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliefRegistration {
    pub reference_code: String,
    pub kind: RegistrationKind,
    pub name: String,
    pub contact: String,
    pub details: String,
    pub submitted_at: DateTime<Utc>,
}

/// Outcome of a tracking-code lookup. `NotFound` is a reported status, not an
/// error condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum TrackingStatus {
    Received { message: String },
    NotFound { message: String },
}
