//! Domain model types shared across ingestion, services, and the HTTP layer.
//!
//! Wire-facing structs serialize in camelCase to match the dashboard frontend.

mod disaster;
mod prediction;
mod registry;
mod situational;

pub use disaster::{HistoricalRecord, ScenarioParameters, Severity};
pub use prediction::{BudgetBreakdown, PredictionResult};
pub use registry::{GeoSample, NodeRecord, RegistrationKind, ReliefRegistration, TrackingStatus};
pub use situational::{
    AlertCategory, GroundedAnswer, IncidentAnalysis, LocationDetails, NewsUpdate, RiskZone,
    SourceLink, WeatherReport, ZoneKind, ZoneMap, INDIA_CENTROID,
};
