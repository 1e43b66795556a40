//! Service layer: one module per advisory operation.
//!
//! Each operation follows the same shape: build one prompt from a fixed
//! template, issue exactly one advisory request, and map the reply onto a
//! fully-defaulted domain struct. Failures are recovered here or surfaced as a
//! single generic upstream error; nothing retries and nothing caches.

pub mod alerts;
pub mod budget;
pub mod donations;
pub mod incident;
pub mod location;
pub mod places;
pub mod upload_tracker;
pub mod zones;

pub use upload_tracker::{UploadJob, UploadStage, UploadTracker};
