//! HTTP server module for the RESQ backend.
//!
//! Axum-based REST API over the service layer, the advisory client boundary,
//! and the node registry. Handlers recover every failure at their own
//! boundary: input errors come back inline as 400, advisory failures collapse
//! into one generic upstream error, unknown lookups are a distinct not-found
//! status, and nothing is fatal to the process.

#[cfg(feature = "http-server")]
pub mod auth;

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
