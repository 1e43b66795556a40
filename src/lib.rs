//! # RESQ Rust Backend
//!
//! Disaster-relief coordination backend.
//!
//! This crate provides a Rust-based backend for the RESQ relief dashboard,
//! offering CSV ingestion of historical disaster spending, AI-assisted budget
//! forecasting, situational awareness generation, and a node registry for
//! field telemetry. The backend exposes a REST API via Axum for the React
//! frontend.
//!
//! ## Features
//!
//! - **Data Ingestion**: Tolerant CSV parsing of historical audit records
//! - **Budget Forecasting**: Structured predictions through the advisory boundary
//! - **Situational Awareness**: Alerts, risk zones, location intel, incident analysis
//! - **Relief Registrations**: Volunteer/donation intake with trackable reference codes
//! - **Node Registry**: Telemetry capture behind a swappable storage trait
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types shared across the stack
//! - [`ingest`]: CSV dataset parsing and the demonstration dataset
//! - [`advisory`]: Typed boundary to the generative advisory service
//! - [`services`]: High-level business logic over the advisory boundary
//! - [`registry`]: Node and registration storage behind a repository trait
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod advisory;
pub mod config;
pub mod ingest;
pub mod models;
pub mod registry;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
