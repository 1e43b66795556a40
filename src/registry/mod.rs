//! Node registry: the injected key-value store behind the dashboard's
//! per-browser state.
//!
//! The source application kept this in browser local storage under two
//! different key names, which meant lookups could miss records written by the
//! telemetry capture. Here there is exactly one canonical namespace, exposed
//! through the [`NodeRegistry`] trait so backends can be swapped: the default
//! is the in-memory [`LocalRegistry`] (initialized on first run, no expiry,
//! no teardown).

pub mod error;
#[cfg(feature = "local-registry")]
pub mod local;

pub use error::{ErrorContext, RegistryError, RegistryResult};
#[cfg(feature = "local-registry")]
pub use local::LocalRegistry;

use async_trait::async_trait;

use crate::models::{GeoSample, NodeRecord, ReliefRegistration, TrackingStatus};

/// Recognized prefix of relief registration reference codes.
pub const TRACKING_PREFIX: &str = "RN-";

/// Abstract registry contract.
#[async_trait]
pub trait NodeRegistry: Send + Sync {
    /// Record a telemetry sample for a node, creating the node on first sight.
    async fn record_location(
        &self,
        node_id: &str,
        sample: GeoSample,
        user_agent: &str,
    ) -> RegistryResult<NodeRecord>;

    /// Fetch a node by identifier. Unknown ids are a `NotFound` error.
    async fn get_node(&self, node_id: &str) -> RegistryResult<NodeRecord>;

    /// List every known node.
    async fn list_nodes(&self) -> RegistryResult<Vec<NodeRecord>>;

    /// Store a relief registration under its reference code.
    async fn store_registration(&self, registration: ReliefRegistration) -> RegistryResult<()>;

    /// Look up a registration by reference code. Unknown codes are `NotFound`.
    async fn find_registration(&self, code: &str) -> RegistryResult<ReliefRegistration>;

    /// Liveness probe for the health endpoint.
    async fn health_check(&self) -> RegistryResult<bool>;
}

/// Resolve a tracking code to its reported status.
///
/// An unknown code is a reported status, never an error: a stored code
/// reports its record, an unknown code carrying the recognized prefix is
/// acknowledged as received, anything else is NotFound. Storage failures
/// still propagate.
pub async fn resolve_tracking(
    registry: &dyn NodeRegistry,
    code: &str,
) -> RegistryResult<TrackingStatus> {
    match registry.find_registration(code).await {
        Ok(registration) => Ok(TrackingStatus::Received {
            message: format!(
                "Registration {} verified in the relief network registry (submitted {}).",
                registration.reference_code,
                registration.submitted_at.format("%Y-%m-%d")
            ),
        }),
        Err(e) if e.is_not_found() && code.starts_with(TRACKING_PREFIX) => {
            Ok(TrackingStatus::Received {
                message: "Your contribution has been received and logged for verification."
                    .to_string(),
            })
        }
        Err(e) if e.is_not_found() => Ok(TrackingStatus::NotFound {
            message:
                "The provided tracking code does not match our records. Please verify and try again."
                    .to_string(),
        }),
        Err(e) => Err(e),
    }
}
