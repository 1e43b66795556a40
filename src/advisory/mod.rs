//! Typed boundary to the external generative advisory service.
//!
//! Every "intelligent" feature of the dashboard (budget forecasting, risk
//! zones, location intelligence, incident analysis, place search, alerts,
//! chat) is one logical call: submit an instruction with an optional response
//! schema, image payload, or geolocation hint, and receive text that is either
//! JSON matching the schema or a plain answer. The service layer depends only
//! on the [`AdvisoryClient`] trait, never on a vendor wire format.
//!
//! Replies are decoded with a uniform "parse or fall back to a safe default"
//! discipline via the [`decode`] helpers, so a partially-populated response
//! can never panic a call site.

pub mod decode;
mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::SourceLink;

/// Result type for advisory calls.
pub type AdvisoryResult<T> = Result<T, AdvisoryError>;

/// Errors surfaced by the advisory boundary.
///
/// Callers do not distinguish network failure from a malformed response; both
/// collapse into `Upstream` and are reported generically.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("Advisory service request failed: {0}")]
    Upstream(String),

    #[error("Failed to encode advisory request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AdvisoryError {
    fn from(err: reqwest::Error) -> Self {
        AdvisoryError::Upstream(err.to_string())
    }
}

/// Which model tier to route the request to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelTier {
    /// Low-latency tier for lookups, alerts, and chat.
    #[default]
    Fast,
    /// Reasoning tier for the budget forecast.
    Reasoning,
}

/// Grounding tool the advisory may consult while answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundingTool {
    Search,
    Maps,
}

/// Inline image payload attached to an incident analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    /// Base64 image data. A leading `data:` URL prefix is tolerated and
    /// stripped before transmission.
    pub data: String,
    pub mime_type: String,
}

/// One outbound advisory request.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryRequest {
    pub prompt: String,
    pub tier: ModelTier,
    /// JSON schema the reply text must conform to, when structured output is
    /// expected.
    pub response_schema: Option<Value>,
    pub image: Option<InlineImage>,
    pub grounding: Option<GroundingTool>,
    /// Geolocation hint for maps-grounded retrieval.
    pub location_hint: Option<(f64, f64)>,
}

impl AdvisoryRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_tier(mut self, tier: ModelTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_grounding(mut self, tool: GroundingTool) -> Self {
        self.grounding = Some(tool);
        self
    }

    pub fn with_location_hint(mut self, lat: f64, lng: f64) -> Self {
        self.location_hint = Some((lat, lng));
        self
    }
}

/// Reply from the advisory service: generated text plus any grounding
/// citations attached to it.
#[derive(Debug, Clone, Default)]
pub struct AdvisoryReply {
    pub text: String,
    pub sources: Vec<SourceLink>,
}

/// Abstract advisory service contract.
///
/// Implementations issue exactly one outbound request per invocation: no
/// retry, no caching, no deduplication.
#[async_trait]
pub trait AdvisoryClient: Send + Sync {
    /// Submit one request and return the generated reply.
    async fn generate(&self, request: AdvisoryRequest) -> AdvisoryResult<AdvisoryReply>;

    /// Pass-through used by the relay endpoint: forward a bare prompt and
    /// return the provider's raw response body.
    async fn relay(&self, prompt: &str) -> AdvisoryResult<Value>;
}
