//! Gemini-style `generateContent` implementation of the advisory contract.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::models::SourceLink;

use super::{
    AdvisoryClient, AdvisoryError, AdvisoryReply, AdvisoryRequest, AdvisoryResult, GroundingTool,
    ModelTier,
};

/// HTTP client for the generative advisory REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    fast_model: String,
    reasoning_model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        fast_model: impl Into<String>,
        reasoning_model: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            fast_model: fast_model.into(),
            reasoning_model: reasoning_model.into(),
        }
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast_model,
            ModelTier::Reasoning => &self.reasoning_model,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        )
    }

    /// Assemble the provider request body from the abstract request.
    fn build_body(request: &AdvisoryRequest) -> Value {
        let mut parts = Vec::new();
        if let Some(image) = &request.image {
            // Tolerate full data URLs from the uploader.
            let data = image
                .data
                .split(',')
                .next_back()
                .unwrap_or(image.data.as_str());
            parts.push(json!({
                "inline_data": { "data": data, "mime_type": image.mime_type }
            }));
        }
        parts.push(json!({ "text": request.prompt }));

        let mut body = json!({ "contents": [{ "parts": parts }] });

        let mut config = serde_json::Map::new();
        if let Some(schema) = &request.response_schema {
            config.insert(
                "response_mime_type".to_string(),
                Value::String("application/json".to_string()),
            );
            config.insert("response_schema".to_string(), schema.clone());
        }
        if !config.is_empty() {
            body["generation_config"] = Value::Object(config);
        }

        match request.grounding {
            Some(GroundingTool::Search) => {
                body["tools"] = json!([{ "google_search": {} }]);
            }
            Some(GroundingTool::Maps) => {
                body["tools"] = json!([{ "google_maps": {} }]);
                if let Some((lat, lng)) = request.location_hint {
                    body["tool_config"] = json!({
                        "retrieval_config": { "lat_lng": { "latitude": lat, "longitude": lng } }
                    });
                }
            }
            None => {}
        }

        body
    }

    async fn post(&self, model: &str, body: &Value) -> AdvisoryResult<Value> {
        let response = self
            .http
            .post(self.endpoint(model))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisoryError::Upstream(format!(
                "advisory endpoint returned {}",
                status
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Concatenated text of the first candidate's parts.
fn extract_text(raw: &Value) -> String {
    raw.pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Grounding citations of the first candidate. Both web (search) and maps
/// chunks are flattened into plain source links.
fn extract_sources(raw: &Value) -> Vec<SourceLink> {
    raw.pointer("/candidates/0/groundingMetadata/groundingChunks")
        .and_then(Value::as_array)
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| chunk.get("web").or_else(|| chunk.get("maps")))
                .map(|site| SourceLink {
                    title: site
                        .get("title")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    uri: site
                        .get("uri")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl AdvisoryClient for GeminiClient {
    async fn generate(&self, request: AdvisoryRequest) -> AdvisoryResult<AdvisoryReply> {
        let model = self.model_for(request.tier).to_string();
        let body = Self::build_body(&request);
        debug!(model = %model, grounded = request.grounding.is_some(), "advisory request");

        let raw = self.post(&model, &body).await?;
        Ok(AdvisoryReply {
            text: extract_text(&raw),
            sources: extract_sources(&raw),
        })
    }

    async fn relay(&self, prompt: &str) -> AdvisoryResult<Value> {
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        self.post(&self.fast_model, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::InlineImage;

    #[test]
    fn test_build_body_plain_prompt() {
        let body = GeminiClient::build_body(&AdvisoryRequest::new("hello"));
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert!(body.get("tools").is_none());
        assert!(body.get("generation_config").is_none());
    }

    #[test]
    fn test_build_body_with_schema_sets_json_mime() {
        let request = AdvisoryRequest::new("p").with_schema(json!({"type": "OBJECT"}));
        let body = GeminiClient::build_body(&request);
        assert_eq!(
            body["generation_config"]["response_mime_type"],
            "application/json"
        );
        assert_eq!(body["generation_config"]["response_schema"]["type"], "OBJECT");
    }

    #[test]
    fn test_build_body_strips_data_url_prefix() {
        let request = AdvisoryRequest::new("p").with_image(InlineImage {
            data: "data:image/png;base64,QUJD".to_string(),
            mime_type: "image/png".to_string(),
        });
        let body = GeminiClient::build_body(&request);
        assert_eq!(body["contents"][0]["parts"][0]["inline_data"]["data"], "QUJD");
        // prompt text follows the image part
        assert_eq!(body["contents"][0]["parts"][1]["text"], "p");
    }

    #[test]
    fn test_build_body_maps_grounding_with_hint() {
        let request = AdvisoryRequest::new("p")
            .with_grounding(GroundingTool::Maps)
            .with_location_hint(19.0, 72.8);
        let body = GeminiClient::build_body(&request);
        assert!(body["tools"][0].get("google_maps").is_some());
        assert_eq!(
            body["tool_config"]["retrieval_config"]["lat_lng"]["latitude"],
            19.0
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let raw = json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Hello " }, { "text": "world" }
            ]}}]
        });
        assert_eq!(extract_text(&raw), "Hello world");
    }

    #[test]
    fn test_extract_text_missing_candidates() {
        assert_eq!(extract_text(&json!({})), "");
    }

    #[test]
    fn test_extract_sources_web_and_maps() {
        let raw = json!({
            "candidates": [{ "groundingMetadata": { "groundingChunks": [
                { "web": { "title": "A", "uri": "https://a" } },
                { "maps": { "title": "B", "uri": "https://b" } },
                { "other": {} }
            ]}}]
        });
        let sources = extract_sources(&raw);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "A");
        assert_eq!(sources[1].uri, "https://b");
    }
}
