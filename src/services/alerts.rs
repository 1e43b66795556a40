//! Generated disaster-management news alerts.

use chrono::Utc;
use serde_json::json;
use tracing::warn;

use crate::advisory::{decode, AdvisoryClient, AdvisoryRequest};
use crate::models::{AlertCategory, NewsUpdate};

fn alert_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "timestamp": { "type": "STRING" },
                "category": { "type": "STRING" },
                "content": { "type": "STRING" }
            },
            "required": ["id", "title", "timestamp", "category", "content"]
        }
    })
}

/// Generate three categorized news updates for a location. Failure or an
/// unparseable reply yields an empty list, never an error.
pub async fn generate(
    client: &dyn AdvisoryClient,
    location: &str,
    language: &str,
) -> Vec<NewsUpdate> {
    let prompt = format!(
        "Generate 3 realistic disaster management news updates for {location}. \
Include one URGENT, one UPDATE, and one ADVISORY. Return as a JSON array of objects \
with fields: id, title, timestamp, category (URGENT, UPDATE, or ADVISORY), and content. \
Respond in {language} language."
    );
    let request = AdvisoryRequest::new(prompt).with_schema(alert_schema());

    let reply = match client.generate(request).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "alert generation failed");
            return Vec::new();
        }
    };

    let value = decode::parse_reply(&reply.text);
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Transform a brief operator message into a professional alert. On failure
/// the brief is dispatched verbatim as a locally assembled URGENT update.
pub async fn broadcast(client: &dyn AdvisoryClient, brief: &str, language: &str) -> NewsUpdate {
    let prompt = format!(
        "Transform this brief emergency message into a professional disaster alert: \
\"{brief}\". Return as JSON with fields: id, title, timestamp, \
category (URGENT, UPDATE, or ADVISORY), and content. Respond in {language} language."
    );
    let request = AdvisoryRequest::new(prompt);

    match client.generate(request).await {
        Ok(reply) => {
            let value = decode::parse_reply(&reply.text);
            if value.is_object() {
                NewsUpdate {
                    id: decode::str_or(&value, "id", &manual_dispatch_id()),
                    title: decode::str_or(&value, "title", "Manual Dispatch"),
                    timestamp: decode::str_or(&value, "timestamp", &now_timestamp()),
                    category: decode::field_or_default(&value, "category"),
                    content: decode::str_or(&value, "content", brief),
                }
            } else {
                manual_dispatch(brief)
            }
        }
        Err(e) => {
            warn!(error = %e, "alert broadcast failed, dispatching manually");
            manual_dispatch(brief)
        }
    }
}

fn manual_dispatch_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

fn now_timestamp() -> String {
    Utc::now().format("%H:%M:%S").to_string()
}

fn manual_dispatch(brief: &str) -> NewsUpdate {
    NewsUpdate {
        id: manual_dispatch_id(),
        title: "Manual Dispatch".to_string(),
        timestamp: now_timestamp(),
        category: AlertCategory::Urgent,
        content: brief.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{AdvisoryError, AdvisoryReply, AdvisoryResult};
    use async_trait::async_trait;

    struct Canned(Result<String, ()>);

    #[async_trait]
    impl AdvisoryClient for Canned {
        async fn generate(&self, _request: AdvisoryRequest) -> AdvisoryResult<AdvisoryReply> {
            match &self.0 {
                Ok(text) => Ok(AdvisoryReply {
                    text: text.clone(),
                    sources: vec![],
                }),
                Err(()) => Err(AdvisoryError::Upstream("down".to_string())),
            }
        }

        async fn relay(&self, _prompt: &str) -> AdvisoryResult<serde_json::Value> {
            Err(AdvisoryError::Upstream("unused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_generate_parses_array_reply() {
        let client = Canned(Ok(r#"[
            {"id":"1","title":"T","timestamp":"10:00","category":"URGENT","content":"c"}
        ]"#
        .to_string()));
        let updates = generate(&client, "Odisha", "en").await;
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].category, AlertCategory::Urgent);
    }

    #[tokio::test]
    async fn test_generate_returns_empty_on_failure() {
        let client = Canned(Err(()));
        assert!(generate(&client, "Odisha", "en").await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_returns_empty_on_garbage() {
        let client = Canned(Ok("no json".to_string()));
        assert!(generate(&client, "Odisha", "en").await.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_falls_back_to_manual_dispatch() {
        let client = Canned(Err(()));
        let update = broadcast(&client, "bridge down", "en").await;
        assert_eq!(update.title, "Manual Dispatch");
        assert_eq!(update.category, AlertCategory::Urgent);
        assert_eq!(update.content, "bridge down");
    }

    #[tokio::test]
    async fn test_broadcast_uses_reply_fields_with_defaults() {
        let client = Canned(Ok(r#"{"title":"Flood Alert","category":"ADVISORY"}"#.to_string()));
        let update = broadcast(&client, "water rising", "en").await;
        assert_eq!(update.title, "Flood Alert");
        assert_eq!(update.category, AlertCategory::Advisory);
        // missing content falls back to the original brief
        assert_eq!(update.content, "water rising");
    }
}
