//! Image-based incident severity analysis.

use serde_json::json;

use crate::advisory::{
    decode, AdvisoryClient, AdvisoryRequest, AdvisoryResult, InlineImage,
};
use crate::models::IncidentAnalysis;

fn incident_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "severity": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "safetySteps": { "type": "ARRAY", "items": { "type": "STRING" } },
            "estimatedImpact": { "type": "STRING" }
        }
    })
}

/// Analyze a reported incident photo. The image travels inline with the
/// instruction; the reply maps onto [`IncidentAnalysis`] with its defaults.
/// Transport failure propagates so the reporting panel can reset.
pub async fn analyze(
    client: &dyn AdvisoryClient,
    image_base64: &str,
    mime_type: &str,
    language: &str,
) -> AdvisoryResult<IncidentAnalysis> {
    let prompt = format!(
        "Analyze the severity of this disaster-related incident. Return JSON with \
severity, summary, safetySteps, and estimatedImpact. Respond in {language} language."
    );
    let request = AdvisoryRequest::new(prompt)
        .with_schema(incident_schema())
        .with_image(InlineImage {
            data: image_base64.to_string(),
            mime_type: mime_type.to_string(),
        });

    let reply = client.generate(request).await?;
    let value = decode::parse_reply(&reply.text);

    Ok(IncidentAnalysis {
        severity: decode::str_or(&value, "severity", "Unknown"),
        summary: decode::str_or(&value, "summary", "No analysis available"),
        safety_steps: decode::str_list(&value, "safetySteps"),
        estimated_impact: decode::str_or(
            &value,
            "estimatedImpact",
            "Impact assessment not possible",
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{AdvisoryError, AdvisoryReply};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct Canned {
        text: String,
        seen: Mutex<Option<AdvisoryRequest>>,
    }

    #[async_trait]
    impl AdvisoryClient for Canned {
        async fn generate(&self, request: AdvisoryRequest) -> AdvisoryResult<AdvisoryReply> {
            *self.seen.lock() = Some(request);
            Ok(AdvisoryReply {
                text: self.text.clone(),
                sources: vec![],
            })
        }

        async fn relay(&self, _prompt: &str) -> AdvisoryResult<serde_json::Value> {
            Err(AdvisoryError::Upstream("unused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_analyze_attaches_image_payload() {
        let client = Canned {
            text: "{}".to_string(),
            seen: Mutex::new(None),
        };
        let _ = analyze(&client, "QUJD", "image/png", "en").await.unwrap();
        let request = client.seen.lock().take().unwrap();
        let image = request.image.unwrap();
        assert_eq!(image.data, "QUJD");
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_analyze_defaults_on_empty_reply() {
        let client = Canned {
            text: "{}".to_string(),
            seen: Mutex::new(None),
        };
        let analysis = analyze(&client, "QUJD", "image/png", "en").await.unwrap();
        assert_eq!(analysis.severity, "Unknown");
        assert_eq!(analysis.summary, "No analysis available");
        assert!(analysis.safety_steps.is_empty());
        assert_eq!(analysis.estimated_impact, "Impact assessment not possible");
    }
}
