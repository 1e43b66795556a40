//! Maps-grounded place search and emergency facility lookup.

use tracing::warn;

use crate::advisory::{AdvisoryClient, AdvisoryRequest, GroundingTool};
use crate::models::GroundedAnswer;

/// Search near a coordinate through the maps tool. Failure degrades to a safe
/// fallback answer with no links.
pub async fn search(
    client: &dyn AdvisoryClient,
    query: &str,
    lat: f64,
    lng: f64,
    language: &str,
) -> GroundedAnswer {
    let request = AdvisoryRequest::new(format!("{query}. Respond in {language} language."))
        .with_grounding(GroundingTool::Maps)
        .with_location_hint(lat, lng);

    match client.generate(request).await {
        Ok(reply) => GroundedAnswer {
            text: if reply.text.is_empty() {
                "No results found.".to_string()
            } else {
                reply.text
            },
            links: reply.sources,
        },
        Err(e) => {
            warn!(error = %e, query, "place search failed");
            GroundedAnswer {
                text: "Search failed.".to_string(),
                links: Vec::new(),
            }
        }
    }
}

/// Find emergency facilities of a given type in a location.
pub async fn emergency(
    client: &dyn AdvisoryClient,
    location: &str,
    facility: &str,
    language: &str,
) -> GroundedAnswer {
    let request = AdvisoryRequest::new(format!(
        "Find {facility} in {location}, India. Respond in {language} language."
    ))
    .with_grounding(GroundingTool::Maps);

    match client.generate(request).await {
        Ok(reply) => GroundedAnswer {
            text: if reply.text.is_empty() {
                "No facilities found.".to_string()
            } else {
                reply.text
            },
            links: reply.sources,
        },
        Err(e) => {
            warn!(error = %e, location, facility, "emergency facility lookup failed");
            GroundedAnswer {
                text: "Lookup failed.".to_string(),
                links: Vec::new(),
            }
        }
    }
}
