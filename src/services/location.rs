//! Grounded location intelligence lookup.
//!
//! Unlike the other advisory operations this one propagates upstream failure:
//! a location panel with fabricated local defaults is worse than an error.

use serde_json::{json, Value};

use crate::advisory::{decode, AdvisoryClient, AdvisoryRequest, AdvisoryResult, GroundingTool};
use crate::models::LocationDetails;

fn location_schema() -> Value {
    let string = json!({ "type": "STRING" });
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "name": string, "state": string, "district": string, "pinCode": string,
            "lat": string, "lng": string,
            "famousPlaces": string_list,
            "population": string,
            "languages": string_list,
            "timeZone": string,
            "weather": {
                "type": "OBJECT",
                "properties": {
                    "temp": { "type": "NUMBER" },
                    "condition": { "type": "STRING", "enum": ["Clear", "Rain", "Storm", "Cloudy"] },
                    "conditionText": string,
                    "humidity": { "type": "NUMBER" },
                    "windSpeed": string, "windDir": string, "visibility": string
                }
            },
            "nearbyHospitals": string_list,
            "nearbyPoliceStations": string_list
        }
    })
}

/// Look up details for a place, grounded through the search tool. Every field
/// of the reply is defaulted individually; the weather block falls back to the
/// fair-sky placeholder when absent.
pub async fn lookup(
    client: &dyn AdvisoryClient,
    place: &str,
    language: &str,
) -> AdvisoryResult<LocationDetails> {
    let prompt = format!(
        "Search for details for location \"{place}\" in India. MUST include current \
real-time weather data (temp in C, condition, humidity, wind). Return as JSON. \
Respond in {language} language."
    );
    let request = AdvisoryRequest::new(prompt)
        .with_schema(location_schema())
        .with_grounding(GroundingTool::Search);

    let reply = client.generate(request).await?;
    let value = decode::parse_reply(&reply.text);

    let mut details = LocationDetails {
        name: decode::str_or(&value, "name", "Unknown"),
        state: decode::str_or(&value, "state", "Unknown"),
        district: decode::str_or(&value, "district", "Unknown"),
        pin_code: decode::str_or(&value, "pinCode", ""),
        lat: decode::str_or(&value, "lat", ""),
        lng: decode::str_or(&value, "lng", ""),
        famous_places: decode::str_list(&value, "famousPlaces"),
        population: decode::str_or(&value, "population", "Unknown"),
        languages: decode::str_list(&value, "languages"),
        time_zone: decode::str_or(&value, "timeZone", "IST"),
        weather: decode::field_or_default(&value, "weather"),
        nearby_hospitals: decode::str_list(&value, "nearbyHospitals"),
        nearby_police_stations: decode::str_list(&value, "nearbyPoliceStations"),
        sources: Vec::new(),
    };
    details.sources = reply.sources;

    Ok(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::{AdvisoryError, AdvisoryReply};
    use crate::models::SourceLink;
    use async_trait::async_trait;

    struct Canned {
        text: String,
        sources: Vec<SourceLink>,
        fail: bool,
    }

    #[async_trait]
    impl AdvisoryClient for Canned {
        async fn generate(&self, _request: AdvisoryRequest) -> AdvisoryResult<AdvisoryReply> {
            if self.fail {
                return Err(AdvisoryError::Upstream("down".to_string()));
            }
            Ok(AdvisoryReply {
                text: self.text.clone(),
                sources: self.sources.clone(),
            })
        }

        async fn relay(&self, _prompt: &str) -> AdvisoryResult<serde_json::Value> {
            Err(AdvisoryError::Upstream("unused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_lookup_defaults_missing_weather_to_fair_sky() {
        let client = Canned {
            text: r#"{"name": "Puri", "state": "Odisha"}"#.to_string(),
            sources: vec![],
            fail: false,
        };
        let details = lookup(&client, "Puri", "en").await.unwrap();
        assert_eq!(details.name, "Puri");
        assert_eq!(details.district, "Unknown");
        assert_eq!(details.weather.condition_text, "Fair Sky");
        assert_eq!(details.time_zone, "IST");
    }

    #[tokio::test]
    async fn test_lookup_attaches_grounding_sources() {
        let client = Canned {
            text: "{}".to_string(),
            sources: vec![SourceLink {
                title: "District portal".to_string(),
                uri: "https://example.in".to_string(),
            }],
            fail: false,
        };
        let details = lookup(&client, "Puri", "en").await.unwrap();
        assert_eq!(details.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_propagates_upstream_failure() {
        let client = Canned {
            text: String::new(),
            sources: vec![],
            fail: true,
        };
        assert!(lookup(&client, "Puri", "en").await.is_err());
    }
}
