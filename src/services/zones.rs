//! Simulated disaster risk-zone generation for a region.

use serde_json::{json, Value};
use tracing::warn;

use crate::advisory::{decode, AdvisoryClient, AdvisoryRequest};
use crate::models::{RiskZone, ZoneMap};

fn zone_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "center": { "type": "ARRAY", "items": { "type": "NUMBER" } },
            "zones": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "name": { "type": "STRING" },
                        "type": { "type": "STRING", "enum": ["RED", "YELLOW", "GREEN"] },
                        "coordinates": { "type": "ARRAY", "items": { "type": "NUMBER" } },
                        "radius": { "type": "NUMBER" },
                        "description": { "type": "STRING" },
                        "instructions": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["id", "name", "type", "coordinates", "radius",
                                 "description", "instructions"]
                }
            }
        },
        "required": ["center", "zones"]
    })
}

/// Generate the risk-zone map for a location. Any failure degrades to the
/// default map (India centroid, no zones).
pub async fn generate(client: &dyn AdvisoryClient, location: &str, language: &str) -> ZoneMap {
    let prompt = format!(
        "Analyze the geography of \"{location}\" in India. Provide its center coordinates \
[lat, lng] and 4-5 simulated disaster risk zones (Red for critical danger, Yellow for \
relief/warning, Green for safe zones). Return as JSON. Respond in {language} language."
    );
    let request = AdvisoryRequest::new(prompt).with_schema(zone_schema());

    let reply = match client.generate(request).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, location, "risk zone generation failed");
            return ZoneMap::default();
        }
    };

    let value = decode::parse_reply(&reply.text);
    map_zone_reply(&value)
}

fn map_zone_reply(value: &Value) -> ZoneMap {
    let mut map = ZoneMap::default();

    if let Some(center) = value.get("center").and_then(Value::as_array) {
        if let (Some(lat), Some(lng)) = (
            center.first().and_then(Value::as_f64),
            center.get(1).and_then(Value::as_f64),
        ) {
            map.center = [lat, lng];
        }
    }

    map.zones = value
        .get("zones")
        .and_then(Value::as_array)
        .map(|zones| {
            zones
                .iter()
                .filter_map(|z| serde_json::from_value::<RiskZone>(z.clone()).ok())
                .collect()
        })
        .unwrap_or_default();

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ZoneKind, INDIA_CENTROID};

    #[test]
    fn test_map_zone_reply_full() {
        let value = serde_json::json!({
            "center": [19.07, 72.87],
            "zones": [{
                "id": "z1", "name": "Riverbank", "type": "RED",
                "coordinates": [19.1, 72.9], "radius": 500.0,
                "description": "Flash flood corridor",
                "instructions": ["Evacuate north"]
            }]
        });
        let map = map_zone_reply(&value);
        assert_eq!(map.center, [19.07, 72.87]);
        assert_eq!(map.zones.len(), 1);
        assert_eq!(map.zones[0].kind, ZoneKind::Red);
    }

    #[test]
    fn test_map_zone_reply_missing_center_defaults_to_centroid() {
        let map = map_zone_reply(&serde_json::json!({ "zones": [] }));
        assert_eq!(map.center, INDIA_CENTROID);
        assert!(map.zones.is_empty());
    }

    #[test]
    fn test_map_zone_reply_null() {
        let map = map_zone_reply(&serde_json::Value::Null);
        assert_eq!(map.center, INDIA_CENTROID);
        assert!(map.zones.is_empty());
    }
}
