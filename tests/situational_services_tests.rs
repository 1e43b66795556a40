//! Integration tests for the situational-awareness services driven through
//! the doubled advisory boundary.

mod support;

use resq_rust::models::{AlertCategory, ZoneKind, INDIA_CENTROID};
use resq_rust::services::{alerts, donations, incident, location, places, zones};

use support::CannedAdvisory;

#[tokio::test]
async fn test_alert_generation_maps_all_updates() {
    let advisory = CannedAdvisory::replying(
        r#"[
            {"id": "1", "title": "Flood warning", "timestamp": "09:00", "category": "URGENT", "content": "Evacuate low areas"},
            {"id": "2", "title": "Relief convoy", "timestamp": "10:30", "category": "UPDATE", "content": "Supplies en route"},
            {"id": "3", "title": "Boil water", "timestamp": "11:00", "category": "ADVISORY", "content": "Contamination risk"}
        ]"#,
    );

    let updates = alerts::generate(&advisory, "Cuttack", "en").await;

    assert_eq!(updates.len(), 3);
    assert_eq!(updates[0].category, AlertCategory::Urgent);
    assert_eq!(updates[1].title, "Relief convoy");
    assert_eq!(updates[2].category, AlertCategory::Advisory);
    assert!(advisory.last_prompt().contains("Cuttack"));
}

#[tokio::test]
async fn test_alert_generation_degrades_to_empty_list() {
    let advisory = CannedAdvisory::failing();
    let updates = alerts::generate(&advisory, "Cuttack", "en").await;
    assert!(updates.is_empty());
}

#[tokio::test]
async fn test_broadcast_failure_dispatches_brief_verbatim() {
    let advisory = CannedAdvisory::failing();

    let update = alerts::broadcast(&advisory, "Bridge out on NH-16", "en").await;

    assert_eq!(update.title, "Manual Dispatch");
    assert_eq!(update.category, AlertCategory::Urgent);
    assert_eq!(update.content, "Bridge out on NH-16");
}

#[tokio::test]
async fn test_zone_generation_maps_center_and_zones() {
    let advisory = CannedAdvisory::replying(
        r#"{
            "center": [20.46, 85.88],
            "zones": [
                {"id": "z1", "name": "River basin", "type": "RED",
                 "coordinates": [20.47, 85.89], "radius": 2500.0,
                 "description": "Active flooding", "instructions": ["Evacuate now"]}
            ]
        }"#,
    );

    let map = zones::generate(&advisory, "Cuttack", "en").await;

    assert_eq!(map.center, [20.46, 85.88]);
    assert_eq!(map.zones.len(), 1);
    assert_eq!(map.zones[0].kind, ZoneKind::Red);
    assert_eq!(map.zones[0].radius, 2500.0);
}

#[tokio::test]
async fn test_zone_generation_failure_yields_default_map() {
    let advisory = CannedAdvisory::failing();

    let map = zones::generate(&advisory, "Cuttack", "en").await;

    assert_eq!(map.center, INDIA_CENTROID);
    assert!(map.zones.is_empty());
}

#[tokio::test]
async fn test_location_lookup_defaults_missing_weather() {
    let advisory = CannedAdvisory::replying(
        r#"{"name": "Puri", "state": "Odisha", "district": "Puri"}"#,
    );

    let details = location::lookup(&advisory, "Puri", "en").await.unwrap();

    assert_eq!(details.name, "Puri");
    assert_eq!(details.state, "Odisha");
    // Fair-sky placeholder fills in for the missing weather block.
    assert_eq!(details.weather.condition_text, "Fair Sky");
    assert_eq!(details.time_zone, "IST");
}

#[tokio::test]
async fn test_location_lookup_propagates_upstream_failure() {
    let advisory = CannedAdvisory::failing();
    assert!(location::lookup(&advisory, "Puri", "en").await.is_err());
}

#[tokio::test]
async fn test_incident_analysis_attaches_image_and_maps_reply() {
    let advisory = CannedAdvisory::replying(
        r#"{"severity": "High", "summary": "Partial building collapse",
            "safetySteps": ["Keep clear", "Call 112"],
            "estimatedImpact": "Two structures affected"}"#,
    );

    let analysis = incident::analyze(&advisory, "aGVsbG8=", "image/jpeg", "en")
        .await
        .unwrap();

    assert_eq!(analysis.severity, "High");
    assert_eq!(analysis.safety_steps.len(), 2);

    let requests = advisory.requests.lock();
    let image = requests[0].image.as_ref().unwrap();
    assert_eq!(image.data, "aGVsbG8=");
    assert_eq!(image.mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_place_search_carries_location_hint() {
    let advisory = CannedAdvisory::replying("Two shelters within 3 km.");

    let answer = places::search(&advisory, "nearest shelters", 20.46, 85.88, "en").await;

    assert_eq!(answer.text, "Two shelters within 3 km.");
    let requests = advisory.requests.lock();
    assert_eq!(requests[0].location_hint, Some((20.46, 85.88)));
}

#[tokio::test]
async fn test_place_search_failure_is_safe_fallback() {
    let advisory = CannedAdvisory::failing();
    let answer = places::search(&advisory, "nearest shelters", 20.46, 85.88, "en").await;
    assert_eq!(answer.text, "Search failed.");
    assert!(answer.links.is_empty());
}

#[tokio::test]
async fn test_donation_impact_static_fallback_on_failure() {
    let advisory = CannedAdvisory::failing();

    let text = donations::impact(&advisory, "5000", "Food & Water", "en").await;

    assert_eq!(
        text,
        "Contribution will be used for essential relief supplies."
    );
}
