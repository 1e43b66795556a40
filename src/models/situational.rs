//! Situational-awareness types returned by the advisory operations: alerts,
//! risk zones, location intelligence, incident analysis, grounded answers.

use serde::{Deserialize, Serialize};

/// Default map center when the advisory reply carries no usable coordinates
/// (geographic centroid of India).
pub const INDIA_CENTROID: [f64; 2] = [20.5937, 78.9629];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertCategory {
    Urgent,
    #[default]
    Update,
    Advisory,
}

/// One generated disaster-management news update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsUpdate {
    pub id: String,
    pub title: String,
    pub timestamp: String,
    pub category: AlertCategory,
    pub content: String,
}

/// Risk classification of a generated map zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZoneKind {
    Red,
    Yellow,
    #[default]
    Green,
}

/// One simulated disaster risk zone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskZone {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    /// `[lat, lng]` center of the zone.
    pub coordinates: [f64; 2],
    pub radius: f64,
    pub description: String,
    pub instructions: Vec<String>,
}

/// Zone set for a region, with the map center to frame it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMap {
    pub center: [f64; 2],
    pub zones: Vec<RiskZone>,
}

impl Default for ZoneMap {
    fn default() -> Self {
        Self {
            center: INDIA_CENTROID,
            zones: Vec::new(),
        }
    }
}

/// Current weather snapshot attached to a location lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeatherReport {
    pub temp: f64,
    pub condition: String,
    pub condition_text: String,
    pub humidity: f64,
    pub wind_speed: String,
    pub wind_dir: String,
    pub visibility: String,
}

impl Default for WeatherReport {
    /// Fair-sky placeholder used when the advisory reply omits weather.
    fn default() -> Self {
        Self {
            temp: 25.0,
            condition: "Clear".to_string(),
            condition_text: "Fair Sky".to_string(),
            humidity: 45.0,
            wind_speed: "10 km/h".to_string(),
            wind_dir: "NW".to_string(),
            visibility: "10 km".to_string(),
        }
    }
}

/// A grounding citation attached to a generated answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceLink {
    pub title: String,
    pub uri: String,
}

/// Free-text answer plus the grounding links the advisory attached to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundedAnswer {
    pub text: String,
    pub links: Vec<SourceLink>,
}

/// Location intelligence for a place lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationDetails {
    pub name: String,
    pub state: String,
    pub district: String,
    pub pin_code: String,
    pub lat: String,
    pub lng: String,
    pub famous_places: Vec<String>,
    pub population: String,
    pub languages: Vec<String>,
    pub time_zone: String,
    pub weather: WeatherReport,
    pub nearby_hospitals: Vec<String>,
    pub nearby_police_stations: Vec<String>,
    pub sources: Vec<SourceLink>,
}

impl Default for LocationDetails {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            state: "Unknown".to_string(),
            district: "Unknown".to_string(),
            pin_code: String::new(),
            lat: String::new(),
            lng: String::new(),
            famous_places: Vec::new(),
            population: "Unknown".to_string(),
            languages: Vec::new(),
            time_zone: "IST".to_string(),
            weather: WeatherReport::default(),
            nearby_hospitals: Vec::new(),
            nearby_police_stations: Vec::new(),
            sources: Vec::new(),
        }
    }
}

/// Structured severity assessment of a reported incident image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IncidentAnalysis {
    pub severity: String,
    pub summary: String,
    pub safety_steps: Vec<String>,
    pub estimated_impact: String,
}

impl Default for IncidentAnalysis {
    fn default() -> Self {
        Self {
            severity: "Unknown".to_string(),
            summary: "No analysis available".to_string(),
            safety_steps: Vec::new(),
            estimated_impact: "Impact assessment not possible".to_string(),
        }
    }
}
