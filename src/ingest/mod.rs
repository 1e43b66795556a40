//! CSV ingestion and normalization for historical disaster spending data.
//!
//! Turns the raw text of an uploaded file into validated [`HistoricalRecord`]s
//! or fails clearly. The expected format is comma-separated with a header row
//! and 15 ordered columns: type, severity, duration days, year, area,
//! population impacted, the eight budget categories, and the total. No quoting
//! or alternate delimiters are supported.
//!
//! Malformed-row policy: a data row with fewer than 15 fields is skipped, it
//! never aborts the batch or affects sibling rows. Field-level noise is
//! normalized instead of rejected (empty strings become "Unknown", unparseable
//! numerics become 0).

use crate::models::{HistoricalRecord, Severity};

/// Minimum number of comma-separated fields a data row must carry.
pub const REQUIRED_FIELDS: usize = 15;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised while ingesting an uploaded dataset.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Fewer than two non-blank lines: there is no data row to parse.
    #[error("Dataset too small: expected a header row and at least one data row")]
    DatasetTooSmall,
}

/// Trim a raw field, substituting "Unknown" for empty input.
fn sanitize_string(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a numeric field leniently: strip everything that is not a digit, dot,
/// or minus sign, then parse. Anything unparseable (including the resulting
/// empty string) yields 0.0 so NaN never propagates downstream.
fn parse_numeric(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Parse the raw text content of an uploaded CSV file into an ordered sequence
/// of historical records (insertion order = file row order).
///
/// The header row is ignored. Returns [`IngestError::DatasetTooSmall`] when
/// fewer than two non-blank lines remain after trimming.
pub fn parse_dataset(raw: &str) -> IngestResult<Vec<HistoricalRecord>> {
    let rows: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if rows.len() < 2 {
        return Err(IngestError::DatasetTooSmall);
    }

    let records = rows[1..]
        .iter()
        .filter_map(|row| parse_row(row))
        .collect();

    Ok(records)
}

fn parse_row(row: &str) -> Option<HistoricalRecord> {
    let fields: Vec<String> = row.split(',').map(sanitize_string).collect();
    if fields.len() < REQUIRED_FIELDS {
        return None;
    }

    Some(HistoricalRecord {
        disaster_type: fields[0].clone(),
        severity: Severity::normalize(&fields[1]),
        duration_days: parse_numeric(&fields[2]),
        year: parse_numeric(&fields[3]),
        area: fields[4].clone(),
        population_impacted: parse_numeric(&fields[5]),
        food_budget: parse_numeric(&fields[6]),
        water_budget: parse_numeric(&fields[7]),
        shelter_budget: parse_numeric(&fields[8]),
        rescue_budget: parse_numeric(&fields[9]),
        medical_budget: parse_numeric(&fields[10]),
        logistics_budget: parse_numeric(&fields[11]),
        comm_budget: parse_numeric(&fields[12]),
        rehab_budget: parse_numeric(&fields[13]),
        total_budget: parse_numeric(&fields[14]),
    })
}

/// Two-row demonstration dataset used by the "tactical demo" action.
pub fn demo_dataset() -> Vec<HistoricalRecord> {
    vec![
        HistoricalRecord {
            disaster_type: "Flood".to_string(),
            severity: Severity::High,
            duration_days: 14.0,
            year: 2021.0,
            area: "Odisha Coastal".to_string(),
            population_impacted: 500_000.0,
            food_budget: 40_000_000.0,
            water_budget: 20_000_000.0,
            shelter_budget: 150_000_000.0,
            rescue_budget: 80_000_000.0,
            medical_budget: 60_000_000.0,
            logistics_budget: 45_000_000.0,
            comm_budget: 12_000_000.0,
            rehab_budget: 300_000_000.0,
            total_budget: 707_000_000.0,
        },
        HistoricalRecord {
            disaster_type: "Cyclone".to_string(),
            severity: Severity::Critical,
            duration_days: 10.0,
            year: 2022.0,
            area: "West Bengal Delta".to_string(),
            population_impacted: 1_200_000.0,
            food_budget: 95_000_000.0,
            water_budget: 50_000_000.0,
            shelter_budget: 400_000_000.0,
            rescue_budget: 200_000_000.0,
            medical_budget: 150_000_000.0,
            logistics_budget: 120_000_000.0,
            comm_budget: 40_000_000.0,
            rehab_budget: 800_000_000.0,
            total_budget: 1_855_000_000.0,
        },
    ]
}

/// Mean total budget across a dataset; 0 when empty.
pub fn historical_average(records: &[HistoricalRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.total_budget).sum::<f64>() / records.len() as f64
}
