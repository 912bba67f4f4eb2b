//! Location records and the dataset bundled with the viewer.

use crate::error::DatasetError;
use serde::{Deserialize, Serialize};

/// Static dataset compiled into the binary.
pub static LOCATIONS_JSON: &str = include_str!("../data/locations.json");

/// One geolocated data point. Latitude/longitude are in degrees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

/// Parse a JSON array of location records.
pub fn parse_locations(json: &str) -> Result<Vec<LocationRecord>, DatasetError> {
    let records: Vec<LocationRecord> = serde_json::from_str(json)?;
    log::debug!("[dataset] parsed {} location records", records.len());
    Ok(records)
}

/// Records from the bundled dataset.
pub fn bundled_locations() -> Result<Vec<LocationRecord>, DatasetError> {
    parse_locations(LOCATIONS_JSON)
}

/// Largest `value` in the set, never below zero.
pub fn max_value(records: &[LocationRecord]) -> f64 {
    records.iter().map(|r| r.value).fold(0.0, f64::max)
}
