//! Station catalog records shared by both monitoring networks.

use serde::{Deserialize, Serialize};

/// A fixed monitoring location, identified by the id its network assigns.
///
/// Weather stations and air-quality stations use the same coordinate record;
/// the two catalogs are loaded separately and their identifier spaces never
/// overlap (e.g. AEMET indicative "3195" versus municipal code "28079004").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationCoordinate {
    /// Network-assigned station identifier.
    pub id: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl StationCoordinate {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }

    /// Parses a station catalog from its JSON representation, an array of
    /// `{"id", "latitude", "longitude"}` objects.
    pub fn catalog_from_json(json: &str) -> Result<Vec<StationCoordinate>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
