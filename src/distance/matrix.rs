//! Dense rectangular matrix of pairwise distances between the two station
//! networks, built once from static coordinates and read-only afterwards.

use crate::distance::error::{CatalogKind, DistanceMatrixError};
use crate::types::station::StationCoordinate;
use log::debug;
use std::collections::HashMap;

/// Distances from every air-quality station to every weather station.
///
/// Rows are air-quality stations, columns are weather stations; the matrix is
/// directional because the two station sets are different. Distances are
/// plain Euclidean in coordinate-degree space. The source data covers a small
/// regional extent, so no projection or great-circle correction is applied;
/// changing that would silently alter every estimate downstream.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    air_quality_ids: Vec<String>,
    weather_ids: Vec<String>,
    air_quality_index: HashMap<String, usize>,
    weather_index: HashMap<String, usize>,
    /// Row-major, `air_quality_ids.len() * weather_ids.len()` entries.
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the matrix from the two station catalogs.
    ///
    /// Fails if either catalog repeats an id or carries a NaN or infinite
    /// coordinate; both conditions abort before any distance is computed.
    pub fn build(
        air_quality: &[StationCoordinate],
        weather: &[StationCoordinate],
    ) -> Result<Self, DistanceMatrixError> {
        let air_quality_index = index_catalog(air_quality, CatalogKind::AirQuality)?;
        let weather_index = index_catalog(weather, CatalogKind::Weather)?;

        let mut distances = Vec::with_capacity(air_quality.len() * weather.len());
        for aq_station in air_quality {
            for weather_station in weather {
                distances.push(euclidean(aq_station, weather_station));
            }
        }
        debug!(
            "built {}x{} station distance matrix",
            air_quality.len(),
            weather.len()
        );

        Ok(Self {
            air_quality_ids: air_quality.iter().map(|s| s.id.clone()).collect(),
            weather_ids: weather.iter().map(|s| s.id.clone()).collect(),
            air_quality_index,
            weather_index,
            distances,
        })
    }

    /// Air-quality station ids, in catalog order.
    pub fn air_quality_ids(&self) -> &[String] {
        &self.air_quality_ids
    }

    /// Weather station ids, in catalog order.
    pub fn weather_ids(&self) -> &[String] {
        &self.weather_ids
    }

    pub fn contains_air_quality(&self, id: &str) -> bool {
        self.air_quality_index.contains_key(id)
    }

    /// Distance between one air-quality station and one weather station, or
    /// `None` if either id is unknown.
    pub fn distance(&self, air_quality_id: &str, weather_id: &str) -> Option<f64> {
        let row = *self.air_quality_index.get(air_quality_id)?;
        let col = *self.weather_index.get(weather_id)?;
        Some(self.distances[row * self.weather_ids.len() + col])
    }

    /// Iterates one air-quality station's `(weather station id, distance)`
    /// row in weather-catalog order.
    pub fn row<'a>(
        &'a self,
        air_quality_id: &str,
    ) -> Option<impl Iterator<Item = (&'a str, f64)> + 'a> {
        let row = *self.air_quality_index.get(air_quality_id)?;
        let width = self.weather_ids.len();
        let slice = &self.distances[row * width..(row + 1) * width];
        Some(
            self.weather_ids
                .iter()
                .zip(slice)
                .map(|(id, &distance)| (id.as_str(), distance)),
        )
    }
}

fn index_catalog(
    stations: &[StationCoordinate],
    catalog: CatalogKind,
) -> Result<HashMap<String, usize>, DistanceMatrixError> {
    let mut index = HashMap::with_capacity(stations.len());
    for (position, station) in stations.iter().enumerate() {
        if !station.latitude.is_finite() || !station.longitude.is_finite() {
            return Err(DistanceMatrixError::NonFiniteCoordinate {
                catalog,
                id: station.id.clone(),
                latitude: station.latitude,
                longitude: station.longitude,
            });
        }
        if index.insert(station.id.clone(), position).is_some() {
            return Err(DistanceMatrixError::DuplicateStationId {
                catalog,
                id: station.id.clone(),
            });
        }
    }
    Ok(index)
}

fn euclidean(a: &StationCoordinate, b: &StationCoordinate) -> f64 {
    let dlat = a.latitude - b.latitude;
    let dlon = a.longitude - b.longitude;
    (dlat * dlat + dlon * dlon).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogs() -> (Vec<StationCoordinate>, Vec<StationCoordinate>) {
        let air_quality = vec![
            StationCoordinate::new("aq1", 0.0, 0.0),
            StationCoordinate::new("aq2", 1.0, 1.0),
        ];
        let weather = vec![
            StationCoordinate::new("w1", 3.0, 4.0),
            StationCoordinate::new("w2", 0.0, 0.0),
            StationCoordinate::new("w3", 1.0, 0.0),
        ];
        (air_quality, weather)
    }

    #[test]
    fn test_build_computes_euclidean_distances() {
        let (air_quality, weather) = catalogs();
        let matrix = DistanceMatrix::build(&air_quality, &weather).unwrap();

        assert_eq!(matrix.distance("aq1", "w1"), Some(5.0));
        assert_eq!(matrix.distance("aq1", "w2"), Some(0.0));
        assert_eq!(matrix.distance("aq1", "w3"), Some(1.0));
        assert_eq!(matrix.distance("aq2", "w3"), Some(1.0));
    }

    #[test]
    fn test_unknown_ids_yield_no_distance() {
        let (air_quality, weather) = catalogs();
        let matrix = DistanceMatrix::build(&air_quality, &weather).unwrap();

        assert_eq!(matrix.distance("nope", "w1"), None);
        assert_eq!(matrix.distance("aq1", "nope"), None);
        // The matrix is directional: weather ids are not valid row keys.
        assert_eq!(matrix.distance("w1", "aq1"), None);
        assert!(matrix.row("w1").is_none());
    }

    #[test]
    fn test_row_iterates_in_weather_catalog_order() {
        let (air_quality, weather) = catalogs();
        let matrix = DistanceMatrix::build(&air_quality, &weather).unwrap();

        let row: Vec<(&str, f64)> = matrix.row("aq1").unwrap().collect();
        assert_eq!(row, vec![("w1", 5.0), ("w2", 0.0), ("w3", 1.0)]);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let air_quality = vec![
            StationCoordinate::new("aq1", 0.0, 0.0),
            StationCoordinate::new("aq1", 1.0, 1.0),
        ];
        let weather = vec![StationCoordinate::new("w1", 3.0, 4.0)];

        let err = DistanceMatrix::build(&air_quality, &weather).unwrap_err();
        match err {
            DistanceMatrixError::DuplicateStationId { catalog, id } => {
                assert_eq!(catalog, CatalogKind::AirQuality);
                assert_eq!(id, "aq1");
            }
            other => panic!("Expected DuplicateStationId, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_coordinate_is_rejected() {
        let air_quality = vec![StationCoordinate::new("aq1", 0.0, 0.0)];
        let weather = vec![StationCoordinate::new("w1", f64::NAN, 4.0)];

        let err = DistanceMatrix::build(&air_quality, &weather).unwrap_err();
        match err {
            DistanceMatrixError::NonFiniteCoordinate { catalog, id, .. } => {
                assert_eq!(catalog, CatalogKind::Weather);
                assert_eq!(id, "w1");
            }
            other => panic!("Expected NonFiniteCoordinate, got {other:?}"),
        }
    }
}
