use std::fmt;
use thiserror::Error;

/// Which station catalog an input problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    AirQuality,
    Weather,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::AirQuality => write!(f, "air-quality"),
            CatalogKind::Weather => write!(f, "weather"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DistanceMatrixError {
    #[error("Duplicate station id '{id}' in the {catalog} catalog")]
    DuplicateStationId { catalog: CatalogKind, id: String },

    #[error("Station '{id}' in the {catalog} catalog has a non-finite coordinate (latitude {latitude}, longitude {longitude})")]
    NonFiniteCoordinate {
        catalog: CatalogKind,
        id: String,
        latitude: f64,
        longitude: f64,
    },
}
