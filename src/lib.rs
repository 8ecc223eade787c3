mod distance;
mod driver;
mod error;
mod estimator;
mod frames;
mod index;
mod interpolator;
mod types;

pub use error::AqMetError;
pub use interpolator::*;

pub use distance::error::{CatalogKind, DistanceMatrixError};
pub use distance::matrix::DistanceMatrix;
pub use driver::error::DriverError;
pub use driver::run::interpolate;
pub use estimator::idw::{estimate, IdwParams, DEFAULT_POWER};
pub use frames::convert::*;
pub use frames::error::FrameError;
pub use index::date_index::StationDateIndex;

pub use types::interpolated::{InterpolatedRow, InterpolationResult};
pub use types::observation::{
    AirQualityStationDay, WeatherObservation, DEFAULT_WEATHER_VARIABLES,
};
pub use types::station::StationCoordinate;
