//! The main entry point for running interpolation over the two station
//! networks: owns the distance matrix, the power parameter and the variable
//! list, and wires the table adapters to the driver.

use crate::distance::matrix::DistanceMatrix;
use crate::driver::run::interpolate;
use crate::error::AqMetError;
use crate::estimator::idw::{IdwParams, DEFAULT_POWER};
use crate::frames::convert::{observations_from_frame, result_to_frame, station_days_from_frame};
use crate::types::interpolated::InterpolationResult;
use crate::types::observation::{
    AirQualityStationDay, WeatherObservation, DEFAULT_WEATHER_VARIABLES,
};
use crate::types::station::StationCoordinate;
use bon::bon;
use polars::prelude::DataFrame;

/// Estimates weather variables at air-quality monitoring stations.
///
/// The interpolator is built once from the two station catalogs (the
/// distance matrix is computed up front and reused across runs) and is
/// read-only afterwards, so it can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use aqmet::{AirQualityStationDay, Interpolator, StationCoordinate, WeatherObservation};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), aqmet::AqMetError> {
/// let interpolator = Interpolator::builder()
///     .air_quality_stations(vec![StationCoordinate::new("28079004", 40.42, -3.71)])
///     .weather_stations(vec![
///         StationCoordinate::new("3195", 40.41, -3.68),
///         StationCoordinate::new("3129", 40.47, -3.56),
///     ])
///     .variables(vec!["average_temperature".to_string()])
///     .build()?;
///
/// let date = NaiveDate::from_ymd_opt(2019, 3, 1).unwrap();
/// let observations = vec![
///     WeatherObservation::new(date, "3195").with_reading("average_temperature", 11.0),
///     WeatherObservation::new(date, "3129").with_reading("average_temperature", 9.5),
/// ];
/// let station_days = vec![AirQualityStationDay::new(date, "28079004")];
///
/// let result = interpolator.interpolate(&observations, &station_days)?;
/// assert_eq!(result.len(), 1);
/// assert!(result.estimate(date, "28079004", "average_temperature").is_some());
/// # Ok(())
/// # }
/// ```
pub struct Interpolator {
    matrix: DistanceMatrix,
    params: IdwParams,
    variables: Vec<String>,
}

#[bon]
impl Interpolator {
    /// Builds an interpolator from the two station catalogs.
    ///
    /// # Arguments
    ///
    /// * `.air_quality_stations(Vec<StationCoordinate>)`: **Required.** The
    ///   catalog of stations estimates are produced for.
    /// * `.weather_stations(Vec<StationCoordinate>)`: **Required.** The
    ///   catalog of stations readings come from.
    /// * `.power(f64)`: Optional. IDW power exponent. Defaults to
    ///   [`DEFAULT_POWER`].
    /// * `.variables(Vec<String>)`: Optional. The weather variables to
    ///   estimate, in output column order. Defaults to
    ///   [`DEFAULT_WEATHER_VARIABLES`].
    ///
    /// # Errors
    ///
    /// Returns [`AqMetError::DistanceMatrix`] when either catalog repeats a
    /// station id or carries a non-finite coordinate.
    #[builder]
    pub fn new(
        air_quality_stations: Vec<StationCoordinate>,
        weather_stations: Vec<StationCoordinate>,
        power: Option<f64>,
        variables: Option<Vec<String>>,
    ) -> Result<Self, AqMetError> {
        let matrix = DistanceMatrix::build(&air_quality_stations, &weather_stations)?;
        Ok(Self {
            matrix,
            params: IdwParams {
                power: power.unwrap_or(DEFAULT_POWER),
            },
            variables: variables.unwrap_or_else(|| {
                DEFAULT_WEATHER_VARIABLES
                    .iter()
                    .map(|v| v.to_string())
                    .collect()
            }),
        })
    }

    /// Runs the interpolation over typed inputs.
    ///
    /// One output row per unique (date, station) pair of `station_days`,
    /// grouped by date then station in first-seen order.
    pub fn interpolate(
        &self,
        observations: &[WeatherObservation],
        station_days: &[AirQualityStationDay],
    ) -> Result<InterpolationResult, AqMetError> {
        interpolate(
            observations,
            station_days,
            &self.matrix,
            &self.variables,
            self.params,
        )
        .map_err(AqMetError::from)
    }

    /// Runs the whole pipeline over in-memory tables: parses the weather
    /// observation table and the air-quality station-day table, interpolates,
    /// and materializes the output table.
    pub fn interpolate_frames(
        &self,
        weather: &DataFrame,
        air_quality_days: &DataFrame,
    ) -> Result<DataFrame, AqMetError> {
        let observations = observations_from_frame(weather, &self.variables)?;
        let station_days = station_days_from_frame(air_quality_days)?;
        let result = self.interpolate(&observations, &station_days)?;
        result_to_frame(&result).map_err(AqMetError::from)
    }

    pub fn distance_matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn power(&self) -> f64 {
        self.params.power
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}
