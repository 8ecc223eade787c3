//! Engine inputs: weather readings and the station-days that need estimates.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Daily weather variables of the source data set, in output column order.
///
/// `altitude` and the identifying columns of the raw tables are not weather
/// variables and are never interpolated.
pub const DEFAULT_WEATHER_VARIABLES: [&str; 10] = [
    "average_temperature",
    "rainfall",
    "minimum_temperature",
    "maximum_temperature",
    "wind_direction",
    "average_wind_speed",
    "maximum_wind_speed",
    "maximum_ultraviolet_index",
    "maximum_pressure",
    "minimum_pressure",
];

/// One weather station's readings for one date.
///
/// A variable the station did not report on this date is simply absent from
/// `readings`; absence is the missing marker of the typed model.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub date: NaiveDate,
    pub station: String,
    /// Variable name to reading.
    pub readings: HashMap<String, f64>,
}

impl WeatherObservation {
    pub fn new(date: NaiveDate, station: impl Into<String>) -> Self {
        Self {
            date,
            station: station.into(),
            readings: HashMap::new(),
        }
    }

    pub fn with_reading(mut self, variable: impl Into<String>, value: f64) -> Self {
        self.readings.insert(variable.into(), value);
        self
    }

    pub fn reading(&self, variable: &str) -> Option<f64> {
        self.readings.get(variable).copied()
    }
}

/// A (date, air-quality station) pair that needs weather estimates.
///
/// Derived upstream from observed air-quality records; pollutant values
/// themselves never reach this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AirQualityStationDay {
    pub date: NaiveDate,
    pub station: String,
}

impl AirQualityStationDay {
    pub fn new(date: NaiveDate, station: impl Into<String>) -> Self {
        Self {
            date,
            station: station.into(),
        }
    }
}
