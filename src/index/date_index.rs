//! Per-date station resolution over pre-grouped input data.

use crate::types::observation::{AirQualityStationDay, WeatherObservation};
use chrono::NaiveDate;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Resolves, for a given date, which weather stations reported data and which
/// air-quality stations need estimates.
///
/// Built once per run; every lookup afterwards is a read over pre-grouped
/// data. The reporting set only means "at least one non-missing reading on
/// that date"; per-variable availability is decided inside the estimator.
#[derive(Debug)]
pub struct StationDateIndex {
    /// Dates in first-seen order of the station-day input.
    dates: Vec<NaiveDate>,
    /// Air-quality stations per date, deduplicated, first-seen order.
    air_quality_by_date: HashMap<NaiveDate, Vec<String>>,
    reporting_by_date: HashMap<NaiveDate, HashSet<String>>,
    /// date -> variable -> station -> value.
    values_by_date: HashMap<NaiveDate, HashMap<String, HashMap<String, f64>>>,
}

impl StationDateIndex {
    pub fn build(
        observations: &[WeatherObservation],
        station_days: &[AirQualityStationDay],
    ) -> Self {
        let mut dates = Vec::new();
        let mut air_quality_by_date: HashMap<NaiveDate, Vec<String>> = HashMap::new();
        for day in station_days {
            let stations = match air_quality_by_date.entry(day.date) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    dates.push(day.date);
                    entry.insert(Vec::new())
                }
            };
            if !stations.iter().any(|s| *s == day.station) {
                stations.push(day.station.clone());
            }
        }

        let mut reporting_by_date: HashMap<NaiveDate, HashSet<String>> = HashMap::new();
        let mut values_by_date: HashMap<NaiveDate, HashMap<String, HashMap<String, f64>>> =
            HashMap::new();
        for observation in observations {
            if observation.readings.is_empty() {
                continue;
            }
            reporting_by_date
                .entry(observation.date)
                .or_default()
                .insert(observation.station.clone());
            let day_values = values_by_date.entry(observation.date).or_default();
            for (variable, &value) in &observation.readings {
                day_values
                    .entry(variable.clone())
                    .or_default()
                    .insert(observation.station.clone(), value);
            }
        }

        Self {
            dates,
            air_quality_by_date,
            reporting_by_date,
            values_by_date,
        }
    }

    /// Dates that need estimates, in first-seen order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Weather stations with at least one non-missing reading on `date`.
    pub fn weather_stations_reporting(&self, date: NaiveDate) -> Option<&HashSet<String>> {
        self.reporting_by_date.get(&date)
    }

    /// Air-quality stations needing estimates on `date`, first-seen order.
    pub fn air_quality_stations_on(&self, date: NaiveDate) -> &[String] {
        self.air_quality_by_date
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The station-to-value slice for one variable on one date.
    pub fn values(&self, date: NaiveDate, variable: &str) -> Option<&HashMap<String, f64>> {
        self.values_by_date.get(&date)?.get(variable)
    }
}
