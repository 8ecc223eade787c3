//! Orchestrates one interpolation run over all dates and stations.

use crate::distance::matrix::DistanceMatrix;
use crate::driver::error::DriverError;
use crate::estimator::idw::{estimate, IdwParams};
use crate::index::date_index::StationDateIndex;
use crate::types::interpolated::{InterpolatedRow, InterpolationResult};
use crate::types::observation::{AirQualityStationDay, WeatherObservation};
use chrono::NaiveDate;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Interpolates every requested variable onto every (date, station) pair of
/// `station_days`.
///
/// Dates are visited in first-seen order and stations within a date in
/// first-seen order; per-date work runs on independent worker tasks whose row
/// buffers are concatenated back in visitation order, so the output is
/// deterministic regardless of thread count. One row is emitted per pair even
/// when every variable estimate is missing: sparse coverage is a property of
/// the result, not an error.
pub fn interpolate(
    observations: &[WeatherObservation],
    station_days: &[AirQualityStationDay],
    matrix: &DistanceMatrix,
    variables: &[String],
    params: IdwParams,
) -> Result<InterpolationResult, DriverError> {
    check_station_days(station_days, matrix)?;

    let index = StationDateIndex::build(observations, station_days);
    info!(
        "interpolating {} variables over {} dates (power {})",
        variables.len(),
        index.dates().len(),
        params.power
    );

    let per_date: Vec<Vec<InterpolatedRow>> = index
        .dates()
        .par_iter()
        .map(|&date| interpolate_date(date, &index, matrix, variables, params))
        .collect();
    let rows: Vec<InterpolatedRow> = per_date.into_iter().flatten().collect();

    info!("interpolation produced {} rows", rows.len());
    Ok(InterpolationResult::new(variables.to_vec(), rows))
}

/// All rows for a single date.
fn interpolate_date(
    date: NaiveDate,
    index: &StationDateIndex,
    matrix: &DistanceMatrix,
    variables: &[String],
    params: IdwParams,
) -> Vec<InterpolatedRow> {
    let stations = index.air_quality_stations_on(date);
    let reporting = index.weather_stations_reporting(date);
    match reporting {
        Some(reporting) => debug!(
            "{date}: {} air-quality stations, {} reporting weather stations",
            stations.len(),
            reporting.len()
        ),
        None => warn!(
            "{date}: no weather station reported; emitting {} rows without estimates",
            stations.len()
        ),
    }

    let mut rows = Vec::with_capacity(stations.len());
    for station in stations {
        let distances = candidate_distances(station, reporting, matrix);
        let estimates: Vec<Option<f64>> = variables
            .iter()
            .map(|variable| {
                let values = index.values(date, variable)?;
                estimate(&distances, values, params.power)
            })
            .collect();
        rows.push(InterpolatedRow {
            date,
            station: station.clone(),
            estimates,
        });
    }
    rows
}

/// One station's matrix row, restricted to the weather stations reporting on
/// the date.
fn candidate_distances(
    station: &str,
    reporting: Option<&HashSet<String>>,
    matrix: &DistanceMatrix,
) -> HashMap<String, f64> {
    let Some(reporting) = reporting else {
        return HashMap::new();
    };
    matrix
        .row(station)
        .into_iter()
        .flatten()
        .filter(|(id, _)| reporting.contains(*id))
        .map(|(id, distance)| (id.to_string(), distance))
        .collect()
}

fn check_station_days(
    station_days: &[AirQualityStationDay],
    matrix: &DistanceMatrix,
) -> Result<(), DriverError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut unknown: Vec<String> = Vec::new();
    for day in station_days {
        if !matrix.contains_air_quality(&day.station) && seen.insert(day.station.as_str()) {
            unknown.push(day.station.clone());
        }
    }
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(DriverError::UnknownStations { ids: unknown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::station::StationCoordinate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 3, day).unwrap()
    }

    fn variables(names: &[&str]) -> Vec<String> {
        names.iter().map(|v| v.to_string()).collect()
    }

    /// One air-quality station between two weather stations on a 3-4-5 grid.
    fn matrix() -> DistanceMatrix {
        let air_quality = vec![
            StationCoordinate::new("aq1", 0.0, 0.0),
            StationCoordinate::new("aq2", 3.0, 4.0),
        ];
        let weather = vec![
            StationCoordinate::new("w1", 0.0, 1.0),
            StationCoordinate::new("w2", 0.0, 2.0),
        ];
        DistanceMatrix::build(&air_quality, &weather).unwrap()
    }

    #[test]
    fn test_estimates_weight_by_distance() {
        let observations = vec![
            WeatherObservation::new(date(1), "w1").with_reading("rainfall", 10.0),
            WeatherObservation::new(date(1), "w2").with_reading("rainfall", 20.0),
        ];
        let station_days = vec![AirQualityStationDay::new(date(1), "aq1")];

        let result = interpolate(
            &observations,
            &station_days,
            &matrix(),
            &variables(&["rainfall"]),
            IdwParams { power: 2.0 },
        )
        .unwrap();

        // Distances 1 and 2 from aq1: (10 + 20/4) / (1 + 1/4).
        let got = result.estimate(date(1), "aq1", "rainfall").unwrap();
        assert!((got - 12.0).abs() < 1e-12, "Expected 12.0, got {got}");
    }

    #[test]
    fn test_row_emitted_even_when_every_estimate_is_missing() {
        let station_days = vec![
            AirQualityStationDay::new(date(1), "aq1"),
            AirQualityStationDay::new(date(1), "aq2"),
        ];

        // No observations at all on that date.
        let result = interpolate(
            &[],
            &station_days,
            &matrix(),
            &variables(&["rainfall", "average_temperature"]),
            IdwParams::default(),
        )
        .unwrap();

        assert_eq!(result.len(), 2);
        for row in result.rows() {
            assert_eq!(row.estimates, vec![None, None]);
        }
    }

    #[test]
    fn test_partially_missing_variables_fill_with_none() {
        let observations = vec![
            WeatherObservation::new(date(1), "w1").with_reading("rainfall", 4.0),
            WeatherObservation::new(date(1), "w2").with_reading("rainfall", 4.0),
        ];
        let station_days = vec![AirQualityStationDay::new(date(1), "aq1")];

        let result = interpolate(
            &observations,
            &station_days,
            &matrix(),
            &variables(&["average_temperature", "rainfall"]),
            IdwParams::default(),
        )
        .unwrap();

        let row = &result.rows()[0];
        assert_eq!(row.estimates[0], None);
        assert!((row.estimates[1].unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_every_station_day_appears_exactly_once() {
        let station_days = vec![
            AirQualityStationDay::new(date(2), "aq2"),
            AirQualityStationDay::new(date(2), "aq1"),
            AirQualityStationDay::new(date(1), "aq1"),
            // Duplicate pair collapses into the first occurrence.
            AirQualityStationDay::new(date(2), "aq2"),
        ];

        let result = interpolate(
            &[],
            &station_days,
            &matrix(),
            &variables(&["rainfall"]),
            IdwParams::default(),
        )
        .unwrap();

        let keys: Vec<(NaiveDate, &str)> = result
            .rows()
            .iter()
            .map(|row| (row.date, row.station.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![(date(2), "aq2"), (date(2), "aq1"), (date(1), "aq1")]
        );
    }

    #[test]
    fn test_runs_are_deterministic() {
        let observations: Vec<WeatherObservation> = (1..=9)
            .flat_map(|day| {
                vec![
                    WeatherObservation::new(date(day), "w1")
                        .with_reading("rainfall", day as f64)
                        .with_reading("average_temperature", 10.0 + day as f64),
                    WeatherObservation::new(date(day), "w2").with_reading("rainfall", 2.0 * day as f64),
                ]
            })
            .collect();
        let station_days: Vec<AirQualityStationDay> = (1..=9)
            .flat_map(|day| {
                vec![
                    AirQualityStationDay::new(date(day), "aq1"),
                    AirQualityStationDay::new(date(day), "aq2"),
                ]
            })
            .collect();
        let vars = variables(&["rainfall", "average_temperature"]);

        let first = interpolate(
            &observations,
            &station_days,
            &matrix(),
            &vars,
            IdwParams::default(),
        )
        .unwrap();
        let second = interpolate(
            &observations,
            &station_days,
            &matrix(),
            &vars,
            IdwParams::default(),
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_stations_are_all_collected() {
        let station_days = vec![
            AirQualityStationDay::new(date(1), "ghost1"),
            AirQualityStationDay::new(date(1), "aq1"),
            AirQualityStationDay::new(date(2), "ghost2"),
            AirQualityStationDay::new(date(3), "ghost1"),
        ];

        let err = interpolate(
            &[],
            &station_days,
            &matrix(),
            &variables(&["rainfall"]),
            IdwParams::default(),
        )
        .unwrap_err();
        match err {
            DriverError::UnknownStations { ids } => {
                assert_eq!(ids, vec!["ghost1".to_string(), "ghost2".to_string()]);
            }
        }
    }

    #[test]
    fn test_co_located_station_wins_outright() {
        let air_quality = vec![StationCoordinate::new("aq1", 0.0, 1.0)];
        let weather = vec![
            StationCoordinate::new("w1", 0.0, 1.0),
            StationCoordinate::new("w2", 0.0, 2.0),
        ];
        let matrix = DistanceMatrix::build(&air_quality, &weather).unwrap();

        let observations = vec![
            WeatherObservation::new(date(1), "w1").with_reading("rainfall", 15.0),
            WeatherObservation::new(date(1), "w2").with_reading("rainfall", 100.0),
        ];
        let station_days = vec![AirQualityStationDay::new(date(1), "aq1")];

        let result = interpolate(
            &observations,
            &station_days,
            &matrix,
            &variables(&["rainfall"]),
            IdwParams::default(),
        )
        .unwrap();
        assert_eq!(result.estimate(date(1), "aq1", "rainfall"), Some(15.0));
    }
}
