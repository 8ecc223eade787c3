//! Adapters between in-memory polars tables and the engine's typed records.
//!
//! The upstream tooling owns file formats and reshaping; this crate only
//! agrees with it on column names and types. Date columns are accepted either
//! as `Date` dtype or as `%Y-%m-%d` strings, numeric columns are cast to
//! `Float64`, and nulls are the missing marker on both sides of the boundary.

use crate::frames::error::FrameError;
use crate::types::interpolated::InterpolationResult;
use crate::types::observation::{AirQualityStationDay, WeatherObservation};
use crate::types::station::StationCoordinate;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::collections::HashMap;

pub const DATE_COLUMN: &str = "date";
pub const STATION_COLUMN: &str = "station";
pub const LATITUDE_COLUMN: &str = "latitude";
pub const LONGITUDE_COLUMN: &str = "longitude";

/// Days between 0001-01-01 (CE) and the 1970-01-01 epoch polars dates count
/// from.
const UNIX_EPOCH_FROM_CE: i32 = 719_163;

/// Reads a station catalog from a table with `station`, `latitude` and
/// `longitude` columns.
pub fn stations_from_frame(df: &DataFrame) -> Result<Vec<StationCoordinate>, FrameError> {
    let ids = station_values(df)?;
    let latitudes = float_values(df, LATITUDE_COLUMN)?;
    let longitudes = float_values(df, LONGITUDE_COLUMN)?;

    ids.into_iter()
        .zip(latitudes)
        .zip(longitudes)
        .enumerate()
        .map(|(row, ((id, latitude), longitude))| {
            Ok(StationCoordinate {
                id,
                latitude: latitude.ok_or(FrameError::NullValue {
                    field: "latitude",
                    row,
                })?,
                longitude: longitude.ok_or(FrameError::NullValue {
                    field: "longitude",
                    row,
                })?,
            })
        })
        .collect()
}

/// Reads weather observations from a table with `date`, `station` and one
/// numeric column per requested variable. Extra columns (e.g. `altitude`)
/// are ignored; null cells become absent readings.
pub fn observations_from_frame(
    df: &DataFrame,
    variables: &[String],
) -> Result<Vec<WeatherObservation>, FrameError> {
    let dates = date_values(df)?;
    let stations = station_values(df)?;
    let mut columns = Vec::with_capacity(variables.len());
    for variable in variables {
        columns.push((variable.as_str(), float_values(df, variable)?));
    }

    let mut observations = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut readings = HashMap::new();
        for (variable, values) in &columns {
            if let Some(value) = values[row] {
                readings.insert((*variable).to_string(), value);
            }
        }
        observations.push(WeatherObservation {
            date: dates[row],
            station: stations[row].clone(),
            readings,
        });
    }
    Ok(observations)
}

/// Reads the (date, station) pairs needing estimates from a table with
/// `date` and `station` columns. Pollutant columns, if present, are ignored.
pub fn station_days_from_frame(df: &DataFrame) -> Result<Vec<AirQualityStationDay>, FrameError> {
    let dates = date_values(df)?;
    let stations = station_values(df)?;
    Ok(dates
        .into_iter()
        .zip(stations)
        .map(|(date, station)| AirQualityStationDay { date, station })
        .collect())
}

/// Materializes a run result as a table with `date`, `station` and one
/// `Float64` column per variable; missing estimates become nulls.
pub fn result_to_frame(result: &InterpolationResult) -> Result<DataFrame, FrameError> {
    let days: Vec<i32> = result
        .rows()
        .iter()
        .map(|row| row.date.num_days_from_ce() - UNIX_EPOCH_FROM_CE)
        .collect();
    let date = Series::new(DATE_COLUMN.into(), days).cast(&DataType::Date)?;
    let stations: Vec<&str> = result.rows().iter().map(|row| row.station.as_str()).collect();

    let mut columns: Vec<Column> = Vec::with_capacity(result.variables().len() + 2);
    columns.push(date.into_column());
    columns.push(Series::new(STATION_COLUMN.into(), stations).into_column());
    for (index, variable) in result.variables().iter().enumerate() {
        let estimates: Vec<Option<f64>> = result
            .rows()
            .iter()
            .map(|row| row.estimates[index])
            .collect();
        columns.push(Series::new(variable.as_str().into(), estimates).into_column());
    }
    DataFrame::new(columns).map_err(FrameError::from)
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, FrameError> {
    df.column(name)
        .map_err(|_| FrameError::ColumnNotFound(name.to_string()))
}

fn date_values(df: &DataFrame) -> Result<Vec<NaiveDate>, FrameError> {
    let col = column(df, DATE_COLUMN)?;
    match col.dtype() {
        DataType::Date => {
            let ca = col.date().map_err(|e| FrameError::ColumnType {
                column: DATE_COLUMN.to_string(),
                expected: "dates",
                source: e,
            })?;
            ca.into_iter()
                .enumerate()
                .map(|(row, days)| {
                    let days = days.ok_or(FrameError::NullValue { field: "date", row })?;
                    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_FROM_CE).ok_or(
                        FrameError::DateParse {
                            value: days.to_string(),
                        },
                    )
                })
                .collect()
        }
        DataType::String => {
            let ca = col.str().map_err(|e| FrameError::ColumnType {
                column: DATE_COLUMN.to_string(),
                expected: "strings",
                source: e,
            })?;
            ca.into_iter()
                .enumerate()
                .map(|(row, value)| {
                    let value = value.ok_or(FrameError::NullValue { field: "date", row })?;
                    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                        FrameError::DateParse {
                            value: value.to_string(),
                        }
                    })
                })
                .collect()
        }
        other => Err(FrameError::DateType {
            dtype: other.to_string(),
        }),
    }
}

fn station_values(df: &DataFrame) -> Result<Vec<String>, FrameError> {
    let col = column(df, STATION_COLUMN)?;
    let ca = col.str().map_err(|e| FrameError::ColumnType {
        column: STATION_COLUMN.to_string(),
        expected: "strings",
        source: e,
    })?;
    ca.into_iter()
        .enumerate()
        .map(|(row, value)| {
            value
                .map(str::to_string)
                .ok_or(FrameError::NullValue {
                    field: "station",
                    row,
                })
        })
        .collect()
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, FrameError> {
    let col = column(df, name)?;
    let cast = col
        .cast(&DataType::Float64)
        .map_err(|e| FrameError::ColumnType {
            column: name.to_string(),
            expected: "floats",
            source: e,
        })?;
    let ca = cast.f64().map_err(|e| FrameError::ColumnType {
        column: name.to_string(),
        expected: "floats",
        source: e,
    })?;
    Ok(ca.into_iter().collect())
}
