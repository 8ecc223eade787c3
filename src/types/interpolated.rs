//! Engine output records.

use chrono::NaiveDate;

/// Interpolated weather estimates for one (date, air-quality station) pair.
///
/// `estimates` is positionally aligned with the variable list of the run that
/// produced the row. `None` marks a variable with no usable source readings;
/// the output table renders it as a null, never as a sentinel number.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedRow {
    pub date: NaiveDate,
    pub station: String,
    pub estimates: Vec<Option<f64>>,
}

/// The assembled output of an interpolation run: one row per (date, station)
/// pair, grouped by date and then by station in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationResult {
    variables: Vec<String>,
    rows: Vec<InterpolatedRow>,
}

impl InterpolationResult {
    pub(crate) fn new(variables: Vec<String>, rows: Vec<InterpolatedRow>) -> Self {
        Self { variables, rows }
    }

    /// Variable names, in output column order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn rows(&self) -> &[InterpolatedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a single estimate by row key and variable name.
    pub fn estimate(&self, date: NaiveDate, station: &str, variable: &str) -> Option<f64> {
        let index = self.variables.iter().position(|v| v == variable)?;
        self.rows
            .iter()
            .find(|row| row.date == date && row.station == station)
            .and_then(|row| row.estimates.get(index).copied().flatten())
    }
}
