//! Inverse Distance Weighting over a fixed set of candidate stations.
//!
//! Estimates the value at an unsampled location as a weighted average of
//! known station values, weights inversely proportional to distance raised
//! to a power parameter.
//!
//! Reference:
//! Shepard, D. (1968). A two-dimensional interpolation function for
//! irregularly-spaced data. ACM National Conference.

use std::collections::HashMap;

/// Default power exponent.
///
/// Empirically chosen for the station density of the source data set; pass a
/// different value through [`IdwParams`] to tune the distance falloff.
pub const DEFAULT_POWER: f64 = 5.0;

/// Tunable parameters of the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdwParams {
    /// Power exponent. Higher values let nearby stations dominate.
    pub power: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            power: DEFAULT_POWER,
        }
    }
}

/// Combines station values and their distances into one weighted estimate.
///
/// The candidate set is the intersection of stations that carry a finite
/// distance entry and a value for the variable in question; the two maps need
/// not share key sets. Returns `None` when that set is empty; the caller
/// records a missing estimate, never a sentinel number.
///
/// A candidate at distance exactly zero is co-located with the target and its
/// value is returned directly, ignoring all others (the limit of the
/// weighting as the weight grows without bound). Ties between several
/// zero-distance candidates are broken by station-id order.
///
/// All arithmetic is f64 and the result is not rounded.
pub fn estimate(
    distances: &HashMap<String, f64>,
    values: &HashMap<String, f64>,
    power: f64,
) -> Option<f64> {
    let mut candidates: Vec<(&str, f64, f64)> = values
        .iter()
        .filter_map(|(station, &value)| {
            let distance = *distances.get(station)?;
            distance
                .is_finite()
                .then_some((station.as_str(), distance, value))
        })
        .collect();
    if candidates.is_empty() {
        return None;
    }
    // Station-id order keeps the fold bit-identical across runs.
    candidates.sort_unstable_by(|a, b| a.0.cmp(b.0));

    if let Some(&(_, _, value)) = candidates.iter().find(|(_, distance, _)| *distance == 0.0) {
        return Some(value);
    }

    let mut weight_sum = 0.0;
    let mut weighted_value_sum = 0.0;
    for &(_, distance, value) in &candidates {
        let weight = distance.powf(power).recip();
        weight_sum += weight;
        weighted_value_sum += weight * value;
    }
    Some(weighted_value_sum / weight_sum)
}
