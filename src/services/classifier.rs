//! Threshold classifier: probability-of-exceedance over a historical series.
//!
//! Each variable has a fixed category set that partitions the valid
//! observations exactly once — no value can land in two categories and
//! none can fall through.

use crate::model::{
    PrecipitationProbabilities, TemperatureProbabilities, ThresholdSet, WindProbabilities,
};

/// Fixed lower bound of the "moderate" wind band, in the threshold unit
/// (mph by default). Independent of the user threshold; `ThresholdSet::validate`
/// rejects wind thresholds at or below it.
pub const MODERATE_WIND_FLOOR: f64 = 10.0;

/// Percentage of valid observations satisfying `predicate`, rounded to
/// the nearest integer. An empty slice yields 0 — a defined edge case,
/// not an error.
pub fn probability_of<F>(values: &[f64], predicate: F) -> u8
where
    F: Fn(f64) -> bool,
{
    if values.is_empty() {
        return 0;
    }
    let matching = values.iter().copied().filter(|&v| predicate(v)).count();
    (100.0 * matching as f64 / values.len() as f64).round() as u8
}

/// Temperature categories: strict above/below the cutoffs, with the
/// comfortable band closed on both ends.
pub fn temperature_probabilities(
    values: &[f64],
    thresholds: &ThresholdSet,
) -> TemperatureProbabilities {
    TemperatureProbabilities {
        above_threshold: probability_of(values, |v| v > thresholds.temp_hot),
        below_threshold: probability_of(values, |v| v < thresholds.temp_cold),
        comfortable: probability_of(values, |v| {
            v >= thresholds.temp_cold && v <= thresholds.temp_hot
        }),
    }
}

/// Precipitation categories: heavy at or above the cutoff, light strictly
/// between zero and the cutoff, none at exactly zero.
pub fn precipitation_probabilities(
    values: &[f64],
    thresholds: &ThresholdSet,
) -> PrecipitationProbabilities {
    PrecipitationProbabilities {
        heavy_rain: probability_of(values, |v| v >= thresholds.precipitation),
        light_rain: probability_of(values, |v| v > 0.0 && v < thresholds.precipitation),
        no_precip: probability_of(values, |v| v == 0.0),
    }
}

/// Wind categories: very windy at or above the user cutoff, moderate from
/// the fixed floor up to it, calm below the floor.
pub fn wind_probabilities(values: &[f64], thresholds: &ThresholdSet) -> WindProbabilities {
    WindProbabilities {
        very_windy: probability_of(values, |v| v >= thresholds.wind),
        moderate: probability_of(values, |v| v >= MODERATE_WIND_FLOOR && v < thresholds.wind),
        calm: probability_of(values, |v| v < MODERATE_WIND_FLOOR),
    }
}
