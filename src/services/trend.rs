//! Trend estimation: relative change between the two halves of a series.

use crate::model::{ObservationSeries, TrendDirection, TrendEstimate};

/// Raw relative change beyond which a trend counts as a real drift
/// rather than noise, percent.
const STABLE_BAND_PCT: f64 = 5.0;

/// Internal failure mode of the estimator. Always caught by the
/// aggregator and converted to the flat fallback; never reaches callers.
#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    #[error("first-half average is zero, relative change is undefined")]
    FirstHalfMeanZero,
}

/// Estimate the long-term drift of a year-ordered series.
///
/// The series is split at floor(n/2): with an odd length the extra
/// element belongs to the second half. `percentChange` is the absolute
/// relative change between the half means; the direction comes from the
/// signed change with a ±5% stable band.
///
/// Fewer than 2 valid observations yield the flat fallback. A first-half
/// mean of exactly zero makes the relative change undefined and is
/// reported as [`TrendError::FirstHalfMeanZero`].
pub fn estimate(series: &ObservationSeries) -> Result<TrendEstimate, TrendError> {
    let values = series.valid_values();
    if values.len() < 2 {
        return Ok(TrendEstimate::flat());
    }

    let split = values.len() / 2;
    let first_avg = mean(&values[..split]);
    let second_avg = mean(&values[split..]);

    if first_avg == 0.0 {
        return Err(TrendError::FirstHalfMeanZero);
    }

    let raw_change = (second_avg - first_avg) / first_avg * 100.0;
    let direction = if raw_change > STABLE_BAND_PCT {
        TrendDirection::Increasing
    } else if raw_change < -STABLE_BAND_PCT {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    Ok(TrendEstimate {
        direction,
        percent_change: raw_change.abs(),
        first_half_average: first_avg,
        second_half_average: second_avg,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Observation, ObservationSeries};

    #[test]
    fn test_empty_series_is_flat() {
        let trend = estimate(&ObservationSeries::default()).unwrap();
        assert_eq!(trend, TrendEstimate::flat());
    }

    #[test]
    fn test_single_observation_is_flat() {
        let series = ObservationSeries::from_pairs(&[(2020, 42.0)]);
        let trend = estimate(&series).unwrap();
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert_eq!(trend.percent_change, 0.0);
    }

    #[test]
    fn test_increasing_trend() {
        // halves average 10 and 20 → +100%
        let series =
            ObservationSeries::from_pairs(&[(2018, 10.0), (2019, 10.0), (2020, 20.0), (2021, 20.0)]);
        let trend = estimate(&series).unwrap();
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert!((trend.percent_change - 100.0).abs() < 1e-9);
        assert_eq!(trend.first_half_average, 10.0);
        assert_eq!(trend.second_half_average, 20.0);
    }

    #[test]
    fn test_decreasing_trend_reports_positive_magnitude() {
        let series =
            ObservationSeries::from_pairs(&[(2018, 20.0), (2019, 20.0), (2020, 10.0), (2021, 10.0)]);
        let trend = estimate(&series).unwrap();
        assert_eq!(trend.direction, TrendDirection::Decreasing);
        assert!((trend.percent_change - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_change_is_stable() {
        // +4% stays inside the stable band
        let series = ObservationSeries::from_pairs(&[(2020, 100.0), (2021, 104.0)]);
        let trend = estimate(&series).unwrap();
        assert_eq!(trend.direction, TrendDirection::Stable);
        assert!((trend.percent_change - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_odd_length_splits_extra_to_second_half() {
        // [10, 20, 30]: first half [10], second half [20, 30]
        let series = ObservationSeries::from_pairs(&[(2019, 10.0), (2020, 20.0), (2021, 30.0)]);
        let trend = estimate(&series).unwrap();
        assert_eq!(trend.first_half_average, 10.0);
        assert_eq!(trend.second_half_average, 25.0);
    }

    #[test]
    fn test_zero_first_half_mean_is_reported() {
        let series = ObservationSeries::from_pairs(&[(2020, 0.0), (2021, 5.0)]);
        assert!(matches!(
            estimate(&series),
            Err(TrendError::FirstHalfMeanZero)
        ));
    }

    #[test]
    fn test_missing_years_are_skipped() {
        // Only the two valid values count: halves 10 and 20
        let series = ObservationSeries(vec![
            Observation::new(2018, 10.0),
            Observation::missing(2019),
            Observation::new(2020, 20.0),
        ]);
        let trend = estimate(&series).unwrap();
        assert_eq!(trend.direction, TrendDirection::Increasing);
        assert_eq!(trend.first_half_average, 10.0);
        assert_eq!(trend.second_half_average, 20.0);
    }
}
