//! Analysis aggregator.
//!
//! Orchestrates the threshold classifier and trend estimator per weather
//! variable, then derives the summary percentages, the composite comfort
//! score and the advisory list. Once the series are fetched everything
//! here is a pure function of its inputs; concurrent analyses need no
//! coordination.

use futures::future;

use crate::errors::AnalysisError;
use crate::model::{
    AnalysisRequest, AnalysisResult, AuxiliaryStatistics, ComfortLevel, ComfortScore,
    ObservationSeries, PrecipitationAverages, PrecipitationProbabilities, Summary,
    TemperatureAverages, TemperatureProbabilities, ThresholdSet, TrendEstimate, Variable,
    VariableStatistics, WindAverages, WindProbabilities,
};
use crate::provider::SeriesProvider;
use crate::services::classifier;
use crate::services::trend;

/// Run one full analysis: validate inputs, fetch the per-variable series
/// from `provider`, classify against `request.thresholds`, estimate
/// trends, and derive summary, comfort score and advisories.
///
/// Input validation failures and upstream fetch failures for the three
/// core variables (temperature, precipitation, wind) are fatal. A series
/// with zero valid observations is not: that variable falls back to
/// zeroed statistics and the rest of the analysis proceeds.
pub async fn analyze<P>(
    request: &AnalysisRequest,
    provider: &P,
) -> Result<AnalysisResult, AnalysisError>
where
    P: SeriesProvider + ?Sized,
{
    request.thresholds.validate()?;
    request.location.validate()?;

    let fetch = |variable: Variable| async move {
        provider
            .fetch_series(
                variable,
                &request.location,
                request.target_date,
                request.lookback_years,
            )
            .await
            .map_err(|source| AnalysisError::UpstreamFetch { variable, source })
    };

    // The three core series resolve concurrently; any failure aborts the
    // whole request since the summary cannot be fabricated.
    let (temperature_series, precipitation_series, wind_series) = future::try_join3(
        fetch(Variable::Temperature),
        fetch(Variable::Precipitation),
        fetch(Variable::Wind),
    )
    .await?;

    // Auxiliary variables degrade to omission instead of failing.
    let humidity = if request.include_humidity {
        fetch_auxiliary(provider, Variable::Humidity, request).await
    } else {
        None
    };
    let cloud_cover = if request.include_cloud_cover {
        fetch_auxiliary(provider, Variable::CloudCover, request).await
    } else {
        None
    };

    let temperature = temperature_statistics(temperature_series, &request.thresholds);
    let precipitation = precipitation_statistics(precipitation_series, &request.thresholds);
    let wind = wind_statistics(wind_series, &request.thresholds);

    let summary = Summary {
        very_hot: temperature.probabilities.above_threshold,
        very_cold: temperature.probabilities.below_threshold,
        very_wet: precipitation.probabilities.heavy_rain,
        very_windy: wind.probabilities.very_windy,
        uncomfortable: uncomfortable_index(
            temperature.probabilities.above_threshold,
            precipitation.probabilities.heavy_rain,
        ),
    };

    Ok(AnalysisResult {
        location: request.location.clone(),
        target_date: request.target_date,
        lookback_years: request.lookback_years,
        comfort: comfort_score(&summary),
        advisories: generate_advisories(&summary),
        summary,
        temperature,
        precipitation,
        wind,
        humidity,
        cloud_cover,
    })
}

/// Combined heat+rain discomfort percentage.
///
/// Deliberately combines only two of the four risk factors, matching the
/// behavior existing summary-card consumers were built against.
fn uncomfortable_index(very_hot: u8, very_wet: u8) -> u8 {
    ((very_hot as f64 + very_wet as f64) / 2.0).round() as u8
}

/// Composite 0–100 suitability score: the mean of the four risk
/// percentages subtracted from 100, floored at 0.
pub fn comfort_score(summary: &Summary) -> ComfortScore {
    let discomfort = (summary.very_hot as f64
        + summary.very_cold as f64
        + summary.very_wet as f64
        + summary.very_windy as f64)
        / 4.0;
    let score = (100.0 - discomfort).max(0.0);

    let level = if score >= 80.0 {
        ComfortLevel::EventFriendly
    } else if score >= 60.0 {
        ComfortLevel::MostlyGood
    } else if score >= 40.0 {
        ComfortLevel::Risky
    } else {
        ComfortLevel::NotIdeal
    };

    ComfortScore { score, level }
}

/// Advisory strings in fixed evaluation order: heat, rain, wind, cold.
/// Every triggered advisory appears exactly once; if nothing triggers,
/// exactly one all-clear message is emitted.
pub fn generate_advisories(summary: &Summary) -> Vec<String> {
    let mut advisories = Vec::new();

    if summary.very_hot > 70 {
        advisories.push("Try a morning event instead".to_string());
    }
    if summary.very_wet > 50 {
        advisories.push("Best to reschedule or pick an indoor venue".to_string());
    }
    if summary.very_windy > 60 {
        advisories.push("Consider indoor backup plans".to_string());
    }
    if summary.very_cold > 60 {
        advisories.push("Consider another date with lower cold risk".to_string());
    }

    if advisories.is_empty() {
        advisories.push("You're good to go — low weather risk based on history!".to_string());
    }

    advisories
}

async fn fetch_auxiliary<P>(
    provider: &P,
    variable: Variable,
    request: &AnalysisRequest,
) -> Option<AuxiliaryStatistics>
where
    P: SeriesProvider + ?Sized,
{
    let series = match provider
        .fetch_series(
            variable,
            &request.location,
            request.target_date,
            request.lookback_years,
        )
        .await
    {
        Ok(series) => series,
        Err(err) => {
            tracing::warn!("{} unavailable, omitting from result: {}", variable, err);
            return None;
        }
    };

    let values = series.valid_values();
    if values.is_empty() {
        tracing::warn!("{} series has no valid observations, omitting", variable);
        return None;
    }

    Some(AuxiliaryStatistics {
        average: mean(&values),
        historical: series,
    })
}

fn temperature_statistics(
    series: ObservationSeries,
    thresholds: &ThresholdSet,
) -> VariableStatistics<TemperatureProbabilities, TemperatureAverages> {
    let values = valid_or_warn(&series, Variable::Temperature);

    let (probabilities, averages) = if values.is_empty() {
        (
            TemperatureProbabilities::default(),
            TemperatureAverages::default(),
        )
    } else {
        (
            classifier::temperature_probabilities(&values, thresholds),
            TemperatureAverages {
                high: max(&values),
                low: min(&values),
                mean: mean(&values),
            },
        )
    };

    VariableStatistics {
        probabilities,
        averages,
        trend: resolved_trend(Variable::Temperature, &series),
        historical: series,
    }
}

fn precipitation_statistics(
    series: ObservationSeries,
    thresholds: &ThresholdSet,
) -> VariableStatistics<PrecipitationProbabilities, PrecipitationAverages> {
    let values = valid_or_warn(&series, Variable::Precipitation);

    let (probabilities, averages) = if values.is_empty() {
        (
            PrecipitationProbabilities::default(),
            PrecipitationAverages::default(),
        )
    } else {
        (
            classifier::precipitation_probabilities(&values, thresholds),
            PrecipitationAverages {
                amount: mean(&values),
                rainy_days: values.iter().filter(|&&v| v > 0.0).count() as u32,
            },
        )
    };

    VariableStatistics {
        probabilities,
        averages,
        trend: resolved_trend(Variable::Precipitation, &series),
        historical: series,
    }
}

fn wind_statistics(
    series: ObservationSeries,
    thresholds: &ThresholdSet,
) -> VariableStatistics<WindProbabilities, WindAverages> {
    let values = valid_or_warn(&series, Variable::Wind);

    let (probabilities, averages) = if values.is_empty() {
        (WindProbabilities::default(), WindAverages::default())
    } else {
        (
            classifier::wind_probabilities(&values, thresholds),
            WindAverages {
                speed: mean(&values),
                max_gust: max(&values),
            },
        )
    };

    VariableStatistics {
        probabilities,
        averages,
        trend: resolved_trend(Variable::Wind, &series),
        historical: series,
    }
}

/// Trend with the estimator's division-by-zero condition converted to
/// the flat fallback. The condition is logged, never propagated.
fn resolved_trend(variable: Variable, series: &ObservationSeries) -> TrendEstimate {
    match trend::estimate(series) {
        Ok(trend) => trend,
        Err(err) => {
            tracing::warn!("{} trend unavailable ({}), reporting stable", variable, err);
            TrendEstimate::flat()
        }
    }
}

fn valid_or_warn(series: &ObservationSeries, variable: Variable) -> Vec<f64> {
    let values = series.valid_values();
    if values.is_empty() {
        tracing::warn!(
            "{} series has no valid observations, statistics default to zero",
            variable
        );
    }
    values
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}
