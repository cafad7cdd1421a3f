//! The seam between the pure pipeline and whatever supplies historical
//! observations (NASA POWER, a database, test fixtures).
//!
//! Fetching is the only asynchronous step in an analysis; once a series
//! is resolved the rest of the pipeline is pure and synchronous.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::ProviderError;
use crate::model::{Location, Observation, ObservationSeries, Variable};
use crate::units::{celsius_to_fahrenheit, mm_to_inches, mps_to_mph};

/// Supplies one historical series per variable/location/calendar-day.
///
/// Implementations own their transport concerns (retries, timeouts,
/// caching); the pipeline only sees a resolved series or a
/// [`ProviderError`].
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    async fn fetch_series(
        &self,
        variable: Variable,
        location: &Location,
        target_date: NaiveDate,
        lookback_years: u32,
    ) -> Result<ObservationSeries, ProviderError>;
}

/// In-memory provider serving pre-loaded series. Used for fixtures in
/// tests and for callers that have already resolved their data.
#[derive(Debug, Clone, Default)]
pub struct FixedSeriesProvider {
    series: HashMap<Variable, ObservationSeries>,
}

impl FixedSeriesProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, variable: Variable, series: ObservationSeries) -> Self {
        self.series.insert(variable, series);
        self
    }
}

#[async_trait]
impl SeriesProvider for FixedSeriesProvider {
    async fn fetch_series(
        &self,
        variable: Variable,
        _location: &Location,
        _target_date: NaiveDate,
        _lookback_years: u32,
    ) -> Result<ObservationSeries, ProviderError> {
        self.series
            .get(&variable)
            .cloned()
            .ok_or_else(|| ProviderError::new(format!("no series loaded for {}", variable)))
    }
}

/// Adapter converting a metric data source (°C, m/s, mm — the units NASA
/// POWER serves) into the imperial units the thresholds are expressed in.
/// Humidity and cloud cover are percentages and pass through unchanged.
#[derive(Debug, Clone)]
pub struct MetricToImperial<P> {
    inner: P,
}

impl<P> MetricToImperial<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

fn convert_value(variable: Variable, value: f64) -> f64 {
    match variable {
        Variable::Temperature => celsius_to_fahrenheit(value),
        Variable::Wind => mps_to_mph(value),
        Variable::Precipitation => mm_to_inches(value),
        Variable::Humidity | Variable::CloudCover => value,
    }
}

#[async_trait]
impl<P: SeriesProvider> SeriesProvider for MetricToImperial<P> {
    async fn fetch_series(
        &self,
        variable: Variable,
        location: &Location,
        target_date: NaiveDate,
        lookback_years: u32,
    ) -> Result<ObservationSeries, ProviderError> {
        let series = self
            .inner
            .fetch_series(variable, location, target_date, lookback_years)
            .await?;

        Ok(ObservationSeries(
            series
                .0
                .into_iter()
                .map(|obs| Observation {
                    year: obs.year,
                    value: obs.value.map(|v| convert_value(variable, v)),
                })
                .collect(),
        ))
    }
}
