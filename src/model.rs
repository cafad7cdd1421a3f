//! Core data model for the analysis pipeline.
//!
//! Field names serialize in camelCase to stay byte-compatible with the
//! JSON shape existing consumers (charts, summary cards, exports) read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;
use crate::services::classifier::MODERATE_WIND_FLOOR;

/// Default lookback window when the caller does not choose one.
pub const DEFAULT_LOOKBACK_YEARS: u32 = 10;

/// One physical quantity a historical series can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variable {
    Temperature,
    Precipitation,
    Wind,
    Humidity,
    CloudCover,
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Variable::Temperature => "temperature",
            Variable::Precipitation => "precipitation",
            Variable::Wind => "wind",
            Variable::Humidity => "humidity",
            Variable::CloudCover => "cloud cover",
        };
        f.write_str(name)
    }
}

/// One yearly observation. `value` is `None` when the archive marks the
/// year as missing; missing years are excluded from statistics, never
/// coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(year: i32, value: f64) -> Self {
        Self {
            year,
            value: Some(value),
        }
    }

    pub fn missing(year: i32) -> Self {
        Self { year, value: None }
    }
}

/// An ordered sequence of yearly observations for one variable at one
/// location and calendar day. Years are expected to be unique and ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationSeries(pub Vec<Observation>);

impl ObservationSeries {
    /// Build a series from `(year, value)` pairs with no missing entries.
    pub fn from_pairs(pairs: &[(i32, f64)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|&(year, value)| Observation::new(year, value))
                .collect(),
        )
    }

    /// Valid observation values in year order. Missing and non-finite
    /// entries are excluded.
    pub fn valid_values(&self) -> Vec<f64> {
        self.0
            .iter()
            .filter_map(|obs| obs.value)
            .filter(|v| v.is_finite())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// The place an analysis is requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.into()),
            latitude,
            longitude,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), AnalysisError> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(AnalysisError::InvalidLocation(format!(
                "coordinates ({}, {}) are out of range",
                self.latitude, self.longitude
            )));
        }
        Ok(())
    }
}

/// User-configured cutoffs defining "extreme" per variable.
///
/// All fields are imperial: temperatures in °F, precipitation in inches,
/// wind in mph. Wrap a metric provider in
/// [`crate::provider::MetricToImperial`] to feed metric archives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdSet {
    pub temp_hot: f64,
    pub temp_cold: f64,
    pub precipitation: f64,
    pub wind: f64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            temp_hot: 90.0,
            temp_cold: 32.0,
            precipitation: 0.5,
            wind: 20.0,
        }
    }
}

impl ThresholdSet {
    /// Reject threshold sets that would make the category partitions
    /// nonsensical. Runs before any series is fetched.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.temp_cold >= self.temp_hot {
            return Err(AnalysisError::InvalidThresholds {
                field: "tempCold",
                message: format!(
                    "tempCold ({}) must be below tempHot ({})",
                    self.temp_cold, self.temp_hot
                ),
            });
        }
        if self.precipitation < 0.0 {
            return Err(AnalysisError::InvalidThresholds {
                field: "precipitation",
                message: format!(
                    "precipitation threshold ({}) cannot be negative",
                    self.precipitation
                ),
            });
        }
        // A wind threshold at or below the fixed calm/moderate boundary
        // would leave the "moderate" band empty or negative.
        if self.wind <= MODERATE_WIND_FLOOR {
            return Err(AnalysisError::InvalidThresholds {
                field: "wind",
                message: format!(
                    "wind threshold ({}) must exceed the moderate-wind floor ({})",
                    self.wind, MODERATE_WIND_FLOOR
                ),
            });
        }
        Ok(())
    }
}

/// Long-term drift of a series: relative change between its two halves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEstimate {
    pub direction: TrendDirection,
    /// Magnitude of the relative change, percent, always non-negative.
    pub percent_change: f64,
    pub first_half_average: f64,
    pub second_half_average: f64,
}

impl TrendEstimate {
    /// The "no usable trend" fallback for short or degenerate series.
    pub fn flat() -> Self {
        Self {
            direction: TrendDirection::Stable,
            percent_change: 0.0,
            first_half_average: 0.0,
            second_half_average: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// Temperature category probabilities. The three categories partition all
/// valid observations: `comfortable` is closed on both ends, the extremes
/// are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureProbabilities {
    pub above_threshold: u8,
    pub below_threshold: u8,
    pub comfortable: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecipitationProbabilities {
    pub heavy_rain: u8,
    pub light_rain: u8,
    pub no_precip: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindProbabilities {
    pub very_windy: u8,
    pub moderate: u8,
    pub calm: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureAverages {
    pub high: f64,
    pub low: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecipitationAverages {
    pub amount: f64,
    /// Years in the window with measurable precipitation.
    pub rainy_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindAverages {
    pub speed: f64,
    pub max_gust: f64,
}

/// Per-variable output bundle: category probabilities, named averages,
/// the raw series (passed through for charting) and the trend estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableStatistics<P, A> {
    pub probabilities: P,
    pub averages: A,
    pub historical: ObservationSeries,
    pub trend: TrendEstimate,
}

/// Auxiliary variables (humidity, cloud cover) carry only an average and
/// the series; they have no thresholds and no trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxiliaryStatistics {
    pub average: f64,
    pub historical: ObservationSeries,
}

/// The five headline percentages shown on the summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub very_hot: u8,
    pub very_cold: u8,
    pub very_wet: u8,
    pub very_windy: u8,
    pub uncomfortable: u8,
}

/// Overall outdoor-event suitability, 0 (hopeless) to 100 (ideal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComfortScore {
    pub score: f64,
    pub level: ComfortLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComfortLevel {
    #[serde(rename = "Event-Friendly")]
    EventFriendly,
    #[serde(rename = "Mostly Good")]
    MostlyGood,
    #[serde(rename = "Risky")]
    Risky,
    #[serde(rename = "Not Ideal")]
    NotIdeal,
}

/// Everything the caller supplies to start an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub location: Location,
    pub target_date: NaiveDate,
    pub lookback_years: u32,
    pub thresholds: ThresholdSet,
    /// Include the humidity auxiliary block in the result.
    pub include_humidity: bool,
    /// Include the cloud-cover auxiliary block in the result.
    pub include_cloud_cover: bool,
}

impl AnalysisRequest {
    pub fn new(location: Location, target_date: NaiveDate) -> Self {
        Self {
            location,
            target_date,
            lookback_years: DEFAULT_LOOKBACK_YEARS,
            thresholds: ThresholdSet::default(),
            include_humidity: false,
            include_cloud_cover: false,
        }
    }
}

/// The root aggregate: immutable once produced, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub location: Location,
    pub target_date: NaiveDate,
    pub lookback_years: u32,
    pub summary: Summary,
    pub temperature: VariableStatistics<TemperatureProbabilities, TemperatureAverages>,
    pub precipitation: VariableStatistics<PrecipitationProbabilities, PrecipitationAverages>,
    pub wind: VariableStatistics<WindProbabilities, WindAverages>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<AuxiliaryStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<AuxiliaryStatistics>,
    pub comfort: ComfortScore,
    /// Advisory strings in fixed evaluation order, never reordered.
    pub advisories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_values_excludes_missing() {
        let series = ObservationSeries(vec![
            Observation::new(2020, 55.0),
            Observation::missing(2021),
            Observation::new(2022, 60.0),
        ]);
        assert_eq!(series.valid_values(), vec![55.0, 60.0]);
    }

    #[test]
    fn test_valid_values_excludes_non_finite() {
        let series = ObservationSeries(vec![
            Observation::new(2020, f64::NAN),
            Observation::new(2021, 42.0),
        ]);
        assert_eq!(series.valid_values(), vec![42.0]);
    }

    #[test]
    fn test_default_thresholds_validate() {
        assert!(ThresholdSet::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_temperature_thresholds_rejected() {
        let thresholds = ThresholdSet {
            temp_hot: 32.0,
            temp_cold: 90.0,
            ..ThresholdSet::default()
        };
        let err = thresholds.validate().unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidThresholds { field: "tempCold", .. }
        ));
    }

    #[test]
    fn test_equal_temperature_thresholds_rejected() {
        let thresholds = ThresholdSet {
            temp_hot: 50.0,
            temp_cold: 50.0,
            ..ThresholdSet::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_negative_precipitation_threshold_rejected() {
        let thresholds = ThresholdSet {
            precipitation: -0.1,
            ..ThresholdSet::default()
        };
        let err = thresholds.validate().unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidThresholds {
                field: "precipitation",
                ..
            }
        ));
    }

    #[test]
    fn test_wind_threshold_below_moderate_floor_rejected() {
        // A veryWindy cutoff under the fixed 10 mph calm/moderate boundary
        // would break the wind category partition.
        let thresholds = ThresholdSet {
            wind: 8.0,
            ..ThresholdSet::default()
        };
        let err = thresholds.validate().unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidThresholds { field: "wind", .. }
        ));
    }

    #[test]
    fn test_location_validation() {
        assert!(Location::new("Zurich", 47.37, 8.54).validate().is_ok());
        assert!(Location::new("nowhere", 91.0, 0.0).validate().is_err());
        assert!(Location::new("nowhere", 0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_serialized_field_names_match_consumers() {
        let summary = Summary {
            very_hot: 40,
            very_cold: 0,
            very_wet: 20,
            very_windy: 10,
            uncomfortable: 30,
        };
        let json = serde_json::to_string(&summary).unwrap();
        for name in ["veryHot", "veryCold", "veryWet", "veryWindy", "uncomfortable"] {
            assert!(json.contains(name), "missing field {} in {}", name, json);
        }

        let probs = TemperatureProbabilities {
            above_threshold: 40,
            below_threshold: 0,
            comfortable: 60,
        };
        let json = serde_json::to_string(&probs).unwrap();
        for name in ["aboveThreshold", "belowThreshold", "comfortable"] {
            assert!(json.contains(name), "missing field {} in {}", name, json);
        }
    }

    #[test]
    fn test_comfort_level_serializes_display_labels() {
        assert_eq!(
            serde_json::to_string(&ComfortLevel::EventFriendly).unwrap(),
            "\"Event-Friendly\""
        );
        assert_eq!(
            serde_json::to_string(&ComfortLevel::MostlyGood).unwrap(),
            "\"Mostly Good\""
        );
    }

    #[test]
    fn test_series_round_trips_as_bare_array() {
        let series = ObservationSeries::from_pairs(&[(2015, 60.0), (2016, 95.0)]);
        let json = serde_json::to_string(&series).unwrap();
        assert!(json.starts_with('['), "series must serialize as an array");
        let back: ObservationSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
    }
}
