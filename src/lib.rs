//! Historical-weather odds for outdoor-event planning.
//!
//! Given a location, a calendar date and user thresholds, this crate turns
//! historical observation series into threshold-exceedance probabilities,
//! half-split trend estimates, a composite 0–100 comfort score and a fixed
//! ordered list of advisories. The pipeline itself is pure and synchronous;
//! the only asynchronous step is fetching series through the injected
//! [`provider::SeriesProvider`].
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use weather_odds::model::{AnalysisRequest, Location, ObservationSeries, Variable};
//! use weather_odds::provider::FixedSeriesProvider;
//!
//! # async fn run() -> Result<(), weather_odds::AnalysisError> {
//! let provider = FixedSeriesProvider::new()
//!     .with_series(
//!         Variable::Temperature,
//!         ObservationSeries::from_pairs(&[(2015, 60.0), (2016, 95.0), (2017, 40.0)]),
//!     )
//!     .with_series(Variable::Precipitation, ObservationSeries::from_pairs(&[(2016, 0.3)]))
//!     .with_series(Variable::Wind, ObservationSeries::from_pairs(&[(2016, 12.0)]));
//!
//! let request = AnalysisRequest::new(
//!     Location::new("Zurich", 47.37, 8.54),
//!     NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
//! );
//! let result = weather_odds::analyze(&request, &provider).await?;
//! println!("comfort: {}/100", result.comfort.score);
//! # Ok(())
//! # }
//! ```

pub mod comfort;
pub mod errors;
pub mod model;
pub mod provider;
pub mod services;
pub mod units;

pub use errors::{AnalysisError, ProviderError};
pub use model::{AnalysisRequest, AnalysisResult, ThresholdSet};
pub use provider::SeriesProvider;
pub use services::analysis::analyze;
