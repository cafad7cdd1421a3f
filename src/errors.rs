use crate::model::Variable;

/// Failures the analysis entry point can surface to the caller.
///
/// `InvalidThresholds`/`InvalidLocation` mean bad input and are raised
/// before any series is fetched; `UpstreamFetch` means the data source
/// was unreachable and the analysis cannot be fabricated. Per-variable
/// insufficient data is recoverable and never reaches the caller as an
/// error — the affected variable falls back to zeroed statistics with a
/// warning at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid thresholds ({field}): {message}")]
    InvalidThresholds {
        field: &'static str,
        message: String,
    },

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Upstream data source failed for {variable}: {source}")]
    UpstreamFetch {
        variable: Variable,
        source: ProviderError,
    },
}

/// Transport-level failure reported by a series provider.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
