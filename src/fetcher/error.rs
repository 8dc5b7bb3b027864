//! Backend error definitions.

use thiserror::Error;

/// Errors returned by a [`PriceFetcher`](super::PriceFetcher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Symbol is absent from the backend's known set.
    #[error("price for ticker ({ticker}) is not available")]
    NotFound { ticker: String },

    /// The request deadline passed before the backend answered.
    #[error("price lookup for ticker ({ticker}) exceeded the request deadline")]
    DeadlineExceeded { ticker: String },
}

impl FetchError {
    pub fn not_found(ticker: impl Into<String>) -> Self {
        FetchError::NotFound {
            ticker: ticker.into(),
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::NotFound { .. } => "not_found",
            FetchError::DeadlineExceeded { .. } => "deadline_exceeded",
        }
    }
}
