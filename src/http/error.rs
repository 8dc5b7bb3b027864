//! Handler-level errors.
//!
//! `Display` of an [`ApiError`] is the `error` field of the envelope sent to
//! the caller.

use std::time::Duration;

use thiserror::Error;

use crate::fetcher::{FetchError, QuoteError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error("missing query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("failed to encode response: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("response already written")]
    ResponseAlreadyWritten,

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("handler completed without writing a response")]
    NoResponse,
}
