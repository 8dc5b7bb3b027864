//! Quote types.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Largest integer an f64 holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A price for one ticker, as returned to HTTP callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub ticker: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
}

/// Integral prices are written without a fractional part (`100000`, not `100000.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    #[error("ticker must not be empty")]
    EmptyTicker,

    /// Negative, NaN or infinite.
    #[error("invalid price {price} for ticker ({ticker})")]
    InvalidPrice { ticker: String, price: f64 },
}

impl PriceQuote {
    pub fn new(ticker: impl Into<String>, price: f64) -> Result<Self, QuoteError> {
        let ticker = ticker.into();
        if ticker.is_empty() {
            return Err(QuoteError::EmptyTicker);
        }
        if !price.is_finite() || price < 0.0 {
            return Err(QuoteError::InvalidPrice { ticker, price });
        }
        Ok(Self { ticker, price })
    }
}
