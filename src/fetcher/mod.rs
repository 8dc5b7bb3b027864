//! Price backends and their decorators.
//!
//! # Data Flow
//! ```text
//! handler
//!     → InstrumentedFetcher   (records duration, correlation id, outcome)
//!     → [further decorators]  (any type implementing PriceFetcher)
//!     → MockFetcher           (read-only lookup table)
//! ```
//!
//! # Design Decisions
//! - Decorators own the fetcher they wrap; composition happens once at startup
//! - Object safe via `async_trait` so the server can hold `Arc<dyn PriceFetcher>`
//! - A decorator never rewrites the inner result

pub mod error;
pub mod instrumented;
pub mod mock;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RequestContext;

pub use error::FetchError;
pub use instrumented::InstrumentedFetcher;
pub use mock::MockFetcher;
pub use types::{PriceQuote, QuoteError};

/// Capability to look up the current price of a symbol.
///
/// `symbol` is passed through verbatim; implementations do not normalize case.
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    async fn fetch_price(&self, ctx: &RequestContext, symbol: &str) -> Result<f64, FetchError>;
}

#[async_trait]
impl<F: PriceFetcher + ?Sized> PriceFetcher for Arc<F> {
    async fn fetch_price(&self, ctx: &RequestContext, symbol: &str) -> Result<f64, FetchError> {
        (**self).fetch_price(ctx, symbol).await
    }
}

#[async_trait]
impl<F: PriceFetcher + ?Sized> PriceFetcher for Box<F> {
    async fn fetch_price(&self, ctx: &RequestContext, symbol: &str) -> Result<f64, FetchError> {
        (**self).fetch_price(ctx, symbol).await
    }
}
