//! Instrumentation decorator.
//!
//! Wraps any [`PriceFetcher`] and emits one [`FetchRecord`] per call, success or
//! failure. The inner result is returned untouched.

use std::sync::Arc;
use tokio::time::Instant;

use async_trait::async_trait;

use crate::context::RequestContext;
use crate::fetcher::{FetchError, PriceFetcher};
use crate::observability::metrics;
use crate::observability::{FetchRecord, RecordSink, TracingSink};

pub struct InstrumentedFetcher<F> {
    inner: F,
    sink: Arc<dyn RecordSink>,
}

impl<F: PriceFetcher> InstrumentedFetcher<F> {
    /// Decorate `inner`, logging through `tracing`.
    pub fn new(inner: F) -> Self {
        Self::with_sink(inner, Arc::new(TracingSink))
    }

    pub fn with_sink(inner: F, sink: Arc<dyn RecordSink>) -> Self {
        Self { inner, sink }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: PriceFetcher> PriceFetcher for InstrumentedFetcher<F> {
    async fn fetch_price(&self, ctx: &RequestContext, symbol: &str) -> Result<f64, FetchError> {
        let start = Instant::now();
        let result = self.inner.fetch_price(ctx, symbol).await;
        let elapsed = start.elapsed();

        let record = FetchRecord {
            correlation_id: ctx.correlation_id(),
            path: ctx.path(),
            symbol,
            price: result.as_ref().copied().unwrap_or(0.0),
            error: result.as_ref().err(),
            elapsed,
        };
        self.sink.emit(&record);
        metrics::record_fetch(
            result.as_ref().err().map_or("ok", FetchError::kind),
            elapsed,
        );

        result
    }
}
