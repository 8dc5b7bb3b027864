//! In-memory backend with a fixed price table.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Instant};

use crate::config::BackendConfig;
use crate::context::RequestContext;
use crate::fetcher::{FetchError, PriceFetcher};

/// Simulated network latency of the default mock.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(100);

/// Table served when no overrides are configured.
pub const DEFAULT_PRICES: [(&str, f64); 7] = [
    ("BTC", 100_000.0),
    ("ETH", 1_000.0),
    ("XRP", 1.0),
    ("SOL", 100.0),
    ("DOT", 10.0),
    ("LINK", 100.0),
    ("UNI", 1_000.0),
];

/// Backend answering from a lookup table that is read-only after construction.
#[derive(Debug, Clone)]
pub struct MockFetcher {
    prices: HashMap<String, f64>,
    latency: Duration,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            prices: DEFAULT_PRICES
                .iter()
                .map(|(symbol, price)| (symbol.to_string(), *price))
                .collect(),
            latency: DEFAULT_LATENCY,
        }
    }

    /// Build from the `[backend]` config section: default table plus overrides.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new()
            .with_prices(config.prices.iter().map(|(k, v)| (k.clone(), *v)))
            .with_latency(Duration::from_millis(config.latency_ms))
    }

    /// Add or replace table entries.
    pub fn with_prices<I, S>(mut self, prices: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.prices
            .extend(prices.into_iter().map(|(symbol, price)| (symbol.into(), price)));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }

    async fn simulate_latency(&self, ctx: &RequestContext, symbol: &str) -> Result<(), FetchError> {
        if self.latency.is_zero() {
            return Ok(());
        }

        match ctx.deadline() {
            Some(deadline) => {
                let deadline = Instant::from_std(deadline);
                time::timeout_at(deadline, time::sleep(self.latency))
                    .await
                    .map_err(|_| FetchError::DeadlineExceeded {
                        ticker: symbol.to_string(),
                    })
            }
            None => {
                time::sleep(self.latency).await;
                Ok(())
            }
        }
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceFetcher for MockFetcher {
    async fn fetch_price(&self, ctx: &RequestContext, symbol: &str) -> Result<f64, FetchError> {
        self.simulate_latency(ctx, symbol).await?;

        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| FetchError::not_found(symbol))
    }
}
