//! Per-call instrumentation records and the sinks that consume them.

use std::sync::Mutex;
use std::time::Duration;

use crate::context::CorrelationId;
use crate::fetcher::FetchError;

/// One backend call, borrowed for the duration of a single `emit`.
#[derive(Debug, Clone, Copy)]
pub struct FetchRecord<'a> {
    /// `None` when the context was never tagged with an id.
    pub correlation_id: Option<&'a CorrelationId>,
    /// Request path the call was made for, when known.
    pub path: Option<&'a str>,
    pub symbol: &'a str,
    /// `0.0` when the call failed.
    pub price: f64,
    pub error: Option<&'a FetchError>,
    pub elapsed: Duration,
}

/// Consumer of fetch records. Must not block.
pub trait RecordSink: Send + Sync {
    fn emit(&self, record: &FetchRecord<'_>);
}

/// Writes each record as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl RecordSink for TracingSink {
    fn emit(&self, record: &FetchRecord<'_>) {
        let request_id = record
            .correlation_id
            .map(ToString::to_string)
            .unwrap_or_default();
        let took_ms = record.elapsed.as_secs_f64() * 1000.0;

        match record.error {
            None => tracing::info!(
                request_id = %request_id,
                path = record.path.unwrap_or_default(),
                symbol = %record.symbol,
                price = record.price,
                took_ms,
                "fetch_price"
            ),
            Some(error) => tracing::warn!(
                request_id = %request_id,
                path = record.path.unwrap_or_default(),
                symbol = %record.symbol,
                price = record.price,
                error = %error,
                took_ms,
                "fetch_price"
            ),
        }
    }
}

/// Owned copy of a [`FetchRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFetch {
    pub correlation_id: Option<CorrelationId>,
    pub path: Option<String>,
    pub symbol: String,
    pub price: f64,
    pub error: Option<FetchError>,
    pub elapsed: Duration,
}

impl From<&FetchRecord<'_>> for RecordedFetch {
    fn from(record: &FetchRecord<'_>) -> Self {
        Self {
            correlation_id: record.correlation_id.copied(),
            path: record.path.map(str::to_string),
            symbol: record.symbol.to_string(),
            price: record.price,
            error: record.error.cloned(),
            elapsed: record.elapsed,
        }
    }
}

/// Keeps every record in memory. Intended for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<RecordedFetch>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<RecordedFetch> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl RecordSink for MemorySink {
    fn emit(&self, record: &FetchRecord<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.into());
        }
    }
}
