//! Metrics collection and exposition.
//!
//! # Metrics
//! - `price_fetch_total` (counter): backend calls by `outcome`
//! - `price_fetch_duration_seconds` (histogram): backend latency
//! - `http_requests_total` (counter): responses by `status`
//! - `http_request_duration_seconds` (histogram): end-to-end latency
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder with a scrape endpoint on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_fetch(outcome: &'static str, elapsed: Duration) {
    metrics::counter!("price_fetch_total", "outcome" => outcome).increment(1);
    metrics::histogram!("price_fetch_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("http_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("http_request_duration_seconds").record(start.elapsed().as_secs_f64());
}
