//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! InstrumentedFetcher → record.rs  (one FetchRecord per backend call → RecordSink)
//!                     → metrics.rs (fetch counters, latency histogram)
//! Dispatcher          → metrics.rs (request counters by status)
//! main                → logging.rs (subscriber setup)
//!                     → metrics.rs (optional Prometheus endpoint)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON in production) via `tracing`
//! - Correlation id is a field on every record, never a global
//! - Sinks are passed in explicitly so tests can capture records

pub mod logging;
pub mod metrics;
pub mod record;

pub use record::{FetchRecord, MemorySink, RecordSink, RecordedFetch, TracingSink};
