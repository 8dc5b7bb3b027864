//! JSON price quote service.
//!
//! A business handler sits behind a dispatcher that owns the per-request
//! context and the error envelope; prices come from a pluggable
//! [`PriceFetcher`] stack.

pub mod config;
pub mod context;
pub mod fetcher;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use context::RequestContext;
pub use fetcher::{InstrumentedFetcher, MockFetcher, PriceFetcher};
pub use http::PriceServer;
pub use lifecycle::Shutdown;
