//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum Router, TraceLayer)
//!     → dispatcher.rs (derive RequestContext, run handler under deadline)
//!     → handlers.rs (read ?ticker=, call PriceFetcher, write envelope)
//!     → response.rs (ResponseWriter → JSON body + status)
//!     → Send to client (with x-request-id)
//! ```
//!
//! # Design Decisions
//! - The dispatcher is the only writer of error envelopes
//! - A response can be written once; a second write is an error
//! - Every handler failure becomes a 500 with `{"error": ...}`

pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use dispatcher::{ApiHandler, Dispatcher};
pub use error::ApiError;
pub use handlers::{PriceHandler, TICKER_PARAM};
pub use request::{ApiRequest, X_REQUEST_ID};
pub use response::{ResponseEnvelope, ResponseWriter};
pub use server::{bind, PriceServer, ServerError};
