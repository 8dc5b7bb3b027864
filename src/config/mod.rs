//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! price-service.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (--listen-addr)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    normalize_listen_addr, BackendConfig, CorrelationIdKind, ListenerConfig, LogFormat,
    ObservabilityConfig, ServerConfig, ServiceConfig,
};
pub use validation::{validate_config, ValidationError};
