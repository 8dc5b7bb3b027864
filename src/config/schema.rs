//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the price service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listen address.
    pub listener: ListenerConfig,

    /// Route and request handling.
    pub server: ServerConfig,

    /// Mock backend settings.
    pub backend: BackendConfig,

    /// Logging, correlation ids and metrics.
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address. A bare `:port` binds every interface.
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: ":3000".to_string(),
        }
    }
}

impl ListenerConfig {
    /// Bind address in `host:port` form.
    pub fn resolved_address(&self) -> String {
        normalize_listen_addr(&self.bind_address)
    }
}

/// Expand `:3000` to `0.0.0.0:3000`; anything else is returned as is.
pub fn normalize_listen_addr(addr: &str) -> String {
    match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{}", port),
        None => addr.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Path the price handler is mounted on. `/` also matches every sub-path.
    pub path: String,

    /// Upper bound for one request, including the backend call.
    pub request_timeout_ms: u64,

    /// Reported in logs and in the base request context.
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            request_timeout_ms: 5_000,
            service_name: "price-service".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Simulated latency per lookup in milliseconds (0 disables).
    pub latency_ms: u64,

    /// Upper-case the `ticker` parameter before the lookup.
    pub normalize_symbols: bool,

    /// Entries added to (or replacing) the built-in table.
    pub prices: BTreeMap<String, f64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            latency_ms: 100,
            normalize_symbols: false,
            prices: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationIdKind {
    /// Random v4 UUIDs.
    #[default]
    Uuid,
    /// Process-local counter.
    Sequential,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    pub correlation_ids: CorrelationIdKind,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            correlation_ids: CorrelationIdKind::Uuid,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
