//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid, prices >= 0)

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} must be host:port or :port")]
    BindAddress(String),

    #[error("server.path {0:?} must start with '/'")]
    Path(String),

    /// Rejected by the router: `:name` segments, empty, nested or unbalanced
    /// `{}` captures, or a `{*rest}` catch-all before the last segment.
    #[error("server.path {0:?} is not a valid route (captures are written {{name}})")]
    Route(String),

    #[error("server.request_timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("backend.prices contains an empty symbol")]
    EmptySymbol,

    #[error("backend.prices.{0} must be an upper-case symbol")]
    Symbol(String),

    #[error("backend.prices.{symbol} = {price} is not a non-negative number")]
    Price { symbol: String, price: f64 },

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Run every check and report all failures at once.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !has_valid_port(&config.listener.resolved_address()) {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if !config.server.path.starts_with('/') {
        errors.push(ValidationError::Path(config.server.path.clone()));
    } else if !is_routable_path(&config.server.path) {
        errors.push(ValidationError::Route(config.server.path.clone()));
    }

    if config.server.request_timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    for (symbol, price) in &config.backend.prices {
        if symbol.is_empty() {
            errors.push(ValidationError::EmptySymbol);
        } else if *symbol != symbol.to_uppercase() {
            errors.push(ValidationError::Symbol(symbol.clone()));
        }
        if !price.is_finite() || *price < 0.0 {
            errors.push(ValidationError::Price {
                symbol: symbol.clone(),
                price: *price,
            });
        }
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn has_valid_port(addr: &str) -> bool {
    match addr.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

fn is_routable_path(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').collect();
    segments.iter().enumerate().all(|(i, segment)| {
        let catch_all_last = !segment.contains("{*") || i == segments.len() - 1;
        !segment.starts_with(':') && has_balanced_captures(segment) && catch_all_last
    })
}

fn has_balanced_captures(segment: &str) -> bool {
    let mut capture: Option<usize> = None;
    for c in segment.chars() {
        capture = match (c, capture) {
            ('{', Some(_)) => return false,
            ('{', None) => Some(0),
            ('}', None) => return false,
            ('}', Some(0)) => return false,
            ('}', Some(_)) => None,
            (_, Some(len)) => Some(len + 1),
            (_, None) => None,
        };
    }
    capture.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_problem() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "localhost".into();
        config.server.path = "quotes".into();
        config.server.request_timeout_ms = 0;
        config.backend.prices.insert("BAD".into(), -1.0);
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::Path("quotes".into()),
                ValidationError::ZeroTimeout,
                ValidationError::Price {
                    symbol: "BAD".into(),
                    price: -1.0
                },
                ValidationError::LogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("nowhere".into())])
        );
    }

    #[test]
    fn test_paths_the_router_rejects() {
        let paths = ["/:ticker", "/price/{ticker", "/price/ticker}", "/{}", "/{{a}}", "/{*rest}/x"];
        for path in paths {
            let mut config = ServiceConfig::default();
            config.server.path = path.into();
            assert_eq!(
                validate_config(&config),
                Err(vec![ValidationError::Route(path.into())]),
                "path {path:?}"
            );
        }
    }

    #[test]
    fn test_paths_the_router_accepts() {
        for path in ["/", "/price", "/price/{kind}", "/v1/{*rest}", "/a:b"] {
            let mut config = ServiceConfig::default();
            config.server.path = path.into();
            assert_eq!(validate_config(&config), Ok(()), "path {path:?}");
        }
    }

    #[test]
    fn test_price_symbols_must_be_upper_case() {
        let mut config = ServiceConfig::default();
        config.backend.prices.insert("doge".into(), 0.25);
        config.backend.prices.insert("Shib".into(), 0.01);
        config.backend.prices.insert("PEPE".into(), 0.5);

        assert_eq!(
            validate_config(&config),
            Err(vec![
                ValidationError::Symbol("Shib".into()),
                ValidationError::Symbol("doge".into()),
            ])
        );
    }

    #[test]
    fn test_port_parsing() {
        assert!(has_valid_port("0.0.0.0:3000"));
        assert!(has_valid_port("localhost:80"));
        assert!(has_valid_port("[::1]:3000"));
        assert!(!has_valid_port("0.0.0.0:http"));
        assert!(!has_valid_port("0.0.0.0:70000"));
    }
}
