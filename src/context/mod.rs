//! Request-scoped context.
//!
//! # Data Flow
//! ```text
//! startup:  RequestContext::base(service)        (built once, never mutated)
//! request:  base.with_correlation_id(id)
//!               .with_path(path)
//!               .with_deadline(now + timeout)     (each call returns a new value)
//!     → handler → fetcher decorators → backend    (borrowed, read-only)
//! ```
//!
//! # Design Decisions
//! - Typed fields instead of a key/value bag
//! - Derivation consumes or clones; a parent is never written through a child

pub mod correlation;

use std::sync::Arc;
use std::time::Instant;

pub use correlation::{CorrelationId, CorrelationIdGenerator, SequentialGenerator, UuidGenerator};

/// Metadata carried alongside a single request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    service: Arc<str>,
    correlation_id: Option<CorrelationId>,
    path: Option<String>,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Process-wide template that every request context is derived from.
    pub fn base(service: impl Into<Arc<str>>) -> Self {
        Self {
            service: service.into(),
            correlation_id: None,
            path: None,
            deadline: None,
        }
    }

    pub fn with_correlation_id(&self, id: CorrelationId) -> Self {
        Self {
            correlation_id: Some(id),
            ..self.clone()
        }
    }

    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..self.clone()
        }
    }

    pub fn with_deadline(&self, deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..self.clone()
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Correlation id, if this context was derived for a request.
    pub fn correlation_id(&self) -> Option<&CorrelationId> {
        self.correlation_id.as_ref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
