//! Correlation id generation.
//!
//! Two generators are provided:
//! - [`UuidGenerator`]: random v4 UUIDs (122 random bits). Collision probability
//!   stays below 1e-18 for the first few billion ids.
//! - [`SequentialGenerator`]: a process-local counter. Ids never repeat within a
//!   process but restart at 1 after a restart.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use uuid::Uuid;

/// Identifier tagging every log record and response of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CorrelationId {
    Uuid(Uuid),
    Sequential(u64),
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationId::Uuid(id) => write!(f, "{}", id),
            CorrelationId::Sequential(n) => write!(f, "{}", n),
        }
    }
}

/// Source of fresh correlation ids. Shared by all request tasks.
pub trait CorrelationIdGenerator: Send + Sync {
    fn next_id(&self) -> CorrelationId;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl CorrelationIdGenerator for UuidGenerator {
    fn next_id(&self) -> CorrelationId {
        CorrelationId::Uuid(Uuid::new_v4())
    }
}

#[derive(Debug)]
pub struct SequentialGenerator {
    next: AtomicU64,
}

impl SequentialGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrelationIdGenerator for SequentialGenerator {
    fn next_id(&self) -> CorrelationId {
        CorrelationId::Sequential(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
