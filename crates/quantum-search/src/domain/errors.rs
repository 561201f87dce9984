//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected before any provider call (e.g. an empty query)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider failed or returned nothing usable. Carries the provider's raw error text.
    #[error("{0}")]
    Upstream(String),

    /// Reading or writing persisted session data failed
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A client-side deadline elapsed before the provider answered
    #[error("{operation} timed out after {seconds}s")]
    Timeout { operation: String, seconds: u64 },
}

impl DomainError {
    pub fn empty_query() -> Self {
        Self::Validation("Query parameter is required".to_string())
    }

    pub fn timeout<T: AsRef<str>>(operation: T, after: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.as_ref().to_string(),
            seconds: after.as_secs(),
        }
    }

    /// True for errors the HTTP surface reports as a client mistake (400)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
