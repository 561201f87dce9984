//! Key-Value Store Port
//!
//! A minimal get/set capability for small pieces of client state. Values are
//! read and written whole.

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Key-value persistence interface
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
