//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain and application layers
//! interact with external systems (providers, persistence).
//!
//! Implementations of these traits live in the server and CLI crates.

pub mod services;
pub mod storage;

// Re-exports
pub use services::*;
pub use storage::*;
