//! Adapters Layer
//!
//! Concrete implementations of the domain ports.

pub mod zai;

pub use zai::{ZaiClient, ZaiConfig};
