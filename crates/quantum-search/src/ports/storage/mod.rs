//! Storage Ports
//!
//! Abstract interfaces for persisting session data.

mod key_value;

pub use key_value::*;
