//! Domain Services
//!
//! Stateless logic that does not belong to a single entity.

mod summary_extractor;

pub use summary_extractor::*;
