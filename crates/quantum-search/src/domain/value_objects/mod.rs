//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod cycle_phase;

pub use cycle_phase::*;
