//! Domain Entities
//!
//! Core business objects of a search cycle.

mod bundle;
mod history;
mod query;
mod search_result;
mod summary;

pub use bundle::*;
pub use history::*;
pub use query::*;
pub use search_result::*;
pub use summary::*;
