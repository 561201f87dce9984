//! Service Ports
//!
//! Abstract interfaces for external services.

mod llm_provider;
mod search_gateway;
mod web_search;

pub use llm_provider::*;
pub use search_gateway::*;
pub use web_search::*;
