//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and ports for a search cycle.

mod orchestrator;
mod query_gateway;
mod session;

pub use orchestrator::*;
pub use query_gateway::*;
pub use session::*;
