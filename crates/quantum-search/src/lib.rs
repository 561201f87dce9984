//! Quantum Search Domain Library
//!
//! Core types, ports and use cases for a search front-end that pairs web
//! results with an AI-generated summary.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure entities and logic
//!   - `entities/`: Query, SearchResultItem, AiSummary, ResultBundle, SearchHistory
//!   - `services/`: The summary extractor
//!   - `errors/`: Domain error taxonomy
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: Web search provider, LLM provider, search gateway
//!   - `storage/`: Key-value persistence capability
//!
//! - **Application** (`application/`): Use cases
//!   - `QueryGateway`: search + summary over provider ports
//!   - `Orchestrator`: the per-query cycle state machine
//!   - `HistoryStore`: persisted search history
//!
//! # Usage
//!
//! ```rust,ignore
//! use quantum_search::{Orchestrator, OrchestratorConfig, QueryGateway};
//!
//! let gateway = Arc::new(QueryGateway::new(web_search, llm));
//! let orchestrator = Orchestrator::open(gateway, store, OrchestratorConfig::default()).await;
//! orchestrator.submit("rust async runtimes").await;
//! ```

pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use application::{
    CycleOutcome, HistoryStore, Orchestrator, OrchestratorConfig, QueryGateway, ViewState,
    HISTORY_KEY,
};
pub use domain::{
    extract_summary, AiSummary, CyclePhase, DomainError, Query, ResultBundle, SearchHistory,
    SearchPage, SearchResultItem, HISTORY_CAPACITY, MAX_KEY_POINTS,
};
pub use ports::{
    ChatMessage, CompletionOptions, CompletionResponse, KeyValueStore, LlmProvider, MessageRole,
    SearchGateway, TokenUsage, WebSearchService,
};
