//! Web Search Service Port
//!
//! Abstract interface for web search operations.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, SearchResultItem};

/// Service interface for web search operations
///
/// Ranking is entirely the provider's business: results come back in the
/// order they should be shown.
#[async_trait]
pub trait WebSearchService: Send + Sync {
    /// Search the web for a query, returning at most `limit` results
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResultItem>, DomainError>;
}
