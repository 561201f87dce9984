//! Search Gateway Port
//!
//! The two remote operations a search cycle performs. The server implements
//! this directly over the providers; front-ends implement it over HTTP.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, AiSummary, SearchPage};

/// Remote query operations.
///
/// Implementations must reject an empty or whitespace-only query with
/// [`DomainError::Validation`] before touching the network, and must report
/// provider failures as [`DomainError::Upstream`] carrying the provider's
/// error text. Neither operation retries.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Web results for `query`, in provider rank order
    async fn fetch_search_results(&self, query: &str) -> Result<SearchPage, DomainError>;

    /// Summary and key points for `query`
    async fn fetch_ai_summary(&self, query: &str) -> Result<AiSummary, DomainError>;
}
