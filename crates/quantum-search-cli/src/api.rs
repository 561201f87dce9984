//! Quantum Search API Client
//!
//! The CLI's [`SearchGateway`]: calls the server's `/api/search` and
//! `/api/ai-summary` endpoints and turns their `{success, ...}` envelopes
//! back into domain values.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use quantum_search::{
    AiSummary, DomainError, Query, SearchGateway, SearchPage, SearchResultItem,
};

/// API Client for the Quantum Search server
pub struct ApiClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData {
    query: String,
    results: Vec<SearchResultItem>,
}

#[derive(Debug, Deserialize)]
struct SummaryData {
    data: AiSummary,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<T, DomainError> {
        let url = format!(
            "{}{}?q={}",
            self.base_url,
            path,
            urlencoding::encode(query.as_str())
        );

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Upstream(format!("Failed to connect to Quantum Search API: {e}")))?;

        let status = resp.status();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| DomainError::Upstream(format!("Failed to parse response ({status}): {e}")))?;

        let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
        if !status.is_success() || !success {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("API error ({status})"));
            return Err(if status == StatusCode::BAD_REQUEST {
                DomainError::Validation(message)
            } else {
                DomainError::Upstream(message)
            });
        }

        serde_json::from_value(body)
            .map_err(|e| DomainError::Upstream(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl SearchGateway for ApiClient {
    async fn fetch_search_results(&self, query: &str) -> Result<SearchPage, DomainError> {
        let query = Query::parse(query)?;
        let data: SearchData = self.get_envelope("/api/search", &query).await?;
        Ok(SearchPage::new(data.query, data.results))
    }

    async fn fetch_ai_summary(&self, query: &str) -> Result<AiSummary, DomainError> {
        let query = Query::parse(query)?;
        let data: SummaryData = self.get_envelope("/api/ai-summary", &query).await?;
        Ok(AiSummary::new(data.data.summary, data.data.key_points))
    }
}
