//! Search results - what the web search provider hands back

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single web search hit, ordered by the provider's relevance rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub url: String,
    pub title: String,
    pub snippet: String,
    /// Source host (e.g., "en.wikipedia.org")
    pub host_name: String,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
}

impl SearchResultItem {
    /// Parse a provider date string.
    ///
    /// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates; placeholders
    /// such as `"N/A"` and anything else unparseable yield `None`.
    pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
        let raw = raw?.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("n/a") {
            return None;
        }

        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
            .or_else(|| {
                raw.get(..10)
                    .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            })
    }
}

/// Successful search response: results in provider order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<SearchResultItem>,
}

impl SearchPage {
    pub fn new(query: impl Into<String>, results: Vec<SearchResultItem>) -> Self {
        Self {
            query: query.into(),
            total_results: results.len(),
            results,
        }
    }
}
