//! ResultBundle - everything the results view renders for one query

use serde::{Deserialize, Serialize};

use super::{AiSummary, Query, SearchPage, SearchResultItem};

/// Results of one cycle. `summary` stays `None` until (and unless) the
/// summary request succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBundle {
    pub query: Query,
    pub results: Vec<SearchResultItem>,
    pub summary: Option<AiSummary>,
}

impl ResultBundle {
    pub fn from_page(query: Query, page: SearchPage) -> Self {
        Self {
            query,
            results: page.results,
            summary: None,
        }
    }

    /// Replacement bundle carrying the summary
    pub fn with_summary(&self, summary: AiSummary) -> Self {
        Self {
            query: self.query.clone(),
            results: self.results.clone(),
            summary: Some(summary),
        }
    }
}
