//! AiSummary - structured form of the provider's free-text insight

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum number of key points kept from a provider response
pub const MAX_KEY_POINTS: usize = 5;

/// Summary paragraph plus up to five key points, in provider order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiSummary {
    pub summary: String,
    pub key_points: Vec<String>,
}

impl AiSummary {
    pub fn new(summary: impl Into<String>, mut key_points: Vec<String>) -> Self {
        key_points.truncate(MAX_KEY_POINTS);
        Self {
            summary: summary.into(),
            key_points,
        }
    }
}
