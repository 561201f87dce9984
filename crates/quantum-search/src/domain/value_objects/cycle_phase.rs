//! CyclePhase - where a query cycle currently stands

use serde::{Deserialize, Serialize};

/// Phase of the current search cycle
///
/// ```text
/// Idle -> Searching -> SearchFailed
///                   -> SummaryPending -> PartialResult
///                                     -> FullResult
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// Landing view, nothing in flight
    #[default]
    Idle,
    /// Search request in flight
    Searching,
    /// Search failed; the cycle ended without results
    SearchFailed,
    /// Results are showing, summary request in flight
    SummaryPending,
    /// Results are showing, the summary could not be produced
    PartialResult,
    /// Results and summary are both showing
    FullResult,
}

impl CyclePhase {
    /// True once the cycle can no longer change on its own
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CyclePhase::Idle
                | CyclePhase::SearchFailed
                | CyclePhase::PartialResult
                | CyclePhase::FullResult
        )
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CyclePhase::Idle => write!(f, "idle"),
            CyclePhase::Searching => write!(f, "searching"),
            CyclePhase::SearchFailed => write!(f, "search_failed"),
            CyclePhase::SummaryPending => write!(f, "summary_pending"),
            CyclePhase::PartialResult => write!(f, "partial_result"),
            CyclePhase::FullResult => write!(f, "full_result"),
        }
    }
}
