//! Orchestrator - the per-query search cycle
//!
//! One cycle runs search, then (only if search succeeded) summary, publishing
//! every transition through a `watch` channel:
//!
//! ```text
//! Idle -> Searching -> SearchFailed
//!                   -> SummaryPending -> PartialResult | FullResult
//! ```
//!
//! Every cycle gets a monotonically increasing id. A step only lands if its
//! id is still the current one, so a slow answer for an older query can never
//! overwrite a newer query's bundle.

use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};

use super::session::HistoryStore;
use crate::domain::{CyclePhase, DomainError, Query, ResultBundle, SearchHistory};
use crate::ports::{KeyValueStore, SearchGateway};

/// Timeouts applied around the gateway calls
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub search_timeout: Duration,
    pub summary_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            search_timeout: Duration::from_secs(15),
            summary_timeout: Duration::from_secs(20),
        }
    }
}

/// Everything a front-end needs to render the current screen
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewState {
    /// Id of the most recently started (or abandoned) cycle
    pub cycle: u64,
    pub phase: CyclePhase,
    pub query: Option<Query>,
    /// Page-level loading indicator; cleared as soon as search resolves
    pub is_searching: bool,
    /// Results view vs. landing view
    pub show_results: bool,
    pub bundle: Option<ResultBundle>,
    pub history: SearchHistory,
}

impl ViewState {
    /// True while results are showing but the summary has not arrived
    pub fn summary_pending(&self) -> bool {
        self.phase == CyclePhase::SummaryPending
    }
}

/// How a call to [`Orchestrator::submit`] ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Blank query; no cycle was started
    Rejected(DomainError),
    /// Search failed; the view stayed on the landing screen
    SearchFailed(DomainError),
    /// Results shown without a summary
    Partial(ResultBundle),
    /// Results and summary shown
    Full(ResultBundle),
    /// A newer cycle (or a new search) took over before this one finished
    Superseded,
}

/// Drives search cycles and owns the view state
pub struct Orchestrator {
    gateway: Arc<dyn SearchGateway>,
    history_store: HistoryStore,
    config: OrchestratorConfig,
    state: watch::Sender<ViewState>,
    /// Serializes history writes; each one saves the latest history
    history_writes: Mutex<()>,
}

impl Orchestrator {
    /// Create an orchestrator with an empty history
    pub fn new(
        gateway: Arc<dyn SearchGateway>,
        store: Arc<dyn KeyValueStore>,
        config: OrchestratorConfig,
    ) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            gateway,
            history_store: HistoryStore::new(store),
            config,
            state,
            history_writes: Mutex::new(()),
        }
    }

    /// Create an orchestrator and restore the persisted history
    pub async fn open(
        gateway: Arc<dyn SearchGateway>,
        store: Arc<dyn KeyValueStore>,
        config: OrchestratorConfig,
    ) -> Self {
        let orchestrator = Self::new(gateway, store, config);
        let history = orchestrator.history_store.load().await;
        orchestrator.state.send_modify(|s| s.history = history);
        orchestrator
    }

    /// Current view state
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receive every view state change
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn history(&self) -> SearchHistory {
        self.state.borrow().history.clone()
    }

    /// Run one search cycle for `raw`.
    ///
    /// Blank input is rejected without touching state. Otherwise the query is
    /// recorded in history, searched, and, if search succeeded, summarized.
    /// Nothing is retried.
    pub async fn submit(&self, raw: &str) -> CycleOutcome {
        let query = match Query::parse(raw) {
            Ok(query) => query,
            Err(e) => {
                tracing::debug!("Ignoring blank query");
                return CycleOutcome::Rejected(e);
            }
        };

        let mut cycle = 0;
        self.state.send_modify(|s| {
            s.cycle += 1;
            cycle = s.cycle;
            s.phase = CyclePhase::Searching;
            s.query = Some(query.clone());
            s.is_searching = true;
            s.show_results = false;
            s.bundle = None;
            s.history.record(query.as_str());
        });

        tracing::info!("🔍 Cycle {} started: {}", cycle, query);

        self.persist_history().await;

        let searched = with_timeout(
            "search",
            self.config.search_timeout,
            self.gateway.fetch_search_results(query.as_str()),
        )
        .await;

        let page = match searched {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("❌ Cycle {} search failed for '{}': {}", cycle, query, e);
                let applied = self.apply(cycle, |s| {
                    s.phase = CyclePhase::SearchFailed;
                    s.is_searching = false;
                    s.show_results = false;
                    s.bundle = None;
                });
                return if applied {
                    CycleOutcome::SearchFailed(e)
                } else {
                    CycleOutcome::Superseded
                };
            }
        };

        let bundle = ResultBundle::from_page(query.clone(), page);
        let applied = self.apply(cycle, |s| {
            s.phase = CyclePhase::SummaryPending;
            s.is_searching = false;
            s.show_results = true;
            s.bundle = Some(bundle.clone());
        });
        if !applied {
            tracing::debug!("Discarding stale search results of cycle {}", cycle);
            return CycleOutcome::Superseded;
        }

        let summarized = with_timeout(
            "summary",
            self.config.summary_timeout,
            self.gateway.fetch_ai_summary(query.as_str()),
        )
        .await;

        match summarized {
            Ok(summary) => {
                let full = bundle.with_summary(summary);
                let applied = self.apply(cycle, |s| {
                    s.phase = CyclePhase::FullResult;
                    s.bundle = Some(full.clone());
                });
                if !applied {
                    tracing::debug!("Discarding stale summary of cycle {}", cycle);
                    return CycleOutcome::Superseded;
                }
                tracing::info!(
                    "✅ Cycle {} complete: {} results with summary",
                    cycle,
                    full.results.len()
                );
                CycleOutcome::Full(full)
            }
            Err(e) => {
                tracing::warn!("⚠️  Cycle {} summary unavailable: {}", cycle, e);
                let applied = self.apply(cycle, |s| s.phase = CyclePhase::PartialResult);
                if applied {
                    CycleOutcome::Partial(bundle)
                } else {
                    CycleOutcome::Superseded
                }
            }
        }
    }

    /// Leave the results view. Any cycle still in flight is abandoned.
    pub fn new_search(&self) {
        self.state.send_modify(|s| {
            s.cycle += 1;
            s.phase = CyclePhase::Idle;
            s.query = None;
            s.is_searching = false;
            s.show_results = false;
            s.bundle = None;
        });
    }

    /// Forget every recorded query
    pub async fn clear_history(&self) {
        self.state.send_modify(|s| s.history.clear());
        self.persist_history().await;
    }

    /// Apply `update` only if `cycle` is still current
    fn apply(&self, cycle: u64, update: impl FnOnce(&mut ViewState)) -> bool {
        self.state.send_if_modified(|s| {
            if s.cycle != cycle {
                return false;
            }
            update(s);
            true
        })
    }

    async fn persist_history(&self) {
        let _guard = self.history_writes.lock().await;
        let history = self.history();
        if let Err(e) = self.history_store.save(&history).await {
            tracing::warn!("⚠️  Failed to save search history: {}", e);
        }
    }
}

async fn with_timeout<T>(
    operation: &str,
    limit: Duration,
    call: impl Future<Output = Result<T, DomainError>>,
) -> Result<T, DomainError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(DomainError::timeout(operation, limit)))
}
