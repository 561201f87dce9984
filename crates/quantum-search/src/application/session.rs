//! Session persistence
//!
//! Loads and saves [`SearchHistory`] through an injected [`KeyValueStore`].
//! History is a convenience, so read problems never reach the caller.

use std::sync::Arc;

use crate::domain::{DomainError, SearchHistory};
use crate::ports::KeyValueStore;

/// Storage key holding the history as a JSON array of strings
pub const HISTORY_KEY: &str = "quantumSearchHistory";

/// Reads and writes the persisted search history
#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted history. Missing, unreadable or malformed data
    /// yields an empty history.
    pub async fn load(&self) -> SearchHistory {
        let raw = match self.store.get(HISTORY_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return SearchHistory::new(),
            Err(e) => {
                tracing::warn!("⚠️  Failed to load search history: {}", e);
                return SearchHistory::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => SearchHistory::from(entries),
            Err(e) => {
                tracing::warn!("⚠️  Ignoring malformed search history: {}", e);
                SearchHistory::new()
            }
        }
    }

    /// Persist the whole history
    pub async fn save(&self, history: &SearchHistory) -> Result<(), DomainError> {
        let raw = serde_json::to_string(history.entries())
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        self.store.set(HISTORY_KEY, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        values: Mutex<HashMap<String, String>>,
    }

    impl MemoryStore {
        fn with(key: &str, value: &str) -> Self {
            let store = Self::default();
            store
                .values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            store
        }
    }

    #[async_trait]
    impl KeyValueStore for MemoryStore {
        async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
            Err(DomainError::Persistence("disk on fire".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
            Err(DomainError::Persistence("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let history = HistoryStore::new(Arc::new(MemoryStore::default())).load().await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_load_valid_history() {
        let store = MemoryStore::with(HISTORY_KEY, r#"["rust","tokio"]"#);
        let history = HistoryStore::new(Arc::new(store)).load().await;
        assert_eq!(history.entries(), &["rust", "tokio"]);
    }

    #[tokio::test]
    async fn test_load_malformed_is_empty() {
        for raw in ["not json", r#"{"a":1}"#, "[1,2,3]"] {
            let store = MemoryStore::with(HISTORY_KEY, raw);
            let history = HistoryStore::new(Arc::new(store)).load().await;
            assert!(history.is_empty(), "expected empty history for {raw}");
        }
    }

    #[tokio::test]
    async fn test_load_normalizes_oversized_history() {
        let entries: Vec<String> = (0..12).map(|i| format!("q{i}")).collect();
        let raw = serde_json::to_string(&entries).unwrap();
        let store = MemoryStore::with(HISTORY_KEY, &raw);

        let history = HistoryStore::new(Arc::new(store)).load().await;
        assert_eq!(history.len(), 10);
        assert_eq!(history.get(0), Some("q0"));
    }

    #[tokio::test]
    async fn test_load_read_failure_is_empty() {
        let history = HistoryStore::new(Arc::new(BrokenStore)).load().await;
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_save_writes_json_array() {
        let store = Arc::new(MemoryStore::default());
        let history_store = HistoryStore::new(store.clone());

        let mut history = SearchHistory::new();
        history.record("a");
        history.record("b");
        history_store.save(&history).await.unwrap();

        let saved = store.get(HISTORY_KEY).await.unwrap();
        assert_eq!(saved.as_deref(), Some(r#"["b","a"]"#));
        assert_eq!(history_store.load().await, history);
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let err = HistoryStore::new(Arc::new(BrokenStore))
            .save(&SearchHistory::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
