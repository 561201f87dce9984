//! File-backed key-value store
//!
//! A single JSON object on disk mapping keys to string values.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use quantum_search::{DomainError, KeyValueStore};

pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, DomainError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(DomainError::Persistence(format!(
                    "Failed to read {:?}: {}",
                    self.path, e
                )))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            DomainError::Persistence(format!("Malformed storage file {:?}: {}", self.path, e))
        })
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        // A corrupt file is replaced rather than blocking every future write
        let mut map = self.read_map().await.unwrap_or_else(|e| {
            tracing::warn!("Resetting storage file: {}", e);
            BTreeMap::new()
        });
        map.insert(key.to_string(), value.to_string());

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                DomainError::Persistence(format!("Failed to create {:?}: {}", dir, e))
            })?;
        }

        let content = serde_json::to_string_pretty(&map)
            .map_err(|e| DomainError::Persistence(e.to_string()))?;

        tokio::fs::write(&self.path, content).await.map_err(|e| {
            DomainError::Persistence(format!("Failed to write {:?}: {}", self.path, e))
        })
    }
}
