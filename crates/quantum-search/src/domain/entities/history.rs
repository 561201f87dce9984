//! SearchHistory - recent queries, most recent first

use serde::{Deserialize, Serialize};

/// Number of queries kept in history
pub const HISTORY_CAPACITY: usize = 10;

/// Distinct queries, most recent first, bounded by [`HISTORY_CAPACITY`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SearchHistory {
    entries: Vec<String>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `query` to the front, dropping any earlier occurrence and
    /// anything past capacity.
    pub fn record(&mut self, query: &str) {
        self.entries.retain(|existing| existing != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<String>> for SearchHistory {
    /// Normalizes untrusted input: blanks dropped, first occurrence wins, capped.
    fn from(raw: Vec<String>) -> Self {
        let mut entries: Vec<String> = Vec::with_capacity(raw.len().min(HISTORY_CAPACITY));
        for entry in raw {
            if entry.trim().is_empty() || entries.contains(&entry) {
                continue;
            }
            entries.push(entry);
            if entries.len() == HISTORY_CAPACITY {
                break;
            }
        }
        Self { entries }
    }
}

impl From<SearchHistory> for Vec<String> {
    fn from(history: SearchHistory) -> Self {
        history.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(entries: &[&str]) -> SearchHistory {
        SearchHistory::from(entries.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_record_moves_existing_to_front() {
        let mut h = history(&["a", "b", "c"]);
        h.record("b");
        assert_eq!(h.entries(), &["b", "a", "c"]);
    }

    #[test]
    fn test_record_new_prepends() {
        let mut h = history(&["a"]);
        h.record("z");
        assert_eq!(h.entries(), &["z", "a"]);
    }

    #[test]
    fn test_record_caps_at_capacity() {
        let mut h = SearchHistory::new();
        for i in 0..15 {
            h.record(&format!("q{i}"));
        }
        assert_eq!(h.len(), HISTORY_CAPACITY);
        assert_eq!(h.get(0), Some("q14"));
        assert_eq!(h.get(9), Some("q5"));
    }

    #[test]
    fn test_from_vec_normalizes() {
        let h = history(&["a", "", "a", "b", "  "]);
        assert_eq!(h.entries(), &["a", "b"]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let h = history(&["x", "y"]);
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"["x","y"]"#);
    }
}
