//! Ordered string key/value store.
//!
//! Used for response headers, request headers and query parameters. Keys are kept
//! exactly as supplied (no case folding) and iterate in sorted order.

use super::Conditionable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered key/value store for headers and query parameters.
///
/// # Examples
///
/// ```
/// use tavern_http::ArrayStore;
///
/// let mut headers = ArrayStore::from_iter([("Content-Type", "application/json")]);
/// headers.add("X-Request-Id", "abc").remove("Content-Type");
///
/// assert_eq!(headers.len(), 1);
/// assert_eq!(headers.get("X-Request-Id"), Some("abc"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrayStore {
    data: BTreeMap<String, String>,
}

impl ArrayStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries
    pub fn all(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    /// Look up a single entry
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Insert or overwrite an entry
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Insert every entry of `entries`, overwriting existing keys
    pub fn merge<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.data.insert(key.into(), value.into());
        }
        self
    }

    /// Remove an entry if present
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.data.remove(key);
        self
    }

    /// Replace the whole contents
    pub fn set(&mut self, data: BTreeMap<String, String>) -> &mut Self {
        self.data = data;
        self
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the store has no entries
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when the store has at least one entry
    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Conditionable for ArrayStore {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ArrayStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = ArrayStore::new();
        store.merge(iter);
        store
    }
}

impl IntoIterator for ArrayStore {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl From<BTreeMap<String, String>> for ArrayStore {
    fn from(data: BTreeMap<String, String>) -> Self {
        ArrayStore { data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let store = ArrayStore::new();
        assert!(store.is_empty());
        assert!(!store.is_not_empty());
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_add_overwrites() {
        let mut store = ArrayStore::new();
        store.add("Accept", "text/html").add("Accept", "application/json");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("Accept"), Some("application/json"));
    }

    #[test]
    fn test_keys_are_not_normalised() {
        let store = ArrayStore::from_iter([("X-Custom", "1")]);
        assert_eq!(store.get("X-Custom"), Some("1"));
        assert!(store.get("x-custom").is_none());
    }

    #[test]
    fn test_merge_and_set() {
        let mut store = ArrayStore::from_iter([("a", "1")]);
        store.merge([("b", "2"), ("a", "3")]);
        assert_eq!(store.get("a"), Some("3"));
        assert_eq!(store.len(), 2);

        store.set(BTreeMap::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_conditional_add() {
        let mut store = ArrayStore::new();
        store.when(false, |s| {
            s.add("skipped", "yes");
        });
        store.when(true, |s| {
            s.add("kept", "yes");
        });
        assert_eq!(store.iter().collect::<Vec<_>>(), vec![("kept", "yes")]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let store = ArrayStore::from_iter([("Content-Type", "text/plain")]);
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"Content-Type":"text/plain"}"#);
    }
}
