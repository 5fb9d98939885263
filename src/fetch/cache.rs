//! Per-consumer response cache.

use serde_json::Value;
use std::collections::HashMap;

/// In-memory cache of raw JSON responses keyed by the exact URL string.
///
/// Owned by a single [`Fetch`](super::Fetch); nothing is shared between
/// consumers and nothing is evicted.
#[derive(Debug, Default)]
pub struct ResponseCache {
  entries: HashMap<String, Value>,
}

impl ResponseCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, url: &str) -> Option<&Value> {
    self.entries.get(url)
  }

  /// Store the response for `url`. The first stored response wins.
  pub fn insert(&mut self, url: &str, payload: Value) {
    self.entries.entry(url.to_string()).or_insert(payload);
  }

  #[cfg(test)]
  pub fn contains(&self, url: &str) -> bool {
    self.entries.contains_key(url)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[cfg(test)]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_keys_are_verbatim() {
    let mut cache = ResponseCache::new();
    cache.insert("https://x.test/a?b=1&c=2", json!(1));

    assert!(cache.contains("https://x.test/a?b=1&c=2"));
    assert!(!cache.contains("https://x.test/a?c=2&b=1"));
  }

  #[test]
  fn test_first_insert_wins() {
    let mut cache = ResponseCache::new();
    cache.insert("u", json!("first"));
    cache.insert("u", json!("second"));

    assert_eq!(cache.get("u"), Some(&json!("first")));
    assert_eq!(cache.len(), 1);
  }
}
