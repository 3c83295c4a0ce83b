//! Short-lived query cache.
//!
//! Keyed by the exact call signature, shared across requests, with no
//! invalidation beyond time expiry. Concurrent misses for the same key
//! may both populate; last write wins, the only cost is duplicate remote
//! work. Writes (delete) do not invalidate cached reads, so stale data
//! can be observed until expiry.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

pub struct QueryCache {
    entries: Mutex<HashMap<String, (Instant, Value)>>,
    default_ttl: Duration,
}

impl QueryCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Fetch a cached value. Expired entries are evicted and reported as
    /// absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        match entries.get(key) {
            Some((expires_at, value)) if Instant::now() < *expires_at => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: &str, value: Value) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    pub fn insert_with_ttl(&self, key: &str, value: Value, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), (Instant::now() + ttl, value));
    }

    /// Drop every expired entry. The cache is small enough that a full
    /// sweep is fine; callers decide when housekeeping is worth it.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, (expires_at, _)| now < *expires_at);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        // Matches the original front-end: unqualified inserts live ~1s.
        Self::new(Duration::from_secs(1))
    }
}
