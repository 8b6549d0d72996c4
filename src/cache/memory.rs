//! In-process cache backend

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{CacheEntry, CacheStore};

/// Cache held in memory for the lifetime of the process
///
/// Used by tests and when persistence is disabled.
#[derive(Debug)]
pub struct MemoryCache<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T> MemoryCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for MemoryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send> CacheStore<T> for MemoryCache<T> {
    fn get(&self, key: &str) -> Option<CacheEntry<T>> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &str, payload: T, timestamp: DateTime<Utc>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), CacheEntry { timestamp, payload });
        }
    }
}
