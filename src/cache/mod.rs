//! Cache module for storing expensive lookups
//!
//! Provides a small key/value store abstraction with timestamped entries. The
//! store never decides freshness itself: it hands back whatever it has and the
//! caller compares the entry timestamp against its own TTL. Every storage
//! failure is swallowed, so a broken cache only ever costs extra network calls.

mod manager;
mod memory;

pub use manager::FileCache;
pub use memory::MemoryCache;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Versioned name of the persisted page-info blob
pub const PAGE_CACHE_KEY: &str = "wiki_cache_v1";

/// A cached value together with the time it was stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// When the entry was written
    pub timestamp: DateTime<Utc>,
    /// The cached value
    pub payload: T,
}

impl<T> CacheEntry<T> {
    /// Whether the entry is younger than `ttl` at `now`
    pub fn is_fresh(&self, ttl: chrono::Duration, now: DateTime<Utc>) -> bool {
        now - self.timestamp < ttl
    }
}

/// Errors raised by cache backends
///
/// These never leave a backend: `get` and `put` log and absorb them.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the backing file failed
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored blob could not be encoded or decoded
    #[error("Cache encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Best-effort key/value store with timestamped entries
pub trait CacheStore<T>: Send + Sync {
    /// Returns the stored entry for `key`, stale or not
    fn get(&self, key: &str) -> Option<CacheEntry<T>>;

    /// Stores `payload` under `key`, replacing any previous entry
    fn put(&self, key: &str, payload: T, timestamp: DateTime<Utc>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_entry_fresh_within_ttl() {
        let now = Utc::now();
        let entry = CacheEntry {
            timestamp: now - Duration::days(29),
            payload: 1,
        };
        assert!(entry.is_fresh(Duration::days(30), now));
    }

    #[test]
    fn test_entry_stale_after_ttl() {
        let now = Utc::now();
        let entry = CacheEntry {
            timestamp: now - Duration::days(31),
            payload: 1,
        };
        assert!(!entry.is_fresh(Duration::days(30), now));
    }

    #[test]
    fn test_entry_stale_exactly_at_ttl() {
        let now = Utc::now();
        let entry = CacheEntry {
            timestamp: now - Duration::days(30),
            payload: 1,
        };
        assert!(!entry.is_fresh(Duration::days(30), now));
    }
}
