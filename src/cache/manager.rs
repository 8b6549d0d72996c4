//! Persistent cache backed by a single JSON blob on disk
//!
//! All entries for one cache live in one file named after a versioned key
//! (e.g. `wiki_cache_v1.json`), mapping key to `{timestamp, payload}`. Bumping
//! the key version abandons old blobs instead of migrating them.

use std::collections::HashMap;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::{CacheEntry, CacheError, CacheStore};

/// Manages reading and writing one cache blob on disk
///
/// The blob lives in an XDG-compliant cache directory (`~/.cache/wildfacts/`
/// on Linux). Reads and writes are best effort: a missing, unreadable or
/// corrupt blob reads as empty, and failed writes are dropped.
#[derive(Debug)]
pub struct FileCache<T> {
    /// Directory where the blob is stored
    cache_dir: PathBuf,
    /// Versioned blob name, without extension
    key: String,
    /// Serialises read-modify-write cycles within this process
    lock: Mutex<()>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> FileCache<T> {
    /// Creates a FileCache in the XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new(key: &str) -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "wildfacts")?;
        Some(Self::with_dir(project_dirs.cache_dir().to_path_buf(), key))
    }

    /// Creates a FileCache with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf, key: &str) -> Self {
        Self {
            cache_dir,
            key: key.to_string(),
            lock: Mutex::new(()),
            _payload: PhantomData,
        }
    }

    /// Path of the blob file
    pub fn path(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.json", self.key))
    }
}

impl<T: Serialize + DeserializeOwned> FileCache<T> {
    /// Reads the whole blob; a missing file is an empty cache
    fn load(&self) -> Result<HashMap<String, CacheEntry<T>>, CacheError> {
        let path = self.path();
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Replaces the whole blob
    fn save(&self, entries: &HashMap<String, CacheEntry<T>>) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)?;
        let json = serde_json::to_string(entries)?;
        fs::write(self.path(), json)?;
        Ok(())
    }

    fn load_or_empty(&self) -> HashMap<String, CacheEntry<T>> {
        self.load().unwrap_or_else(|e| {
            debug!(path = %self.path().display(), error = %e, "discarding unreadable cache blob");
            HashMap::new()
        })
    }
}

impl<T> CacheStore<T> for FileCache<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    fn get(&self, key: &str) -> Option<CacheEntry<T>> {
        let _guard = self.lock.lock().ok()?;
        self.load_or_empty().remove(key)
    }

    fn put(&self, key: &str, payload: T, timestamp: DateTime<Utc>) {
        let Ok(_guard) = self.lock.lock() else {
            return;
        };
        let mut entries = self.load_or_empty();
        entries.insert(key.to_string(), CacheEntry { timestamp, payload });
        if let Err(e) = self.save(&entries) {
            debug!(path = %self.path().display(), error = %e, "cache write dropped");
        }
    }
}
