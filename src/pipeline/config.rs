//! Pipeline configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::data::wikipedia::PAGE_CACHE_TTL_DAYS;
use crate::fetcher::DEFAULT_TIMEOUT;

/// Number of Wikipedia hits resolved per species search
pub const DEFAULT_SEARCH_LIMIT: usize = 6;

/// Where page-info lookups are cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheMode {
    /// JSON blob on disk; `None` uses the XDG cache directory
    Persistent { dir: Option<PathBuf> },
    /// Process memory only
    Memory,
}

/// Settings fixed at pipeline construction
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Skip the random animal API entirely, e.g. when the host environment is
    /// known to block it
    pub skip_random_source: bool,
    /// Maximum Wikipedia hits resolved per species search
    pub search_limit: usize,
    /// Per-request timeout applied by the HTTP fetcher
    pub request_timeout: Duration,
    /// Freshness window for cached page info
    pub cache_ttl: chrono::Duration,
    pub cache: CacheMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            skip_random_source: false,
            search_limit: DEFAULT_SEARCH_LIMIT,
            request_timeout: DEFAULT_TIMEOUT,
            cache_ttl: chrono::Duration::days(PAGE_CACHE_TTL_DAYS),
            cache: CacheMode::Persistent { dir: None },
        }
    }
}
