//! Wikipedia search and page-info client
//!
//! Search hits are never cached. Page-info lookups go through the cache keyed
//! by exact title, including "page does not exist" answers, so a title that
//! failed once is not looked up again until its entry goes stale.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::CacheStore;
use crate::fetcher::{JsonFetcher, SourceError};

/// Wikipedia action API endpoint
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Default freshness window for cached page info
pub const PAGE_CACHE_TTL_DAYS: i64 = 30;

/// Width requested for page thumbnails
const THUMBNAIL_SIZE: &str = "800";

/// Cache of page-info lookups; `None` payloads mark titles known to be absent
pub type PageCache = Arc<dyn CacheStore<Option<PageInfo>>>;

/// One ranked search hit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

/// Normalized subset of a Wikipedia page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub pageid: u64,
    pub title: String,
    /// Plain-text intro
    pub extract: String,
    /// Thumbnail URL, empty when the page has none
    pub thumbnail: String,
    /// Wikidata short description, empty when absent
    #[serde(default)]
    pub short_description: String,
    /// Canonical page URL
    pub url: String,
}

/// Outcome of a live page lookup
#[derive(Debug)]
enum Lookup {
    Found(PageInfo),
    Missing,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    #[serde(default)]
    query: Option<PageQuery>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: HashMap<String, RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    pageid: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    /// Present (as an empty string) when the title does not exist
    #[serde(default)]
    missing: Option<serde_json::Value>,
    /// Present when the title is not a valid page name
    #[serde(default)]
    invalid: Option<serde_json::Value>,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
    #[serde(default)]
    terms: Option<Terms>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    source: String,
}

#[derive(Debug, Deserialize)]
struct Terms {
    #[serde(default)]
    description: Vec<String>,
}

/// Client for the Wikipedia search and page-info APIs
#[derive(Clone)]
pub struct WikipediaClient {
    fetcher: Arc<dyn JsonFetcher>,
    cache: Option<PageCache>,
    cache_ttl: Duration,
    base_url: String,
}

impl WikipediaClient {
    /// Creates a client without a page cache
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            fetcher,
            cache: None,
            cache_ttl: Duration::days(PAGE_CACHE_TTL_DAYS),
            base_url: WIKIPEDIA_API_URL.to_string(),
        }
    }

    /// Attaches a page cache
    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Overrides the cache freshness window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Searches for pages matching `query`
    ///
    /// Returns at most `limit` hits in relevance order. An empty query, a
    /// transport error or a malformed body all yield an empty list.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query = query.trim();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        match self.search_from_api(query, limit).await {
            Ok(mut hits) => {
                hits.truncate(limit);
                hits
            }
            Err(e) => {
                debug!(query, error = %e, "wikipedia search failed");
                Vec::new()
            }
        }
    }

    async fn search_from_api(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>, SourceError> {
        let limit = limit.to_string();
        let params = [
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("format", "json"),
        ];

        let body = self.fetcher.get_json(&self.base_url, &params).await?;
        let response: SearchResponse = serde_json::from_value(body)?;
        Ok(response.query.map(|q| q.search).unwrap_or_default())
    }

    /// Looks up page info for an exact title
    ///
    /// # Behavior
    /// - A fresh cache entry is returned without a network call, including a
    ///   cached "absent" answer
    /// - Otherwise the page is fetched and the outcome (found or missing) is
    ///   cached under the title with the current time
    /// - On a transport or parse failure nothing is cached; a stale entry is
    ///   returned if one exists, else `None`
    pub async fn page_info(&self, title: &str) -> Option<PageInfo> {
        if title.trim().is_empty() {
            return None;
        }

        let cached = self.cache.as_ref().and_then(|cache| cache.get(title));
        if let Some(entry) = &cached {
            if entry.is_fresh(self.cache_ttl, Utc::now()) {
                debug!(title, "page info cache hit");
                return entry.payload.clone();
            }
        }

        match self.page_from_api(title).await {
            Ok(lookup) => {
                let payload = match lookup {
                    Lookup::Found(page) => Some(page),
                    Lookup::Missing => None,
                };
                if let Some(cache) = &self.cache {
                    cache.put(title, payload.clone(), Utc::now());
                }
                payload
            }
            Err(e) => {
                debug!(title, error = %e, "page info lookup failed");
                cached.and_then(|entry| entry.payload)
            }
        }
    }

    async fn page_from_api(&self, title: &str) -> Result<Lookup, SourceError> {
        let params = [
            ("action", "query"),
            ("titles", title),
            ("prop", "extracts|pageimages|pageterms"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("piprop", "thumbnail"),
            ("pithumbsize", THUMBNAIL_SIZE),
            ("format", "json"),
        ];

        let body = self.fetcher.get_json(&self.base_url, &params).await?;
        let response: PageResponse = serde_json::from_value(body)?;
        let page = response
            .query
            .and_then(|q| q.pages.into_values().next());

        Ok(match page {
            Some(page) => parse_page(page),
            None => Lookup::Missing,
        })
    }
}

fn parse_page(page: RawPage) -> Lookup {
    if page.missing.is_some() || page.invalid.is_some() {
        return Lookup::Missing;
    }
    let (Some(pageid), Some(title)) = (page.pageid, page.title) else {
        return Lookup::Missing;
    };

    Lookup::Found(PageInfo {
        pageid,
        title,
        extract: page.extract.unwrap_or_default(),
        thumbnail: page.thumbnail.map(|t| t.source).unwrap_or_default(),
        short_description: page
            .terms
            .and_then(|t| t.description.into_iter().next())
            .unwrap_or_default(),
        url: page_url(pageid),
    })
}

/// Canonical URL for a page id
pub fn page_url(pageid: u64) -> String {
    format!("https://en.wikipedia.org/?curid={}", pageid)
}
