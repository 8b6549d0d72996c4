//! Wikimedia Commons image search client

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::fetcher::{JsonFetcher, SourceError};
use crate::image::is_usable_candidate;

/// Commons action API endpoint
pub const COMMONS_API_URL: &str = "https://commons.wikimedia.org/w/api.php";

/// Number of search candidates inspected per query
const CANDIDATE_LIMIT: &str = "5";

#[derive(Debug, Deserialize)]
struct CommonsResponse {
    #[serde(default)]
    query: Option<CommonsQuery>,
}

#[derive(Debug, Deserialize)]
struct CommonsQuery {
    #[serde(default)]
    pages: HashMap<String, CommonsPage>,
}

#[derive(Debug, Deserialize)]
struct CommonsPage {
    /// Search rank assigned by the generator
    #[serde(default)]
    index: Option<u32>,
    #[serde(default)]
    pageid: Option<u64>,
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    #[serde(default)]
    url: String,
}

/// Client for image search on Wikimedia Commons
#[derive(Clone)]
pub struct CommonsClient {
    fetcher: Arc<dyn JsonFetcher>,
    base_url: String,
}

impl CommonsClient {
    pub fn new(fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            fetcher,
            base_url: COMMONS_API_URL.to_string(),
        }
    }

    /// Returns the first usable image URL for `query`
    ///
    /// Candidates are visited in search rank order; vector files and locator
    /// maps are skipped. Yields an empty string when nothing qualifies or the
    /// request fails.
    pub async fn fetch_image(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return String::new();
        }

        match self.candidates(query).await {
            Ok(urls) => urls
                .into_iter()
                .find(|url| is_usable_candidate(url))
                .unwrap_or_default(),
            Err(e) => {
                debug!(query, error = %e, "commons image search failed");
                String::new()
            }
        }
    }

    /// Candidate URLs in search rank order
    async fn candidates(&self, query: &str) -> Result<Vec<String>, SourceError> {
        let params = [
            ("action", "query"),
            ("generator", "search"),
            ("gsrsearch", query),
            ("gsrlimit", CANDIDATE_LIMIT),
            ("prop", "imageinfo"),
            ("iiprop", "url"),
            ("format", "json"),
        ];

        let body = self.fetcher.get_json(&self.base_url, &params).await?;
        let response: CommonsResponse = serde_json::from_value(body)?;

        let mut pages: Vec<CommonsPage> = response
            .query
            .map(|q| q.pages.into_values().collect())
            .unwrap_or_default();
        pages.sort_by_key(|p| (p.index.unwrap_or(u32::MAX), p.pageid.unwrap_or(u64::MAX)));

        Ok(pages
            .into_iter()
            .filter_map(|p| p.imageinfo.into_iter().next().map(|info| info.url))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::mock::{MockFetcher, Request};
    use serde_json::json;

    #[tokio::test]
    async fn test_returns_first_raster_candidate() {
        let fetcher = Arc::new(MockFetcher::new().with_commons(
            "Lion",
            &["https://upload.wikimedia.org/a.jpg", "https://upload.wikimedia.org/b.jpg"],
        ));
        let client = CommonsClient::new(fetcher.clone());

        assert_eq!(client.fetch_image("Lion").await, "https://upload.wikimedia.org/a.jpg");
        let call = &fetcher.calls()[0];
        assert_eq!(call.param("gsrlimit"), Some("5"));
        assert_eq!(call.param("iiprop"), Some("url"));
    }

    #[tokio::test]
    async fn test_skips_svg_and_locator_maps() {
        let fetcher = Arc::new(MockFetcher::new().with_commons(
            "Lion",
            &[
                "https://upload.wikimedia.org/Lion_icon.svg",
                "https://upload.wikimedia.org/Lion_locator_map.png",
                "https://upload.wikimedia.org/Lion_photo.JPG",
            ],
        ));
        let client = CommonsClient::new(fetcher);

        assert_eq!(
            client.fetch_image("Lion").await,
            "https://upload.wikimedia.org/Lion_photo.JPG"
        );
    }

    #[tokio::test]
    async fn test_no_qualifying_candidate_is_empty() {
        let fetcher = Arc::new(
            MockFetcher::new().with_commons("Lion", &["https://upload.wikimedia.org/Lion.svg"]),
        );
        let client = CommonsClient::new(fetcher);

        assert_eq!(client.fetch_image("Lion").await, "");
    }

    #[tokio::test]
    async fn test_orders_candidates_by_search_index() {
        let body = json!({
            "query": { "pages": {
                "10": { "pageid": 10, "index": 2, "imageinfo": [{ "url": "second.jpg" }] },
                "99": { "pageid": 99, "index": 1, "imageinfo": [{ "url": "first.jpg" }] }
            } }
        });
        let fetcher = Arc::new(MockFetcher::new().route(Request::is_commons, body));
        let client = CommonsClient::new(fetcher);

        assert_eq!(client.fetch_image("Lion").await, "first.jpg");
    }

    #[tokio::test]
    async fn test_transport_error_is_empty() {
        let fetcher = Arc::new(MockFetcher::new().fail(Request::is_commons, 500));
        let client = CommonsClient::new(fetcher);

        assert_eq!(client.fetch_image("Lion").await, "");
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_request() {
        let fetcher = Arc::new(MockFetcher::new());
        let client = CommonsClient::new(fetcher.clone());

        assert_eq!(client.fetch_image(" ").await, "");
        assert!(fetcher.calls().is_empty());
    }
}
