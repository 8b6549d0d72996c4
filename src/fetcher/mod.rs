//! HTTP seam shared by every source client
//!
//! All external sources speak JSON over GET, so the clients only need one
//! operation: fetch a URL with query parameters and hand back the decoded body.
//! Production code uses [`HttpFetcher`]; tests script responses instead.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::{HttpFetcher, DEFAULT_TIMEOUT};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when querying an external source
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network failure or timeout
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The source answered with a non-2xx status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The body did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The source explicitly reported that the record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, SourceError>;
}
