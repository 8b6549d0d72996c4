use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{JsonFetcher, SourceError};

/// Fixed per-request timeout so an unreachable host cannot stall a lookup
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Wikimedia rejects anonymous clients without a descriptive agent
const USER_AGENT: &str = concat!("wildfacts/", env!("CARGO_PKG_VERSION"));

/// `reqwest`-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, SourceError> {
        let response = self.client.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("wildfacts/"));
    }

    #[test]
    fn test_default_timeout_is_five_seconds() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(5));
    }

    #[test]
    fn test_with_timeout_builds_client() {
        assert!(HttpFetcher::with_timeout(Duration::from_millis(250)).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_millis(500)).unwrap();
        // Port 9 (discard) on localhost is closed in test environments
        let result = fetcher.get_json("http://127.0.0.1:9/api.php", &[]).await;
        assert!(matches!(result, Err(SourceError::Transport(_))));
    }
}
