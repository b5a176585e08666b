//! HTTP client shared by the index and search operations

use crate::error::StorageError;
use moviesearch_core::config::EngineConfig;
use moviesearch_core::error::Result;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::info;

/// Elasticsearch client
///
/// Holds one pooled `reqwest::Client`; cloning is cheap and clones share the pool.
#[derive(Debug, Clone)]
pub struct ElasticsearchClient {
    pub(super) http: Client,
    pub(super) base_url: String,
}

impl ElasticsearchClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Engine address including scheme and port (e.g., "http://localhost:9200")
    /// * `timeout` - Timeout applied to each request
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(StorageError::InvalidConfig("engine URL is empty".to_string()).into());
        }

        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            StorageError::InvalidConfig(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self { http, base_url })
    }

    /// Create a client from the `[engine]` configuration section
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        info!("Initializing Elasticsearch client");
        info!("  URL: {}", config.url);
        info!("  Timeout: {}s", config.timeout_secs);

        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Turn a non-2xx response into a `BackendError` carrying the engine's reply
pub(super) async fn error_for_status(
    response: Response,
) -> std::result::Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());
    Err(StorageError::BackendError {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ElasticsearchClient::new("http://localhost:9200/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9200");
        assert_eq!(client.url("/movies/_search"), "http://localhost:9200/movies/_search");
        assert_eq!(client.url("_bulk"), "http://localhost:9200/_bulk");
    }

    #[test]
    fn test_empty_url_is_rejected() {
        assert!(ElasticsearchClient::new("  ", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig {
            url: "http://search.internal:9200".to_string(),
            ..EngineConfig::default()
        };
        let client = ElasticsearchClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://search.internal:9200");
    }
}
