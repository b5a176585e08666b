//! Title search

use super::client::{error_for_status, ElasticsearchClient};
use super::types::SearchResponse;
use crate::error::StorageError;
use crate::MovieSearch;
use async_trait::async_trait;
use moviesearch_core::{Error, Movie};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::debug;

/// Field the search runs against
pub const TITLE_FIELD: &str = "Title";

/// Search body matching titles that contain `text` as a phrase whose last
/// term may be a prefix.
///
/// `text` is embedded as a JSON string value, so quotes, braces and control
/// characters in user input cannot change the shape of the query.
pub fn phrase_prefix_query(text: &str, size: usize) -> Value {
    json!({
        "query": {
            "match_phrase_prefix": {
                TITLE_FIELD: text
            }
        },
        "size": size
    })
}

#[async_trait]
impl MovieSearch for ElasticsearchClient {
    async fn search_movies(
        &self,
        index: &str,
        query: &str,
        size: usize,
    ) -> Result<Vec<Movie>, Error> {
        let body = phrase_prefix_query(query, size);
        let path = format!("{index}/_search");

        let response = self
            .http
            .post(self.url(&path))
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("search request failed: {e}")))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StorageError::IndexNotFound(index.to_string()).into());
        }
        let response = error_for_status(response).await?;

        let decoded: SearchResponse = response.json().await.map_err(|e| {
            StorageError::SerializationError(format!("Failed to parse search response: {e}"))
        })?;

        debug!(
            "Search in '{index}' took {}ms, {} hits",
            decoded.took,
            decoded.hits.hits.len()
        );

        Ok(decoded.into_movies())
    }
}
