//! Index lifecycle operations

use super::bulk::{build_bulk_body, check_bulk_response, NDJSON_CONTENT_TYPE};
use super::client::{error_for_status, ElasticsearchClient};
use super::types::BulkResponse;
use crate::error::StorageError;
use crate::IndexManager;
use async_trait::async_trait;
use moviesearch_core::{DatasetRow, Error};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, info};

#[async_trait]
impl IndexManager for ElasticsearchClient {
    async fn index_exists(&self, index: &str) -> Result<bool, Error> {
        let response = self
            .http
            .head(self.url(index))
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("index probe failed: {e}")))?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(StorageError::BackendError {
                status: status.as_u16(),
                body: format!("unexpected status probing index '{index}'"),
            }
            .into()),
        }
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), Error> {
        debug!("Creating index '{index}'");

        let response = self
            .http
            .put(self.url(index))
            .json(body)
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("create index failed: {e}")))?;
        error_for_status(response).await?;

        info!("Created index '{index}'");
        Ok(())
    }

    async fn bulk_index(&self, index: &str, rows: &[DatasetRow]) -> Result<usize, Error> {
        if rows.is_empty() {
            debug!("No rows to index into '{index}'");
            return Ok(0);
        }

        let body = build_bulk_body(index, rows)?;
        debug!(
            "Sending bulk request: {} documents, {} bytes",
            rows.len(),
            body.len()
        );

        let response = self
            .http
            .post(self.url("_bulk"))
            .query(&[("refresh", "true")])
            .header(CONTENT_TYPE, NDJSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("bulk request failed: {e}")))?;
        let response = error_for_status(response).await?;

        let bulk: BulkResponse = response.json().await.map_err(|e| {
            StorageError::SerializationError(format!("Failed to parse bulk response: {e}"))
        })?;
        check_bulk_response(&bulk)?;

        Ok(rows.len())
    }

    async fn health_check(&self) -> Result<(), Error> {
        let response = self
            .http
            .get(self.url("/"))
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(format!("health check failed: {e}")))?;
        error_for_status(response).await?;
        Ok(())
    }
}
