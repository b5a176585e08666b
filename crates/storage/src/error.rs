use moviesearch_core::Error as CoreError;
use thiserror::Error;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Search engine returned {status}: {body}")]
    BackendError { status: u16, body: String },

    #[error("Bulk request rejected {failed} of {total} documents: {reason}")]
    BulkRejected {
        failed: usize,
        total: usize,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::storage(err.to_string())
    }
}
