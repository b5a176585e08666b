use moviesearch_core::Error as CoreError;
use thiserror::Error;

/// Failures while preparing the index at start-up
///
/// Every variant is fatal: the service does not start serving when
/// ingestion fails.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("Failed to check whether index '{index}' exists: {source}")]
    IndexProbe {
        index: String,
        #[source]
        source: CoreError,
    },

    #[error("Failed to create index '{index}': {source}")]
    CreateIndex {
        index: String,
        #[source]
        source: CoreError,
    },

    #[error("Failed to bulk index {documents} documents into '{index}': {source}")]
    BulkIndex {
        index: String,
        documents: usize,
        #[source]
        source: CoreError,
    },
}

impl IngestError {
    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}
