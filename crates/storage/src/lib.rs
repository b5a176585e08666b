#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Search engine access for moviesearch
//!
//! The engine is reached through two traits: [`IndexManager`] covers the
//! start-up lifecycle (probe, create, bulk load) and [`MovieSearch`] covers
//! per-request queries. [`ElasticsearchClient`] implements both over HTTP;
//! [`MockSearchEngine`] implements both in memory for tests.

pub mod error;
mod factory;
pub mod mapping;
pub mod mock;

// Keep elasticsearch internals private
mod elasticsearch;

pub use elasticsearch::{phrase_prefix_query, ElasticsearchClient, SearchHit, SearchResponse};
pub use error::StorageError;
pub use factory::create_search_engine;
pub use mapping::movie_index_mapping;
pub use mock::{MockFailure, MockSearchEngine};

use async_trait::async_trait;
use moviesearch_core::{DatasetRow, Error, Movie};
use serde_json::Value;

// ==== Traits ====

/// Combined trait for both index lifecycle and query operations
pub trait SearchEngine: IndexManager + MovieSearch {}

// Implement SearchEngine for any type that implements both IndexManager and MovieSearch
impl<T: IndexManager + MovieSearch> SearchEngine for T {}

/// Index lifecycle operations used while seeding at start-up
#[async_trait]
pub trait IndexManager: Send + Sync {
    /// Check if the index exists
    async fn index_exists(&self, index: &str) -> Result<bool, Error>;

    /// Create the index from a settings/mappings document, sent as-is
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), Error>;

    /// Upload every row as a document in one bulk request
    ///
    /// Documents are searchable as soon as this returns. Returns the number
    /// of documents written.
    async fn bulk_index(&self, index: &str, rows: &[DatasetRow]) -> Result<usize, Error>;

    /// Health check for the engine
    async fn health_check(&self) -> Result<(), Error>;
}

/// Per-request query operations
#[async_trait]
pub trait MovieSearch: Send + Sync {
    /// Phrase-prefix search on the `Title` field, at most `size` movies
    async fn search_movies(&self, index: &str, query: &str, size: usize)
        -> Result<Vec<Movie>, Error>;
}
