use crate::{ElasticsearchClient, SearchEngine};
use moviesearch_core::{config::EngineConfig, Error};
use std::sync::Arc;

/// Creates the search engine client from configuration.
///
/// Returns a trait object so that callers (the start-up seeding flow and the
/// HTTP router) can be handed a [`crate::MockSearchEngine`] in tests.
///
/// # Errors
/// Returns an error if the HTTP client cannot be built
///
/// # Example
/// ```ignore
/// let engine = create_search_engine(&config.engine)?;
/// if !engine.index_exists("movies").await? { /* ... */ }
/// ```
pub fn create_search_engine(config: &EngineConfig) -> Result<Arc<dyn SearchEngine>, Error> {
    let client = ElasticsearchClient::from_config(config)?;
    Ok(Arc::new(client) as Arc<dyn SearchEngine>)
}
