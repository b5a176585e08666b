//! HTTP front end for movie search
//!
//! Exposes `GET /search?q=` and `GET /health` over a shared
//! [`moviesearch_storage::SearchEngine`]. The router holds no state besides
//! the engine handle and a couple of settings, so handlers run concurrently.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod rest_server;

pub use rest_server::{
    build_router, ApiError, AppState, ENGINE_ERROR_MESSAGE, MISSING_QUERY_MESSAGE,
};

// Re-export error types from core
pub use moviesearch_core::error::{Error, Result};

use moviesearch_core::Config;
use moviesearch_storage::SearchEngine;
use std::sync::Arc;

/// Run the REST server with the given configuration.
///
/// Binds `server.host:server.port` and serves until Ctrl+C. The index is
/// expected to be seeded already.
pub async fn run_server(config: &Config, engine: Arc<dyn SearchEngine>) -> Result<()> {
    let state = AppState::new(
        engine,
        config.engine.index_name.clone(),
        config.engine.max_results,
    );
    let router = build_router(state, &config.server);
    rest_server::serve(router, &config.server).await
}
