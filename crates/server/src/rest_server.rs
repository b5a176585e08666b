//! REST API server implementation using Axum

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use moviesearch_core::config::ServerConfig;
use moviesearch_core::{Error, MoviesResponse, Result};
use moviesearch_storage::SearchEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Body returned with 400 when `q` is missing or empty
pub const MISSING_QUERY_MESSAGE: &str = "Query parameter 'q' is required";

/// Body returned with 500 when the engine call fails
pub const ENGINE_ERROR_MESSAGE: &str = "Error getting response from search engine";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn SearchEngine>,
    pub index_name: String,
    pub max_results: usize,
}

impl AppState {
    pub fn new(
        engine: Arc<dyn SearchEngine>,
        index_name: impl Into<String>,
        max_results: usize,
    ) -> Self {
        Self {
            engine,
            index_name: index_name.into(),
            max_results,
        }
    }
}

/// Build the Axum router with all endpoints
pub fn build_router(state: AppState, server_config: &ServerConfig) -> Router {
    Router::new()
        .route("/search", get(search_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer(&server_config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        // CORS disabled
        return CorsLayer::new();
    }
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{origin}': {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// GET /search?q=<text>
async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> std::result::Result<Json<MoviesResponse>, ApiError> {
    let query = first_query_value(&params, "q").ok_or(ApiError::MissingQuery)?;

    debug!("Search request: q='{query}'");

    let movies = state
        .engine
        .search_movies(&state.index_name, query, state.max_results)
        .await
        .map_err(ApiError::Engine)?;

    debug!("Search for '{query}' returned {} movies", movies.len());
    Ok(Json(MoviesResponse { movies }))
}

/// First value of `key`; repeated keys are allowed and later values ignored
fn first_query_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    use serde_json::json;

    let engine_status = match state.engine.health_check().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!("Search engine health check failed: {e}");
            "down"
        }
    };

    let health_status = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "engine": {"status": engine_status}
    });

    (StatusCode::OK, Json(health_status))
}

/// Error handling for API endpoints
#[derive(Debug)]
pub enum ApiError {
    MissingQuery,
    Engine(Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::MissingQuery => {
                (StatusCode::BAD_REQUEST, MISSING_QUERY_MESSAGE).into_response()
            }
            ApiError::Engine(err) => {
                // Log the full error; the client only gets the generic message
                tracing::error!("Search request failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, ENGINE_ERROR_MESSAGE).into_response()
            }
        }
    }
}

/// Serve `router` on the configured address until Ctrl+C
pub async fn serve(router: Router, server_config: &ServerConfig) -> Result<()> {
    let addr = format!("{}:{}", server_config.host, server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::with_context(format!("Failed to bind to {addr}"), e))?;

    let local: SocketAddr = listener.local_addr()?;
    info!("Server listening on http://{local}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::with_context("Server error", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
        Err(e) => tracing::error!("Error setting up signal handler: {e}"),
    }
}
