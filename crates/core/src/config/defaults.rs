//! Default values and functions for configuration

use std::path::PathBuf;

// Default constants
pub(crate) const DEFAULT_ENGINE_URL: &str = "http://localhost:9200";
pub(crate) const DEFAULT_INDEX_NAME: &str = "movies";
pub(crate) const DEFAULT_DATASET_PATH: &str = "datasets/movies.csv";
pub(crate) const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Elasticsearch's default `index.max_result_window`
pub(crate) const MAX_RESULT_WINDOW: usize = 10_000;

pub(crate) fn default_engine_url() -> String {
    DEFAULT_ENGINE_URL.to_string()
}

pub(crate) fn default_index_name() -> String {
    DEFAULT_INDEX_NAME.to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    30
}

pub(crate) fn default_max_results() -> usize {
    10 // same as the engine's own default page size
}

pub(crate) fn default_dataset_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATASET_PATH)
}

pub(crate) fn default_server_host() -> String {
    DEFAULT_SERVER_HOST.to_string()
}

pub(crate) fn default_server_port() -> u16 {
    8080
}

pub(crate) fn default_allowed_origins() -> Vec<String> {
    vec![DEFAULT_ALLOWED_ORIGIN.to_string()]
}
