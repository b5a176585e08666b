//! Configuration module for the moviesearch service
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML files and/or environment variables.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

pub use loading::DEFAULT_CONFIG_FILE;

/// Main configuration structure for the moviesearch service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Search engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Dataset configuration
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for the Elasticsearch connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the engine, scheme and port included
    #[serde(default = "default_engine_url")]
    pub url: String,

    /// Index holding the movie documents
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Timeout applied to every request sent to the engine
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of hits returned per search
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

/// Configuration for the CSV dataset loaded at start-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the comma-separated movie file
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

/// Configuration for REST API server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = disabled, ["*"] = all origins)
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

// Default implementations

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: default_engine_url(),
            index_name: default_index_name(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

/// Characters Elasticsearch refuses in index names
const INVALID_INDEX_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':'];

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.engine.url.trim();
        if url.is_empty() {
            return Err(Error::config("engine.url must not be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::config(format!(
                "Invalid engine.url '{url}'. Must start with http:// or https://"
            )));
        }

        validate_index_name(&self.engine.index_name)?;

        if self.engine.timeout_secs == 0 {
            return Err(Error::config("engine.timeout_secs must be greater than 0"));
        }

        if self.engine.max_results == 0 {
            return Err(Error::config("engine.max_results must be greater than 0"));
        }
        if self.engine.max_results > MAX_RESULT_WINDOW {
            return Err(Error::config(format!(
                "engine.max_results too large (max {MAX_RESULT_WINDOW}, got {})",
                self.engine.max_results
            )));
        }

        if self.server.port == 0 {
            return Err(Error::config("server.port must be greater than 0"));
        }

        Ok(())
    }
}

fn validate_index_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::config("engine.index_name must not be empty"));
    }
    if name.chars().any(|c| c.is_uppercase()) {
        return Err(Error::config(format!(
            "Invalid engine.index_name '{name}'. Must be lowercase"
        )));
    }
    if name.starts_with(['-', '_', '+']) {
        return Err(Error::config(format!(
            "Invalid engine.index_name '{name}'. Must not start with '-', '_' or '+'"
        )));
    }
    if name.contains(INVALID_INDEX_CHARS) {
        return Err(Error::config(format!(
            "Invalid engine.index_name '{name}'. Must not contain any of {INVALID_INDEX_CHARS:?}"
        )));
    }
    Ok(())
}
