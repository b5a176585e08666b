//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::{Path, PathBuf};

use super::defaults::*;
use super::Config;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "moviesearch.toml";

type Builder = LibConfigBuilder<config::builder::DefaultState>;

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: Builder,
    key: &str,
    value: T,
) -> Result<Builder> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

/// Helper to override a key from a plain environment variable
fn override_from_env(builder: Builder, var: &str, key: &str) -> Result<Builder> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => builder
            .set_override(key, value.trim().to_string())
            .map_err(|e| Error::config(format!("Failed to set {var}: {e}"))),
        _ => Ok(builder),
    }
}

/// Split a comma-separated origin list, dropping blanks
pub(crate) fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `MOVIESEARCH_` and use double underscores
    /// for nested values. For example:
    /// - `MOVIESEARCH_ENGINE__URL=http://search:9200`
    /// - `MOVIESEARCH_SERVER__ALLOWED_ORIGINS=http://a.example,http://b.example`
    ///
    /// The short variables `ELASTIC_ADDRESS`, `ALLOWED_ORIGINS`, `DATASET_PATH`,
    /// `INDEX_NAME` and `PORT` are applied last.
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        let builder = set_config_default(builder, "engine.url", default_engine_url())?;
        let builder = set_config_default(builder, "engine.index_name", default_index_name())?;
        let builder = set_config_default(
            builder,
            "engine.timeout_secs",
            default_timeout_secs() as i64,
        )?;
        let builder = set_config_default(
            builder,
            "engine.max_results",
            default_max_results() as i64,
        )?;
        let builder = set_config_default(builder, "dataset.path", DEFAULT_DATASET_PATH)?;
        let builder = set_config_default(builder, "server.host", default_server_host())?;
        let builder =
            set_config_default(builder, "server.port", default_server_port() as i64)?;
        let mut builder = set_config_default(
            builder,
            "server.allowed_origins",
            default_allowed_origins(),
        )?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with MOVIESEARCH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("MOVIESEARCH")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.allowed_origins")
                .try_parsing(true),
        );

        builder = override_from_env(builder, "ELASTIC_ADDRESS", "engine.url")?;
        builder = override_from_env(builder, "INDEX_NAME", "engine.index_name")?;
        builder = override_from_env(builder, "DATASET_PATH", "dataset.path")?;

        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port_num) = port.trim().parse::<u16>() {
                builder = builder
                    .set_override("server.port", i64::from(port_num))
                    .map_err(|e| Error::config(format!("Failed to set PORT: {e}")))?;
            }
        }

        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            builder = builder
                .set_override("server.allowed_origins", parse_origin_list(&origins))
                .map_err(|e| Error::config(format!("Failed to set ALLOWED_ORIGINS: {e}")))?;
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (`./moviesearch.toml` or custom --config path)
    /// 3. Environment variables (MOVIESEARCH_*)
    /// 4. Short environment variables (ELASTIC_ADDRESS, ALLOWED_ORIGINS, ...)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };
        Self::from_file(&path)
    }
}
