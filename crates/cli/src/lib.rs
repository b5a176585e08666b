//! Library interface for the moviesearch binary
//!
//! Start-up is split into steps so integration tests can drive them with an
//! in-memory engine; `main.rs` only parses arguments and sets up logging.

use anyhow::{Context, Result};
use moviesearch_core::config::Config;
use moviesearch_indexer::{ensure_index, load_rows, SeedOutcome};
use moviesearch_storage::{create_search_engine, movie_index_mapping, SearchEngine};
use std::path::{Path, PathBuf};
use tracing::info;

/// Load variables from a `.env` file into the process environment
///
/// With no path, a `.env` in the working directory or one of its parents is
/// used if present. Variables already set in the environment win.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
            Ok(Some(path.to_path_buf()))
        }
        None => Ok(dotenvy::dotenv().ok()),
    }
}

/// Load and validate configuration
///
/// `dataset` overrides `dataset.path` from every other source.
pub fn load_config(config_path: Option<&Path>, dataset: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load configuration")?;
    if let Some(path) = dataset {
        config.dataset.path = path;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Read the dataset and make sure the configured index holds it
///
/// The dataset is read before the engine is contacted, so a broken file
/// fails start-up without touching the index.
pub async fn seed_index(config: &Config, engine: &dyn SearchEngine) -> Result<SeedOutcome> {
    let rows = load_rows(&config.dataset.path)?;
    let outcome = ensure_index(
        engine,
        &config.engine.index_name,
        &movie_index_mapping(),
        &rows,
    )
    .await?;
    Ok(outcome)
}

/// Seed the index, then serve HTTP until Ctrl+C
pub async fn run(config: Config) -> Result<()> {
    info!(
        "Using search engine at {} (index '{}')",
        config.engine.url, config.engine.index_name
    );
    let engine = create_search_engine(&config.engine)?;

    match seed_index(&config, engine.as_ref()).await? {
        SeedOutcome::AlreadyPresent => info!("Serving existing index"),
        SeedOutcome::Seeded { documents } => {
            info!("Serving freshly seeded index ({documents} documents)")
        }
    }

    moviesearch_server::run_server(&config, engine).await?;
    Ok(())
}
