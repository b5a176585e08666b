//! moviesearch - title search over a movie dataset
//!
//! Seeds the search index from a CSV file on start-up and serves
//! `GET /search?q=` until interrupted.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moviesearch")]
#[command(about = "Movie title search backed by Elasticsearch")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Environment file to load before reading configuration (default: .env if present)
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,

    /// CSV dataset to seed the index from
    #[arg(short, long, value_name = "PATH")]
    dataset: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    if let Some(path) = moviesearch::load_env_file(cli.env_file.as_deref())? {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = moviesearch::load_config(cli.config.as_deref(), cli.dataset)?;
    moviesearch::run(config).await
}

/// Initialize logging system
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "moviesearch={level},moviesearch_core={level},moviesearch_storage={level},\
             moviesearch_indexer={level},moviesearch_server={level},tower_http={level}"
        ))
        .init();
}
