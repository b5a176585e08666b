//! Movie dataset ingestion
//!
//! Loads the CSV dataset ([`load_rows`]) and seeds the search index with it
//! at start-up ([`ensure_index`]). Failures here are [`IngestError`]s, which
//! the binary treats as fatal.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod dataset;
pub mod error;
mod seed;

pub use dataset::{load_rows, read_rows};
pub use error::IngestError;
pub use seed::{ensure_index, SeedOutcome};

// Re-export error types from core
pub use moviesearch_core::error::{Error, Result};
