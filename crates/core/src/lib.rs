//! Core types for the moviesearch service
//!
//! This crate provides the foundational pieces shared by every other crate:
//!
//! - **Movies**: dataset rows read from CSV and the normalized movie shape
//!   returned by the search API
//! - **Configuration**: layered configuration loading and validation
//! - **Error handling**: Unified error types
//!

pub mod config;
pub mod error;
pub mod movies;

// Re-export main types for convenience
pub use config::{Config, DatasetConfig, EngineConfig, ServerConfig};
pub use error::{Error, Result};
pub use movies::{DatasetRow, Movie, MoviesResponse};
