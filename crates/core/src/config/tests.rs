//! Tests for configuration module

use super::loading::parse_origin_list;
use super::*;
use crate::error::{Error, Result};
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

fn with_env_vars<F, T>(vars: &[(&str, &str)], f: F) -> T
where
    F: FnOnce() -> T,
{
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    let result = f();
    for (key, _) in vars {
        std::env::remove_var(key);
    }
    result
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [engine]
        url = "http://search.internal:9200"
        index_name = "films"

        [dataset]
        path = "/data/movies.csv"

        [server]
        port = 9000
        allowed_origins = ["https://movies.example"]
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert_eq!(config.engine.url, "http://search.internal:9200");
    assert_eq!(config.engine.index_name, "films");
    assert_eq!(config.dataset.path, PathBuf::from("/data/movies.csv"));
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.allowed_origins, vec!["https://movies.example"]);
}

#[test]
fn test_from_toml_str_empty_applies_defaults() {
    let config = Config::from_toml_str("").expect("Failed to parse empty TOML");

    assert_eq!(config.engine.url, "http://localhost:9200");
    assert_eq!(config.engine.index_name, "movies");
    assert_eq!(config.engine.timeout_secs, 30);
    assert_eq!(config.engine.max_results, 10);
    assert_eq!(config.dataset.path, PathBuf::from("datasets/movies.csv"));
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.allowed_origins, vec!["http://localhost:5173"]);
}

#[test]
fn test_from_toml_str_invalid_syntax() {
    let toml = r#"
        [engine
        url = "http://localhost:9200"
    "#;

    let result = Config::from_toml_str(toml);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_validate_default_config() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_engine_url() {
    let mut config = Config::default();

    config.engine.url = String::new();
    assert!(config.validate().is_err());

    config.engine.url = "localhost:9200".to_string();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Must start with http:// or https://"));

    config.engine.url = "https://es.example:9243".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_index_names() {
    let mut config = Config::default();

    for bad in ["", "Movies", "_movies", "-movies", "my movies", "a/b", "a,b", "a#b"] {
        config.engine.index_name = bad.to_string();
        assert!(
            config.validate().is_err(),
            "index name {bad:?} should be rejected"
        );
    }

    for good in ["movies", "movies-2024", "movies_v2", "films.en"] {
        config.engine.index_name = good.to_string();
        assert!(
            config.validate().is_ok(),
            "index name {good:?} should be accepted"
        );
    }
}

#[test]
fn test_validate_max_results_bounds() {
    let mut config = Config::default();

    config.engine.max_results = 0;
    assert!(config.validate().is_err());

    config.engine.max_results = 10_001;
    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("too large"));

    config.engine.max_results = 10_000;
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_zero_timeout_and_port() {
    let mut config = Config::default();
    config.engine.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.server.port = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_from_file_reads_toml() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [engine]
        index_name = "films"
        timeout_secs = 5

        [dataset]
        path = "fixtures/films.csv"
    "#,
    )?;

    let config = Config::from_file(file.path())?;
    assert_eq!(config.engine.index_name, "films");
    assert_eq!(config.engine.timeout_secs, 5);
    assert_eq!(config.dataset.path, PathBuf::from("fixtures/films.csv"));
    Ok(())
}

#[test]
fn test_from_file_missing_file_uses_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = Config::from_file(&dir.path().join("absent.toml"))?;
    assert_eq!(config.engine.timeout_secs, 30);
    Ok(())
}

#[test]
fn test_load_explicit_missing_path_is_error() {
    let result = Config::load(Some(std::path::Path::new("/nonexistent/moviesearch.toml")));
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Config file not found"));
}

#[test]
fn test_env_overrides_file() -> Result<()> {
    let file = create_temp_config_file(
        r#"
        [engine]
        url = "http://from-file:9200"
        max_results = 20
    "#,
    )?;

    let config = with_env_vars(
        &[
            ("ELASTIC_ADDRESS", "http://from-env:9200"),
            ("ALLOWED_ORIGINS", "http://a.example, http://b.example,"),
            ("MOVIESEARCH_ENGINE__MAX_RESULTS", "25"),
        ],
        || Config::from_file(file.path()),
    )?;

    assert_eq!(config.engine.url, "http://from-env:9200");
    assert_eq!(config.engine.max_results, 25);
    assert_eq!(
        config.server.allowed_origins,
        vec!["http://a.example", "http://b.example"]
    );
    Ok(())
}

#[test]
fn test_parse_origin_list() {
    assert_eq!(
        parse_origin_list("http://localhost:5173,https://movies.example"),
        vec!["http://localhost:5173", "https://movies.example"]
    );
    assert!(parse_origin_list("").is_empty());
    assert!(parse_origin_list(" , ").is_empty());
}

#[test]
fn test_prefixed_env_sets_nested_keys() -> Result<()> {
    let file = create_temp_config_file("[server]\nport = 8081\n")?;

    let config = with_env_vars(
        &[("MOVIESEARCH_SERVER__PORT", "9123")],
        || Config::from_file(file.path()),
    )?;

    assert_eq!(config.server.port, 9123);
    Ok(())
}
