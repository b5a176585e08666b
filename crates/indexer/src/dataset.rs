//! CSV dataset loading
//!
//! The first record is the header; every later record becomes a
//! [`DatasetRow`] keyed by those header names. Values are kept verbatim.

use crate::error::IngestError;
use moviesearch_core::DatasetRow;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const UTF8_BOM: char = '\u{feff}';

/// Read every row of the CSV file at `path`
///
/// Fails on the first problem: missing or unreadable file, missing header,
/// duplicate column names, or a record whose field count differs from the
/// header. No partial result is returned.
pub fn load_rows(path: &Path) -> Result<Vec<DatasetRow>, IngestError> {
    let path_display = path.display().to_string();
    info!("Loading dataset from {}", path_display);

    let file = File::open(path).map_err(|source| IngestError::Read {
        path: path_display.clone(),
        source,
    })?;
    let rows = read_rows(file, &path_display)?;

    info!("Loaded {} rows from {}", rows.len(), path_display);
    Ok(rows)
}

/// Read every row from any reader; `source` names the input in errors
pub fn read_rows<R: Read>(reader: R, source: &str) -> Result<Vec<DatasetRow>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = read_headers(&mut csv_reader, source)?;
    debug!("Dataset columns: {headers:?}");

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| csv_error(source, e))?;
        if record.len() != headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(IngestError::malformed(
                source,
                format!(
                    "line {line}: expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            ));
        }

        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.clone(), value.to_string()))
                .collect(),
        );
    }

    Ok(rows)
}

fn read_headers<R: Read>(
    reader: &mut csv::Reader<R>,
    source: &str,
) -> Result<Vec<String>, IngestError> {
    let record = reader.headers().map_err(|e| csv_error(source, e))?;
    if record.is_empty() {
        return Err(IngestError::malformed(source, "missing header row"));
    }

    let headers: Vec<String> = record
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == 0 {
                name.trim_start_matches(UTF8_BOM).to_string()
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut seen = HashSet::new();
    if let Some(duplicate) = headers.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(IngestError::malformed(
            source,
            format!("duplicate column '{duplicate}' in header"),
        ));
    }

    Ok(headers)
}

fn csv_error(source: &str, err: csv::Error) -> IngestError {
    let message = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.as_ref().map_or(0, |p| p.line());
            format!("line {line}: expected {expected_len} fields, found {len}")
        }
        csv::ErrorKind::Utf8 { pos, err } => {
            let line = pos.as_ref().map_or(0, |p| p.line());
            format!("line {line}: invalid UTF-8: {err}")
        }
        _ => err.to_string(),
    };

    if err.is_io_error() {
        if let csv::ErrorKind::Io(io) = err.into_kind() {
            return IngestError::Read {
                path: source.to_string(),
                source: io,
            };
        }
    }

    IngestError::malformed(source, message)
}
