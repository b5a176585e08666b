//! NDJSON bodies and result checking for the `_bulk` API

use super::types::BulkResponse;
use crate::error::StorageError;
use moviesearch_core::DatasetRow;
use serde_json::json;

pub(crate) const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Build a bulk body: one `index` action line and one document line per row.
///
/// The body ends with a newline, which the engine requires.
pub(crate) fn build_bulk_body(index: &str, rows: &[DatasetRow]) -> Result<String, StorageError> {
    let action = serde_json::to_string(&json!({ "index": { "_index": index } }))
        .map_err(|e| StorageError::SerializationError(format!("bulk action: {e}")))?;

    let mut body = String::new();
    for (position, row) in rows.iter().enumerate() {
        let document = serde_json::to_string(row).map_err(|e| {
            StorageError::SerializationError(format!("cannot encode row {position}: {e}"))
        })?;

        body.reserve(action.len() + document.len() + 2);
        body.push_str(&action);
        body.push('\n');
        body.push_str(&document);
        body.push('\n');
    }

    Ok(body)
}

/// A 2xx bulk reply can still carry per-item failures; turn those into an error.
pub(crate) fn check_bulk_response(response: &BulkResponse) -> Result<(), StorageError> {
    let total = response.items.len();
    let failed: Vec<_> = response
        .items
        .iter()
        .flat_map(|item| item.values())
        .filter(|result| result.error.is_some() || result.status >= 300)
        .collect();

    if !response.errors && failed.is_empty() {
        return Ok(());
    }

    let reason = failed
        .iter()
        .find_map(|result| result.error.as_ref())
        .map(|error| match &error.reason {
            Some(reason) => format!("{}: {reason}", error.kind),
            None => error.kind.clone(),
        })
        .unwrap_or_else(|| "engine reported errors without item details".to_string());

    Err(StorageError::BulkRejected {
        failed: failed.len(),
        total,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn row(title: &str, popularity: &str) -> DatasetRow {
        [("Title", title), ("Popularity", popularity)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_bulk_body_pairs_action_and_document() {
        let rows = vec![row("Inception", "8.3"), row("Up", "7.1")];
        let body = build_bulk_body("movies", &rows).unwrap();

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(body.ends_with('\n'));

        for pair in lines.chunks(2) {
            let action: Value = serde_json::from_str(pair[0]).unwrap();
            assert_eq!(action["index"]["_index"], "movies");
        }

        let first: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first["Title"], "Inception");
        assert_eq!(first["Popularity"], "8.3");
    }

    #[test]
    fn test_bulk_body_escapes_values() {
        let rows = vec![row("Say \"Hi\"\nTwice", "1")];
        let body = build_bulk_body("movies", &rows).unwrap();

        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2);
        let document: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(document["Title"], "Say \"Hi\"\nTwice");
    }

    #[test]
    fn test_bulk_body_empty() {
        assert_eq!(build_bulk_body("movies", &[]).unwrap(), "");
    }

    #[test]
    fn test_check_bulk_response_ok() {
        let response: BulkResponse = serde_json::from_str(
            r#"{"errors": false, "items": [{"index": {"status": 201}}]}"#,
        )
        .unwrap();
        assert!(check_bulk_response(&response).is_ok());
    }

    #[test]
    fn test_check_bulk_response_reports_first_reason() {
        let response: BulkResponse = serde_json::from_str(
            r#"{"errors": true, "items": [
                {"index": {"status": 201}},
                {"index": {"status": 400, "error": {"type": "mapper_parsing_exception", "reason": "bad date"}}},
                {"index": {"status": 400, "error": {"type": "mapper_parsing_exception", "reason": "bad float"}}}
            ]}"#,
        )
        .unwrap();

        match check_bulk_response(&response) {
            Err(StorageError::BulkRejected {
                failed,
                total,
                reason,
            }) => {
                assert_eq!(failed, 2);
                assert_eq!(total, 3);
                assert_eq!(reason, "mapper_parsing_exception: bad date");
            }
            other => panic!("expected BulkRejected, got {other:?}"),
        }
    }
}
