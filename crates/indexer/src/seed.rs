//! Start-up seeding of the movie index

use crate::error::IngestError;
use moviesearch_core::DatasetRow;
use moviesearch_storage::IndexManager;
use serde_json::Value;
use tracing::info;

/// What [`ensure_index`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The index already existed; nothing was created or uploaded
    AlreadyPresent,
    /// The index was created and `documents` rows were uploaded
    Seeded { documents: usize },
}

/// Make sure `index` exists and holds the dataset
///
/// An existing index is left untouched: its mapping is not compared and rows
/// are not re-uploaded. Otherwise the index is created from `mapping` and all
/// `rows` are uploaded in one refreshed bulk request.
///
/// Assumes a single writer; two instances starting together may both see the
/// index as absent.
pub async fn ensure_index<M>(
    manager: &M,
    index: &str,
    mapping: &Value,
    rows: &[DatasetRow],
) -> Result<SeedOutcome, IngestError>
where
    M: IndexManager + ?Sized,
{
    let exists = manager
        .index_exists(index)
        .await
        .map_err(|source| IngestError::IndexProbe {
            index: index.to_string(),
            source,
        })?;

    if exists {
        info!("Index '{index}' already exists, skipping import");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    info!("Index '{index}' not found, creating index...");
    manager
        .create_index(index, mapping)
        .await
        .map_err(|source| IngestError::CreateIndex {
            index: index.to_string(),
            source,
        })?;

    info!("Indexing {} records...", rows.len());
    let documents = manager
        .bulk_index(index, rows)
        .await
        .map_err(|source| IngestError::BulkIndex {
            index: index.to_string(),
            documents: rows.len(),
            source,
        })?;

    info!("Data imported successfully: {documents} documents in '{index}'");
    Ok(SeedOutcome::Seeded { documents })
}
