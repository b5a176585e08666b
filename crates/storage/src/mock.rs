//! In-memory search engine for tests
//!
//! Keeps indices in a map, counts lifecycle calls, and answers searches with a
//! case-insensitive phrase-prefix match on `Title`.

use crate::error::StorageError;
use crate::{IndexManager, MovieSearch};
use async_trait::async_trait;
use moviesearch_core::{DatasetRow, Error, Movie};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Operation the mock should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Probe,
    Create,
    Bulk,
    Search,
    Health,
}

#[derive(Debug, Default)]
struct MockIndex {
    mapping: Value,
    documents: Vec<(String, Map<String, Value>)>,
}

/// In-memory stand-in for the engine
#[derive(Debug, Default)]
pub struct MockSearchEngine {
    indices: Mutex<HashMap<String, MockIndex>>,
    failures: Mutex<Vec<MockFailure>>,
    probe_calls: AtomicUsize,
    create_calls: AtomicUsize,
    bulk_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl MockSearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock with `index` already present and holding `rows`
    pub fn with_index(index: &str, rows: &[DatasetRow]) -> Self {
        let mock = Self::new();
        mock.lock_indices().insert(
            index.to_string(),
            MockIndex {
                mapping: Value::Null,
                documents: to_documents(0, rows),
            },
        );
        mock
    }

    /// Make every later call of `operation` fail
    pub fn fail_on(self, operation: MockFailure) -> Self {
        lock(&self.failures).push(operation);
        self
    }

    pub fn probe_calls(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn bulk_calls(&self) -> usize {
        self.bulk_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of documents stored in `index`, if it exists
    pub fn document_count(&self, index: &str) -> Option<usize> {
        self.lock_indices().get(index).map(|i| i.documents.len())
    }

    /// Mapping `index` was created with, if it was created through `create_index`
    pub fn mapping(&self, index: &str) -> Option<Value> {
        self.lock_indices()
            .get(index)
            .map(|i| i.mapping.clone())
            .filter(|m| !m.is_null())
    }

    fn lock_indices(&self) -> MutexGuard<'_, HashMap<String, MockIndex>> {
        lock(&self.indices)
    }

    fn check(&self, operation: MockFailure) -> Result<(), Error> {
        if lock(&self.failures).contains(&operation) {
            return Err(StorageError::BackendError {
                status: 500,
                body: format!("mock failure: {operation:?}"),
            }
            .into());
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn to_documents(offset: usize, rows: &[DatasetRow]) -> Vec<(String, Map<String, Value>)> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let source = row
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect();
            ((offset + i + 1).to_string(), source)
        })
        .collect()
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Phrase match where the last query term only needs to prefix a title term
fn phrase_prefix_matches(title: &str, query: &str) -> bool {
    let query = tokens(query);
    let Some((last, leading)) = query.split_last() else {
        return false;
    };
    let title = tokens(title);

    title.windows(query.len()).any(|window| {
        window[..leading.len()] == *leading && window[leading.len()].starts_with(last.as_str())
    })
}

#[async_trait]
impl IndexManager for MockSearchEngine {
    async fn index_exists(&self, index: &str) -> Result<bool, Error> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.check(MockFailure::Probe)?;
        Ok(self.lock_indices().contains_key(index))
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), Error> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check(MockFailure::Create)?;
        debug!("MockSearchEngine: create_index called for {index}");

        let mut indices = self.lock_indices();
        if indices.contains_key(index) {
            return Err(StorageError::BackendError {
                status: 400,
                body: format!("resource_already_exists_exception: index [{index}]"),
            }
            .into());
        }
        indices.insert(
            index.to_string(),
            MockIndex {
                mapping: body.clone(),
                documents: Vec::new(),
            },
        );
        Ok(())
    }

    async fn bulk_index(&self, index: &str, rows: &[DatasetRow]) -> Result<usize, Error> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        self.check(MockFailure::Bulk)?;
        debug!(
            "MockSearchEngine: bulk_index called for {index} with {} rows",
            rows.len()
        );

        let mut indices = self.lock_indices();
        let target = indices.entry(index.to_string()).or_default();
        let documents = to_documents(target.documents.len(), rows);
        target.documents.extend(documents);
        Ok(rows.len())
    }

    async fn health_check(&self) -> Result<(), Error> {
        self.check(MockFailure::Health)
    }
}

#[async_trait]
impl MovieSearch for MockSearchEngine {
    async fn search_movies(
        &self,
        index: &str,
        query: &str,
        size: usize,
    ) -> Result<Vec<Movie>, Error> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check(MockFailure::Search)?;

        let indices = self.lock_indices();
        let target = indices
            .get(index)
            .ok_or_else(|| StorageError::IndexNotFound(index.to_string()))?;

        Ok(target
            .documents
            .iter()
            .filter(|(_, source)| {
                source
                    .get("Title")
                    .and_then(Value::as_str)
                    .is_some_and(|title| phrase_prefix_matches(title, query))
            })
            .take(size)
            .map(|(id, source)| Movie::from_document(id.clone(), source))
            .collect())
    }
}
