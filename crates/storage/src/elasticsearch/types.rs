//! Wire types for the Elasticsearch REST API

use moviesearch_core::Movie;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Response of `POST /{index}/_search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(rename = "_shards", default)]
    pub shards: Shards,
    pub hits: Hits,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shards {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub successful: u32,
    #[serde(default)]
    pub skipped: u32,
    #[serde(default)]
    pub failed: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: Option<Total>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Total {
    pub value: u64,
    pub relation: String,
}

/// One matching document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_index", default)]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    /// Null when the query is sorted on something other than score
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

impl SearchHit {
    /// Normalized movie for the API response
    pub fn to_movie(&self) -> Movie {
        Movie::from_document(self.id.clone(), &self.source)
    }
}

impl SearchResponse {
    pub fn into_movies(self) -> Vec<Movie> {
        self.hits.hits.iter().map(SearchHit::to_movie).collect()
    }
}

/// Response of `POST /_bulk`
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct BulkResponse {
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<HashMap<String, BulkItem>>,
}

/// Outcome of one action in a bulk request, keyed by action name in the response
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct BulkItem {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub error: Option<BulkItemError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct BulkItemError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
}
