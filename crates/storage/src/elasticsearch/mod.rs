//! Elasticsearch backend over its REST API

mod bulk;
mod client;
mod indices;
mod search;
mod types;

pub use client::ElasticsearchClient;
pub use search::phrase_prefix_query;
pub use types::{SearchHit, SearchResponse};
