//! Settings and field mapping for the movie index

use serde_json::{json, Value};

/// Name of the custom analyzer applied to `Title` at index time
pub const AUTOCOMPLETE_ANALYZER: &str = "autocomplete";

/// Create-index body for the movie index.
///
/// `Title` is indexed through an edge-n-gram analyzer (grams 1..=20) so that
/// prefixes match, while queries use the standard analyzer. Field types only
/// affect indexing; documents keep their raw string values in `_source`.
pub fn movie_index_mapping() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1,
            "analysis": {
                "analyzer": {
                    AUTOCOMPLETE_ANALYZER: {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": ["lowercase", "autocomplete_filter"]
                    }
                },
                "filter": {
                    "autocomplete_filter": {
                        "type": "edge_ngram",
                        "min_gram": 1,
                        "max_gram": 20
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "Release_Date": {
                    "type": "date",
                    "format": "yyyy-MM-dd"
                },
                "Title": {
                    "type": "text",
                    "analyzer": AUTOCOMPLETE_ANALYZER,
                    "search_analyzer": "standard"
                },
                "Overview": {
                    "type": "text",
                    "analyzer": "standard"
                },
                "Popularity": { "type": "float" },
                "Vote_Count": { "type": "integer" },
                "Vote_Average": { "type": "float" },
                "Original_Language": { "type": "keyword" },
                "Genre": { "type": "keyword" },
                "Poster_Url": {
                    "type": "keyword",
                    "index": false
                }
            }
        }
    })
}
