//! Movie data model
//!
//! A [`DatasetRow`] is one CSV record exactly as read; a [`Movie`] is the
//! normalized, string-only shape returned to API clients.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// One record of the movie dataset, keyed by the header row.
///
/// Fields keep the header order and their raw text. Nothing is trimmed,
/// parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatasetRow {
    fields: Vec<(String, String)>,
}

impl DatasetRow {
    /// Build a row from `(column, value)` pairs in header order
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value of `column`, if the row has it
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Column names in header order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for DatasetRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Serialized as a flat JSON object, which is the document sent to the engine.
impl Serialize for DatasetRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A movie as returned by `GET /search`
///
/// Every field is a string: the dataset is never type-coerced on the way in,
/// so nothing is coerced on the way out either.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Original_Language")]
    pub original_language: String,
    #[serde(rename = "Overview")]
    pub overview: String,
    #[serde(rename = "Popularity")]
    pub popularity: String,
    #[serde(rename = "Poster_Url")]
    pub poster_url: String,
    #[serde(rename = "Release_Date")]
    pub release_date: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Vote_Average")]
    pub vote_average: String,
    #[serde(rename = "Vote_Count")]
    pub vote_count: String,
}

impl Movie {
    /// Normalize a stored document into a `Movie`
    ///
    /// `id` is the engine's document id. Missing fields become empty strings;
    /// non-string scalars keep their JSON text.
    pub fn from_document(id: impl Into<String>, source: &Map<String, Value>) -> Self {
        let field = |name: &str| source.get(name).map(value_as_text).unwrap_or_default();

        Self {
            id: id.into(),
            genre: field("Genre"),
            original_language: field("Original_Language"),
            overview: field("Overview"),
            popularity: field("Popularity"),
            poster_url: field("Poster_Url"),
            release_date: field("Release_Date"),
            title: field("Title"),
            vote_average: field("Vote_Average"),
            vote_count: field("Vote_Count"),
        }
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Response body of `GET /search`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoviesResponse {
    pub movies: Vec<Movie>,
}
