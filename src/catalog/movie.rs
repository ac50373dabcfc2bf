// Movie records — the catalog rows that flow through the application.
//
// These are plain data structs, separate from ingestion so the engine and
// output modules can use them without depending on the csv crate.

use serde::{Deserialize, Serialize};

/// A raw metadata field as it arrives from the catalog.
///
/// Catalog exports are inconsistent: a field may already be a structured
/// list of names, or an undecoded string — often a textual list literal
/// straight out of a CSV cell. `engine::normalize` turns either shape into
/// clean tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Already-structured list of names
    List(Vec<String>),
    /// Undecoded text — a list literal, a delimited string, or a plain value
    Text(String),
}

impl FieldValue {
    /// Wrap a list of names.
    pub fn list<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Wrap undecoded text.
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }
}

/// One movie in the catalog. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    /// Unique catalog id (primary key)
    pub id: i64,
    pub title: String,
    /// Genre names, possibly still encoded as a list literal
    #[serde(default)]
    pub genres: Option<FieldValue>,
    /// Keyword names, same encodings as genres
    #[serde(default)]
    pub keywords: Option<FieldValue>,
    /// Comma-delimited cast names
    #[serde(default)]
    pub actors: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    /// TMDB reference id for poster lookups
    #[serde(default)]
    pub poster_id: Option<i64>,
}

impl Movie {
    /// A movie with only the required fields set. Metadata fields start
    /// empty and can be filled with struct-update syntax.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: None,
            keywords: None,
            actors: None,
            director: None,
            vote_average: None,
            popularity: None,
            poster_id: None,
        }
    }
}
