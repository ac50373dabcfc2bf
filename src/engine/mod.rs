// Similarity engine — soup construction, TF-IDF vectorization, and dense
// nearest-neighbor lookup behind the recommender facade.

pub mod normalize;
pub mod recommender;
pub mod similarity;
pub mod soup;
pub mod vectorizer;

use thiserror::Error;

/// Typed failures surfaced by the engine. Construction errors are fatal;
/// unknown-id errors map to a request-level "not found" at the boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("duplicate movie id {id} in catalog — ids must be unique")]
    DuplicateId { id: i64 },

    #[error("movie id {id} not found in catalog")]
    UnknownId { id: i64 },
}
