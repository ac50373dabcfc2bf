// Recommender facade — the public entry point of the engine.
//
// Owns the catalog, the id → row index, and the lazily-built pipeline
// (soups → TF-IDF vectors → similarity matrix). The build runs at most
// once per instance: OnceLock makes racing first queries single-flight,
// and rebuild() resets the cell for a manual full refit.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::info;

use crate::catalog::movie::Movie;

use super::similarity::SimilarityIndex;
use super::soup::build_soup;
use super::vectorizer::TfidfVectorizer;
use super::EngineError;

/// Default number of recommendations per query.
pub const DEFAULT_TOP_N: usize = 10;

/// The fitted half of the engine. Vocabulary and matrix are built together
/// and only ever replaced together — partial state is unrepresentable.
#[derive(Debug)]
struct Fitted {
    index: SimilarityIndex,
    vocabulary_size: usize,
}

/// Content-based recommender over an immutable catalog snapshot.
pub struct Recommender {
    catalog: Vec<Movie>,
    indices: HashMap<i64, usize>,
    vectorizer: TfidfVectorizer,
    fitted: OnceLock<Fitted>,
}

impl Recommender {
    /// Build a recommender with the contract-default vectorizer settings.
    ///
    /// Fails if any movie id repeats — the id → row mapping must be a
    /// bijection. The similarity pipeline itself is deferred to first use.
    pub fn new(catalog: Vec<Movie>) -> Result<Self, EngineError> {
        Self::with_vectorizer(catalog, TfidfVectorizer::new())
    }

    /// Same as [`Recommender::new`] with explicit vectorizer settings.
    pub fn with_vectorizer(
        catalog: Vec<Movie>,
        vectorizer: TfidfVectorizer,
    ) -> Result<Self, EngineError> {
        let mut indices = HashMap::with_capacity(catalog.len());
        for (position, movie) in catalog.iter().enumerate() {
            if indices.insert(movie.id, position).is_some() {
                return Err(EngineError::DuplicateId { id: movie.id });
            }
        }

        Ok(Self {
            catalog,
            indices,
            vectorizer,
            fitted: OnceLock::new(),
        })
    }

    /// The `top_n` movies most similar to `id`, best first. The query
    /// movie itself is never in the result.
    ///
    /// Side-effect-free apart from the lazy one-time pipeline build.
    pub fn get_recommendations(
        &self,
        id: i64,
        top_n: usize,
    ) -> Result<Vec<&Movie>, EngineError> {
        let &row = self
            .indices
            .get(&id)
            .ok_or(EngineError::UnknownId { id })?;

        let ranked = self.fitted().index.top_k(row, top_n);
        Ok(ranked
            .into_iter()
            .map(|(position, _)| &self.catalog[position])
            .collect())
    }

    /// O(1) membership check, for boundary pre-validation.
    pub fn contains(&self, id: i64) -> bool {
        self.indices.contains_key(&id)
    }

    /// The catalog record for an id, if known.
    pub fn movie(&self, id: i64) -> Option<&Movie> {
        self.indices.get(&id).map(|&position| &self.catalog[position])
    }

    /// The full catalog, in row order.
    pub fn movies(&self) -> &[Movie] {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Vocabulary size of the fitted pipeline, if it has been built.
    pub fn vocabulary_size(&self) -> Option<usize> {
        self.fitted.get().map(|fitted| fitted.vocabulary_size)
    }

    /// Drop the fitted state. The next query refits the vocabulary and
    /// rebuilds the matrix together — never one without the other.
    pub fn rebuild(&mut self) {
        self.fitted = OnceLock::new();
    }

    fn fitted(&self) -> &Fitted {
        self.fitted.get_or_init(|| {
            let soups: Vec<String> = self.catalog.iter().map(build_soup).collect();

            let mut vectorizer = self.vectorizer.clone();
            let vectors = vectorizer.fit_transform(&soups);
            let index = SimilarityIndex::build(&vectors);

            info!(
                movies = self.catalog.len(),
                vocabulary = vectorizer.vocabulary_size(),
                "Similarity pipeline built"
            );

            Fitted {
                index,
                vocabulary_size: vectorizer.vocabulary_size(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::movie::FieldValue;

    fn movie_with_genres(id: i64, genres: &[&str]) -> Movie {
        Movie {
            genres: Some(FieldValue::list(genres.iter().copied())),
            ..Movie::new(id, format!("Movie {id}"))
        }
    }

    #[test]
    fn duplicate_ids_fail_construction() {
        let catalog = vec![
            movie_with_genres(1, &["Action"]),
            movie_with_genres(1, &["Romance"]),
        ];
        assert_eq!(
            Recommender::new(catalog).err(),
            Some(EngineError::DuplicateId { id: 1 })
        );
    }

    #[test]
    fn pipeline_builds_once_and_is_reused() {
        let catalog = vec![
            movie_with_genres(1, &["Action"]),
            movie_with_genres(2, &["Action"]),
        ];
        let recommender = Recommender::new(catalog).expect("unique ids");

        assert!(recommender.vocabulary_size().is_none());
        recommender
            .get_recommendations(1, 1)
            .expect("known id");
        assert!(recommender.vocabulary_size().is_some());
    }

    #[test]
    fn rebuild_resets_the_fitted_state() {
        let catalog = vec![
            movie_with_genres(1, &["Action"]),
            movie_with_genres(2, &["Action"]),
        ];
        let mut recommender = Recommender::new(catalog).expect("unique ids");
        recommender.get_recommendations(1, 1).expect("known id");
        assert!(recommender.vocabulary_size().is_some());

        recommender.rebuild();
        assert!(recommender.vocabulary_size().is_none());
    }
}
