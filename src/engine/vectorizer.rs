// TF-IDF vectorization of the soup corpus.
//
// Fits a capped, document-frequency-filtered vocabulary over every soup,
// then projects each soup into an L2-normalized sparse vector. Term counts
// are weighted by smoothed inverse document frequency, so the dot product
// of two vectors is their cosine similarity.

use std::collections::{HashMap, HashSet};

use stop_words::{get, LANGUAGE};
use tracing::{debug, warn};

/// Default vocabulary cap: the 10,000 highest-frequency qualifying terms.
pub const DEFAULT_MAX_FEATURES: usize = 10_000;

/// Default minimum document frequency: terms in fewer documents are cut.
pub const DEFAULT_MIN_DF: usize = 5;

/// A sparse feature vector: `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Dot product via a merge walk over the sorted entries.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let mut sum = 0.0;
        let (mut a, mut b) = (0, 0);

        while a < self.entries.len() && b < other.entries.len() {
            let (col_a, weight_a) = self.entries[a];
            let (col_b, weight_b) = other.entries[b];
            match col_a.cmp(&col_b) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += weight_a * weight_b;
                    a += 1;
                    b += 1;
                }
            }
        }

        sum
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt()
    }

    /// Number of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }
}

/// TF-IDF vectorizer with a frozen-after-fit vocabulary.
///
/// Defaults match the engine contract: English stop words excluded, at most
/// 10,000 features, terms in fewer than 5 documents discarded. The builder
/// setters exist so tests (and tuning) can run on small corpora.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stop_words: HashSet<String>,
    max_features: usize,
    min_df: usize,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        let stop_words: Vec<String> = get(LANGUAGE::English);
        Self {
            stop_words: stop_words.into_iter().collect(),
            max_features: DEFAULT_MAX_FEATURES,
            min_df: DEFAULT_MIN_DF,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    #[must_use]
    pub fn with_min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df.max(1);
        self
    }

    /// Learn the vocabulary and document frequencies from the corpus.
    ///
    /// Refitting replaces the previous vocabulary wholesale — any similarity
    /// matrix computed against the old fit is invalid afterwards, so the
    /// facade always rebuilds the two together.
    pub fn fit(&mut self, documents: &[String]) {
        let n_docs = documents.len();
        let mut collection_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen: HashSet<String> = HashSet::new();
            for token in self.tokenize(doc) {
                *collection_freq.entry(token.clone()).or_insert(0) += 1;
                seen.insert(token);
            }
            for token in seen {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let mut surviving = select_terms(&collection_freq, &doc_freq, self.min_df);

        // A tiny corpus can leave nothing above the document-frequency cut,
        // which would make every vector zero. Retry without the cut rather
        // than fit an empty vocabulary.
        if surviving.is_empty() && !collection_freq.is_empty() {
            warn!(
                min_df = self.min_df,
                documents = n_docs,
                "No term met the document-frequency cut; refitting with min_df = 1"
            );
            surviving = select_terms(&collection_freq, &doc_freq, 1);
        }

        // Highest collection frequency first, ties alphabetical, capped.
        surviving.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        surviving.truncate(self.max_features);

        self.vocabulary = surviving
            .iter()
            .enumerate()
            .map(|(column, (term, _))| (term.clone(), column))
            .collect();

        self.idf = vec![0.0; self.vocabulary.len()];
        for (term, &column) in &self.vocabulary {
            let df = doc_freq.get(term).copied().unwrap_or(0);
            self.idf[column] = ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
        }

        debug!(
            vocabulary = self.vocabulary.len(),
            documents = n_docs,
            "Vectorizer fitted"
        );
    }

    /// Project documents into TF-IDF space using the fitted vocabulary.
    /// Out-of-vocabulary tokens are ignored. One vector per document, in
    /// input order.
    pub fn transform(&self, documents: &[String]) -> Vec<SparseVector> {
        documents
            .iter()
            .map(|doc| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for token in self.tokenize(doc) {
                    if let Some(&column) = self.vocabulary.get(&token) {
                        *counts.entry(column).or_insert(0.0) += 1.0;
                    }
                }

                let mut entries: Vec<(usize, f64)> = counts
                    .into_iter()
                    .map(|(column, tf)| (column, tf * self.idf[column]))
                    .collect();
                entries.sort_by_key(|&(column, _)| column);

                let norm = entries
                    .iter()
                    .map(|(_, weight)| weight * weight)
                    .sum::<f64>()
                    .sqrt();
                if norm > 0.0 {
                    for entry in &mut entries {
                        entry.1 /= norm;
                    }
                }

                SparseVector { entries }
            })
            .collect()
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Vec<SparseVector> {
        self.fit(documents);
        self.transform(documents)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// The column assigned to a term, if it survived the fit.
    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Lowercased maximal runs of word characters, length >= 2, stop words
    /// dropped. Single characters (including the bare digits that fall out
    /// of numeric fields) never become features.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|token| token.chars().count() >= 2)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

fn select_terms(
    collection_freq: &HashMap<String, usize>,
    doc_freq: &HashMap<String, usize>,
    min_df: usize,
) -> Vec<(String, usize)> {
    collection_freq
        .iter()
        .filter(|(term, _)| doc_freq.get(*term).copied().unwrap_or(0) >= min_df)
        .map(|(term, &freq)| (term.clone(), freq))
        .collect()
}
