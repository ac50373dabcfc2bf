// Dense all-pairs similarity index.
//
// The matrix is built once from the fitted vectors and cached; a query is
// a row slice plus a stable sort. Memory, not throughput, bounds feasible
// catalog size here, so the matrix is a plain row-major Vec<f64> and both
// mirror halves are stored for contiguous row reads.

use super::vectorizer::SparseVector;

/// Precomputed pairwise similarity over the whole catalog.
///
/// Entry `(i, j)` is the linear-kernel (dot-product) similarity between
/// rows `i` and `j`. With L2-normalized TF-IDF vectors this is a cosine
/// similarity and the diagonal is 1 for every nonzero document.
#[derive(Debug)]
pub struct SimilarityIndex {
    n: usize,
    matrix: Vec<f64>,
}

impl SimilarityIndex {
    /// Compute the full pairwise matrix. Each pair is scored once and
    /// mirrored.
    pub fn build(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();
        let mut matrix = vec![0.0; n * n];

        for i in 0..n {
            for j in i..n {
                let score = vectors[i].dot(&vectors[j]);
                matrix[i * n + j] = score;
                matrix[j * n + i] = score;
            }
        }

        Self { n, matrix }
    }

    /// Number of catalog rows in the index.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between two row positions.
    pub fn score(&self, i: usize, j: usize) -> f64 {
        self.matrix[i * self.n + j]
    }

    /// The `k` row positions most similar to `row`, excluding `row` itself.
    ///
    /// Descending by score; the sort is stable over ascending candidates,
    /// so exact ties resolve to the lower original row position.
    pub fn top_k(&self, row: usize, k: usize) -> Vec<(usize, f64)> {
        let scores = &self.matrix[row * self.n..(row + 1) * self.n];

        let mut ranked: Vec<(usize, f64)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(position, _)| position != row)
            .collect();

        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(k);
        ranked
    }
}
