//! All-pairs cosine similarity matrix.

use rayon::prelude::*;

/// Square, symmetric matrix of cosine similarities, stored row-major.
///
/// Entry (i, j) is the cosine of feature vectors i and j; the diagonal is
/// pinned to 1.0 so the self-similarity invariant holds even for zero
/// vectors. Computed once, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute the full matrix from per-document feature vectors.
    ///
    /// Rows are computed in parallel; the result is deterministic for a
    /// given input regardless of thread count. Vectors are expected
    /// L2-normalized but actual norms are used, so un-normalized input
    /// still yields correct cosines.
    pub fn from_vectors(vectors: &[Vec<f32>]) -> Self {
        let dim = vectors.len();
        let norms: Vec<f32> = vectors
            .iter()
            .map(|v| v.iter().map(|x| x * x).sum::<f32>().sqrt())
            .collect();

        let rows: Vec<Vec<f32>> = (0..dim)
            .into_par_iter()
            .map(|i| {
                (0..dim)
                    .map(|j| {
                        if i == j {
                            1.0
                        } else {
                            cosine(&vectors[i], &vectors[j], norms[i], norms[j])
                        }
                    })
                    .collect()
            })
            .collect();

        let mut data = Vec::with_capacity(dim * dim);
        for row in rows {
            data.extend(row);
        }

        Self { dim, data }
    }

    /// Matrix dimension (number of movies)
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Similarity row for position `i`.
    ///
    /// Panics if `i` is out of range.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Similarity between positions `i` and `j`.
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(j < self.dim, "column {} out of range for dim {}", j, self.dim);
        self.data[i * self.dim + j]
    }
}

fn cosine(a: &[f32], b: &[f32], norm_a: f32, norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}
