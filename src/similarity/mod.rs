//! Precomputed pairwise cosine similarity, the engine's index.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::math::vector::SparseVec;

/// Dense `n × n` cosine similarity matrix, row-major.
///
/// Row and column order is the catalog order at build time.
/// - symmetric: `get(i, j) == get(j, i)` bit for bit
/// - diagonal is 1.0 for a non-zero vector
/// - a zero vector scores 0.0 against every vector, itself included
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Score every pair eagerly. Only the upper triangle is computed
    /// (rows in parallel) and then mirrored.
    pub fn compute<N>(vectors: &[SparseVec<N>]) -> Self
    where
        N: num::Num + Copy + Into<f64> + Send + Sync,
    {
        let start = Instant::now();
        let n = vectors.len();
        let norms: Vec<f64> = vectors.par_iter().map(|v| v.norm_sq::<f64>().sqrt()).collect();

        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                (i..n)
                    .map(|j| {
                        if norms[i] == 0.0 || norms[j] == 0.0 {
                            0.0
                        } else if i == j {
                            1.0
                        } else {
                            let dot: f64 = vectors[i].dot(&vectors[j]);
                            (dot / (norms[i] * norms[j])).clamp(0.0, 1.0)
                        }
                    })
                    .collect()
            })
            .collect();

        let mut data = vec![0.0; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, score) in row.into_iter().enumerate() {
                let j = i + offset;
                data[i * n + j] = score;
                data[j * n + i] = score;
            }
        }

        let zero_rows = norms.iter().filter(|&&x| x == 0.0).count();
        if zero_rows > 0 {
            debug!(zero_rows, "rows with an empty feature vector score 0.0 everywhere");
        }
        info!(n, elapsed_ms = start.elapsed().as_millis() as u64, "similarity matrix built");
        Self { n, data }
    }

    /// number of rows (= columns)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.data[i * self.n + j])
        } else {
            None
        }
    }

    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.data[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }

    /// true when the backing buffer matches the declared size,
    /// used to validate decoded snapshots
    pub(crate) fn is_well_formed(&self) -> bool {
        self.data.len() == self.n * self.n
    }
}
