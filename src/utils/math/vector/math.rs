use std::cmp::Ordering;
use std::ops::AddAssign;

use num::Num;

use super::SparseVec;

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    /// Dot product
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// Both vectors are walked once in index order (merge join).
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        let (a_inds, a_vals) = (self.inds(), self.vals());
        let (b_inds, b_vals) = (other.inds(), other.vals());
        let mut i = 0;
        let mut j = 0;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    result += a_vals[i].into() * b_vals[j].into();
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    /// Squared euclidean norm
    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for &v in self.vals() {
            let v: R = v.into();
            result += v * v;
        }
        result
    }

    /// Cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    ///
    /// A zero vector is orthogonal to everything, itself included, so this
    /// returns 0.0 instead of NaN.
    #[inline]
    pub fn cosine(&self, other: &Self) -> f64
    where
        N: Into<f64>,
    {
        let norm_a = self.norm_sq::<f64>();
        let norm_b = other.norm_sq::<f64>();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        let dot: f64 = self.dot(other);
        // clamp rounding noise, counts are never negative
        (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_and_norm() {
        let a = SparseVec::<u32>::from_dense(&[1, 0, 2, 0, 3]);
        let b = SparseVec::<u32>::from_dense(&[0, 4, 1, 0, 2]);
        assert_eq!(a.dot::<f64>(&b), 8.0);
        assert_eq!(a.norm_sq::<f64>(), 14.0);
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let a = SparseVec::<u32>::from_dense(&[1, 2, 0]);
        let b = SparseVec::<u32>::from_dense(&[2, 4, 0]);
        assert!((a.cosine(&b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let a = SparseVec::<u32>::from_dense(&[1, 2, 0]);
        let z = SparseVec::<u32>::new(3);
        assert_eq!(a.cosine(&z), 0.0);
        assert_eq!(z.cosine(&z), 0.0);
    }
}
