pub mod math;
pub mod serde;

use std::fmt::{self, Debug};
use std::ops::Index;

use num::Num;

use crate::utils::sort::sort_soa_by_index;

/// SparseVec is a sparse vector that treats zero as the implicit element.
/// It keeps `inds` and `vals` as parallel arrays (SoA):
/// `inds` holds the logical position of each stored element,
/// `vals` holds its value.
///
/// Stored elements are always sorted by ascending `inds`
/// and never contain an explicit zero.
#[derive(Clone, PartialEq)]
pub struct SparseVec<N>
where
    N: Num,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
    zero: N,
}

impl<N> SparseVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new(len: usize) -> Self {
        SparseVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
            zero: N::zero(),
        }
    }

    #[inline]
    pub fn with_capacity(len: usize, nnz: usize) -> Self {
        SparseVec {
            inds: Vec::with_capacity(nnz),
            vals: Vec::with_capacity(nnz),
            len,
            zero: N::zero(),
        }
    }

    /// Build from unordered `(index, value)` pairs.
    /// Zero values are dropped, duplicated indices are summed.
    ///
    /// # Panics
    /// debug only: an index outside `len`
    pub fn from_pairs<I>(len: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, N)>,
    {
        let (mut inds, mut vals): (Vec<u32>, Vec<N>) = pairs
            .into_iter()
            .filter(|(_, v)| *v != N::zero())
            .unzip();
        debug_assert!(inds.iter().all(|&i| (i as usize) < len), "index out of bounds");
        sort_soa_by_index(&mut inds, &mut vals);

        // merge duplicated indices, sort is stable so first value goes first
        let mut out = SparseVec::with_capacity(len, inds.len());
        for (idx, val) in inds.into_iter().zip(vals) {
            match out.inds.last() {
                Some(&last) if last == idx => {
                    if let Some(acc) = out.vals.last_mut() {
                        *acc = *acc + val;
                    }
                }
                _ => {
                    out.inds.push(idx);
                    out.vals.push(val);
                }
            }
        }
        out.shrink_to_fit();
        out
    }

    /// Build from a dense slice
    pub fn from_dense(dense: &[N]) -> Self {
        let pairs = dense
            .iter()
            .enumerate()
            .map(|(i, v)| (i as u32, *v));
        Self::from_pairs(dense.len(), pairs)
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    /// logical dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// true when every element is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inds.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(&self.vals[pos]),
            Err(_) => Some(&self.zero),
        }
    }

    /// Iterate stored elements as `(index, value)` in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(i, v)| (*i as usize, v))
    }

    /// Iterate all logical elements including zeros
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &N> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    #[inline]
    pub(crate) fn inds(&self) -> &[u32] {
        &self.inds
    }

    #[inline]
    pub(crate) fn vals(&self) -> &[N] {
        &self.vals
    }
}

impl<N> Index<usize> for SparseVec<N>
where
    N: Num + Copy,
{
    type Output = N;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Some(v) => v,
            None => panic!("index {} out of bounds for SparseVec of len {}", index, self.len),
        }
    }
}

impl<N> Debug for SparseVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // only stored entries
            write!(f, "SparseVec(len: {}, ", self.len)?;
            f.debug_map().entries(self.raw_iter()).finish()?;
            write!(f, ")")
        } else {
            f.debug_list().entries(self.iter()).finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_sorts_merges_and_drops_zero() {
        let v = SparseVec::<u32>::from_pairs(6, vec![(4, 1), (1, 2), (4, 3), (2, 0)]);
        assert_eq!(v.len(), 6);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.raw_iter().map(|(i, v)| (i, *v)).collect::<Vec<_>>(), vec![(1, 2), (4, 4)]);
        assert_eq!(v[2], 0);
        assert_eq!(v.get(6), None);
    }

    #[test]
    fn dense_roundtrip_through_iter() {
        let dense = [0.0, 1.5, 0.0, 2.0];
        let v = SparseVec::from_dense(&dense);
        assert_eq!(v.iter().copied().collect::<Vec<f64>>(), dense.to_vec());
        assert!(!v.is_zero());
        assert!(SparseVec::<f64>::new(3).is_zero());
    }
}
