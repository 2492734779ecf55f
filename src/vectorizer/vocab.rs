use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::{fold_case, FeatureVector};

/// Distinct term -> column position.
///
/// Columns are assigned in ascending lexical order of the terms, so the same
/// set of documents always yields the same layout regardless of row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
    lowercase: bool,
}

impl Vocabulary {
    pub(crate) fn from_terms<I, T>(terms: I, lowercase: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut set: IndexSet<Box<str>> =
            terms.into_iter().map(|t| Box::from(t.as_ref())).collect();
        set.sort();
        Self { terms: set, lowercase }
    }

    /// vector dimension
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn column(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    #[inline]
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get_index(column).map(|t| t.as_ref())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// terms in column order
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(|t| t.as_ref())
    }

    /// Count the whitespace terms of `text`; terms outside the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let pairs = text
            .split_whitespace()
            .filter_map(|t| self.column(&fold_case(t, self.lowercase)))
            .map(|col| (col as u32, 1u32));
        FeatureVector::from_pairs(self.len(), pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_lexical() {
        let v = Vocabulary::from_terms(["zelda", "mario", "kirby", "mario"], false);
        assert_eq!(v.len(), 3);
        assert_eq!(v.column("kirby"), Some(0));
        assert_eq!(v.column("zelda"), Some(2));
        assert_eq!(v.term(1), Some("mario"));
        assert_eq!(v.column("link"), None);
    }

    #[test]
    fn transform_ignores_unseen_terms() {
        let v = Vocabulary::from_terms(["a", "b"], false);
        let vec = v.transform("a c a b d");
        assert_eq!(vec.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
    }
}
