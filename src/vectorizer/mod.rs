//! Count vectorizer: whitespace terms -> sparse term-count vectors over a
//! vocabulary shared by the whole catalog.

pub mod vocab;

use std::borrow::Cow;

use rayon::prelude::*;
use tracing::debug;

use crate::config::VectorizerConfig;
use crate::utils::math::vector::SparseVec;

pub use vocab::Vocabulary;

/// Term counts of one feature bag, dimension = vocabulary size
pub type FeatureVector = SparseVec<u32>;

#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    config: VectorizerConfig,
}

impl CountVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    /// Collect every distinct term of `docs`.
    pub fn fit<D>(&self, docs: &[D]) -> Vocabulary
    where
        D: AsRef<str>,
    {
        let vocab = Vocabulary::from_terms(
            docs.iter()
                .flat_map(|d| d.as_ref().split_whitespace())
                .map(|t| fold_case(t, self.config.lowercase)),
            self.config.lowercase,
        );
        debug!(docs = docs.len(), terms = vocab.len(), "vocabulary fitted");
        vocab
    }

    /// Fit the vocabulary, then count every document against it.
    /// Vectors come back in `docs` order.
    pub fn fit_transform<D>(&self, docs: &[D]) -> (Vocabulary, Vec<FeatureVector>)
    where
        D: AsRef<str> + Sync,
    {
        let vocab = self.fit(docs);
        let vectors = docs
            .par_iter()
            .map(|d| vocab.transform(d.as_ref()))
            .collect();
        (vocab, vectors)
    }
}

#[inline]
pub(crate) fn fold_case(term: &str, lowercase: bool) -> Cow<'_, str> {
    if lowercase {
        Cow::Owned(term.to_lowercase())
    } else {
        Cow::Borrowed(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_terms_per_document() {
        let docs = ["b a b", "c a", ""];
        let (vocab, vectors) = CountVectorizer::default().fit_transform(&docs);
        assert_eq!(vocab.terms().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0].iter().copied().collect::<Vec<_>>(), vec![1, 2, 0]);
        assert_eq!(vectors[1].iter().copied().collect::<Vec<_>>(), vec![1, 0, 1]);
        assert!(vectors[2].is_zero());
        assert!(vectors.iter().all(|v| v.len() == 3));
    }

    #[test]
    fn case_sensitive_by_default() {
        let (vocab, _) = CountVectorizer::default().fit_transform(&["Space space"]);
        assert_eq!(vocab.len(), 2);

        let folding = CountVectorizer::new(VectorizerConfig { lowercase: true });
        let (vocab, vectors) = folding.fit_transform(&["Space space"]);
        assert_eq!(vocab.len(), 1);
        assert_eq!(vectors[0][0], 2);
    }
}
