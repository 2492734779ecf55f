//! Query side: title lookup and nearest-neighbour retrieval over the
//! precomputed similarity matrix.

pub mod serde;

use std::collections::HashMap;
use std::fmt;

use ::serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogFilter, CatalogView};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::feature::{self, FeatureBag};
use crate::keyword::KeywordExtractor;
use crate::similarity::SimilarityMatrix;
use crate::vectorizer::{CountVectorizer, FeatureVector, Vocabulary};

/// Build the engine in one pass. Shorthand for [`Engine::build`].
pub fn initialize(catalog: Catalog, config: &EngineConfig) -> Result<Engine> {
    Engine::build(catalog, config)
}

/// Immutable engine state.
///
/// Everything is computed by [`Engine::build`] before the first query;
/// a changed catalog means building a new engine.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) catalog: Catalog,
    pub(crate) bags: Vec<FeatureBag>,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) vectors: Vec<FeatureVector>,
    pub(crate) similarity: SimilarityMatrix,
    pub(crate) config: EngineConfig,
    /// name -> first row carrying it
    name_index: HashMap<String, usize>,
}

impl Engine {
    /// keywords -> feature bags -> term counts -> similarity matrix
    pub fn build(catalog: Catalog, config: &EngineConfig) -> Result<Self> {
        if catalog.is_empty() && config.reject_empty {
            return Err(EngineError::EmptyCatalog);
        }

        let extractor = KeywordExtractor::new(config.keyword.clone());
        let bags = feature::build_all(&catalog, &extractor);
        debug!(rows = bags.len(), "feature bags built");

        let (vocabulary, vectors) =
            CountVectorizer::new(config.vectorizer.clone()).fit_transform(&bags);
        let similarity = SimilarityMatrix::compute(&vectors);
        info!(
            rows = catalog.len(),
            vocabulary = vocabulary.len(),
            "recommendation engine ready"
        );

        Ok(Self::from_parts(catalog, bags, vocabulary, vectors, similarity, config.clone()))
    }

    pub(crate) fn from_parts(
        catalog: Catalog,
        bags: Vec<FeatureBag>,
        vocabulary: Vocabulary,
        vectors: Vec<FeatureVector>,
        similarity: SimilarityMatrix,
        config: EngineConfig,
    ) -> Self {
        let mut name_index = HashMap::with_capacity(catalog.len());
        for (i, record) in catalog.iter().enumerate() {
            // first occurrence wins for duplicated names
            name_index.entry(record.name.clone()).or_insert(i);
        }
        Self {
            catalog,
            bags,
            vocabulary,
            vectors,
            similarity,
            config,
            name_index,
        }
    }

    /// Row of the first record named exactly `title` (case-sensitive).
    pub fn index_of(&self, title: &str) -> Option<usize> {
        self.name_index.get(title).copied()
    }

    /// `(name, platform)` of the `k` most similar other games, best first.
    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<(String, String)>> {
        Ok(self
            .recommend_scored(title, k)?
            .into_iter()
            .map(|r| (r.name, r.platform))
            .collect())
    }

    /// [`Engine::recommend`] with the configured `default_top_k`.
    pub fn recommend_default(&self, title: &str) -> Result<Vec<(String, String)>> {
        self.recommend(title, self.config.default_top_k)
    }

    /// Rank every other row by similarity to `title`.
    ///
    /// Scores are sorted descending, equal scores keep catalog order.
    /// The queried row is removed by index, so it never appears even when
    /// another row scores as high as it does. Fewer than `k` results come
    /// back only when the catalog has fewer than `k + 1` rows.
    pub fn recommend_scored(&self, title: &str, k: usize) -> Result<Vec<Recommendation>> {
        let idx = self
            .index_of(title)
            .ok_or_else(|| EngineError::NotFound(title.to_string()))?;
        let row = self
            .similarity
            .row(idx)
            .ok_or_else(|| EngineError::NotFound(title.to_string()))?;

        let mut hits = Hits::new(
            row.iter()
                .enumerate()
                .filter(|(j, _)| *j != idx)
                .map(|(j, s)| (j, *s))
                .collect(),
        );
        hits.sort_by_score();
        hits.list.truncate(k);

        let out: Vec<Recommendation> = hits
            .list
            .into_iter()
            .filter_map(|(j, score)| {
                self.catalog.get(j).map(|r| Recommendation {
                    index: j,
                    name: r.name.clone(),
                    platform: r.platform.clone(),
                    score,
                })
            })
            .collect();
        debug!(title, row = idx, k, returned = out.len(), "recommend");
        Ok(out)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Filtered read-only view for the presentation layer
    pub fn view(&self, filter: &CatalogFilter) -> CatalogView<'_> {
        self.catalog.filter(filter)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn feature_bag(&self, index: usize) -> Option<&FeatureBag> {
        self.bags.get(index)
    }

    pub fn feature_bags(&self) -> &[FeatureBag] {
        &self.bags
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

/// One ranked neighbour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// catalog row
    pub index: usize,
    pub name: String,
    pub platform: String,
    pub score: f64,
}

/// `Name (Platform)`
impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.platform)
    }
}

/// Scored rows, (row index, score)
#[derive(Debug, Clone, Default)]
pub struct Hits {
    pub list: Vec<(usize, f64)>,
}

impl Hits {
    pub fn new(list: Vec<(usize, f64)>) -> Self {
        Hits { list }
    }

    /// Sort by descending score. The sort is stable, so rows with
    /// equal scores keep their incoming order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.retain(|(_, s)| !s.is_nan());
        self.list.sort_by(|a, b| b.1.total_cmp(&a.1));
        self
    }
}
