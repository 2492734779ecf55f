/// This crate is a content-based game recommendation engine over a static catalog.
pub mod catalog;
pub mod config;
pub mod error;
pub mod feature;
pub mod keyword;
pub mod recommend;
pub mod similarity;
pub mod utils;
pub mod vectorizer;

/// Recommendation Engine
/// The top-level struct of this crate.
/// It is built once from a catalog and then answers "similar game" queries.
///
/// Internally, it holds:
/// - The catalog (row order is the identity of every derived structure)
/// - One feature bag per row
/// - The vocabulary shared by all feature vectors
/// - Sparse term-count vectors, one per row
/// - The precomputed cosine similarity matrix
/// - A name -> row index (first occurrence wins on duplicated names)
///
/// The engine is immutable once built; when the catalog changes, build a new one.
///
/// # Serialization
/// Supported, as a CBOR snapshot (`to_cbor_writer` / `from_cbor_reader`).
pub use recommend::{initialize, Engine, Recommendation};

/// Catalog Store
/// The ordered game table, loaded from the dataset CSV or built from records.
/// `CatalogFilter` and `CatalogView` provide the filtered/searched read-only
/// views, and `Distribution` the per genre / platform / year counts.
pub use catalog::{Catalog, CatalogFilter, CatalogView, Distribution, GameRecord};

/// Keyword Extractor
/// RAKE-style extraction: stop words and punctuation split a summary into
/// phrases, words are scored by co-occurrence degree.
/// An empty summary yields an empty `KeywordSet`.
pub use keyword::{KeywordExtractor, KeywordSet};

/// Feature Bag
/// Keywords plus normalized platform, year, developer, genre and
/// multiplayer values as one whitespace-separated string.
pub use feature::FeatureBag;

/// Count Vectorizer
/// Whitespace terms to sparse term-count vectors over a lexically ordered
/// vocabulary.
pub use vectorizer::{CountVectorizer, FeatureVector, Vocabulary};

/// Similarity Matrix
/// Dense, symmetric, eagerly computed cosine similarity of every row pair.
/// A zero vector scores 0.0 against everything, itself included.
pub use similarity::SimilarityMatrix;

/// Configuration, loadable from TOML. Every field has a default.
pub use config::{EngineConfig, KeywordConfig, VectorizerConfig};

/// Error type and result alias
pub use error::{EngineError, Result};
