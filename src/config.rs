//! Build configuration for the recommendation engine.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! default_top_k = 10
//!
//! [keyword]
//! lowercase = false
//! min_phrase_len = 1
//! include_repeated_phrases = true
//!
//! [vectorizer]
//! lowercase = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default number of recommendations returned per query
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub keyword: KeywordConfig,
    pub vectorizer: VectorizerConfig,
    /// `k` used when the caller does not pass one
    pub default_top_k: usize,
    /// fail `initialize` on an empty catalog instead of building a 0x0 engine
    pub reject_empty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keyword: KeywordConfig::default(),
            vectorizer: VectorizerConfig::default(),
            default_top_k: DEFAULT_TOP_K,
            reject_empty: false,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

/// Keyword extraction knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// lower-case words before scoring, otherwise summary casing is kept
    pub lowercase: bool,
    /// phrases shorter than this (in words) are dropped
    pub min_phrase_len: usize,
    /// phrases longer than this are dropped, `None` = unbounded
    pub max_phrase_len: Option<usize>,
    /// count a phrase once per occurrence rather than once per summary
    pub include_repeated_phrases: bool,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            lowercase: false,
            min_phrase_len: 1,
            max_phrase_len: None,
            include_repeated_phrases: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// fold terms to lower case before counting
    pub lowercase: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_toml_overrides() {
        let cfg = EngineConfig::from_toml_str(
            "default_top_k = 3\n[keyword]\nlowercase = true\nmax_phrase_len = 4\n",
        )
        .unwrap();
        assert_eq!(cfg.default_top_k, 3);
        assert!(cfg.keyword.lowercase);
        assert_eq!(cfg.keyword.max_phrase_len, Some(4));
        assert_eq!(cfg.keyword.min_phrase_len, 1);
        assert!(!cfg.vectorizer.lowercase);
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = EngineConfig::from_toml_str("default_top_k = \"ten\"").unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Config(_)));
    }
}
