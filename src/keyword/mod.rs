//! RAKE style keyword extraction.
//!
//! A summary is split into word and punctuation tokens. Stop words and
//! punctuation break the token stream into candidate phrases; every word of a
//! phrase co-occurs with every word of the same phrase (itself included).
//! A word's degree is the sum of the lengths of the phrases it appears in.

pub mod stopwords;

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::KeywordConfig;

pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};

/// Distinct keywords of one summary, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

}

impl From<Vec<String>> for KeywordSet {
    fn from(words: Vec<String>) -> Self {
        Self(words)
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Per word co-occurrence statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WordStats {
    degree: usize,
    frequency: usize,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordExtractor {
    stop_words: StopWords,
    config: KeywordConfig,
}

impl KeywordExtractor {
    pub fn new(config: KeywordConfig) -> Self {
        Self {
            stop_words: StopWords::english(),
            config,
        }
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn config(&self) -> &KeywordConfig {
        &self.config
    }

    /// Distinct words of every scored phrase.
    /// Total over all input, an empty or punctuation-only summary gives an empty set.
    pub fn extract(&self, summary: &str) -> KeywordSet {
        KeywordSet(self.word_stats(summary).into_keys().collect())
    }

    /// `(word, degree)` in first-occurrence order
    pub fn word_degrees(&self, summary: &str) -> Vec<(String, usize)> {
        self.word_stats(summary)
            .into_iter()
            .map(|(w, s)| (w, s.degree))
            .collect()
    }

    /// Phrases scored by the sum of `degree / frequency` of their words,
    /// best first. Equal scores keep first-occurrence order.
    pub fn ranked_phrases(&self, summary: &str) -> Vec<(String, f64)> {
        let phrases = self.phrases(summary);
        let stats = Self::score_words(&phrases);

        let mut seen: IndexMap<String, f64> = IndexMap::new();
        for phrase in &phrases {
            let score = phrase
                .iter()
                .filter_map(|w| stats.get(w.as_str()))
                .map(|s| s.degree as f64 / s.frequency as f64)
                .sum::<f64>();
            seen.entry(phrase.join(" ")).or_insert(score);
        }
        let mut ranked: Vec<(String, f64)> = seen.into_iter().collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
    }

    fn word_stats(&self, summary: &str) -> IndexMap<String, WordStats> {
        Self::score_words(&self.phrases(summary))
    }

    fn score_words(phrases: &[Vec<String>]) -> IndexMap<String, WordStats> {
        let mut stats: IndexMap<String, WordStats> = IndexMap::new();
        for phrase in phrases {
            for word in phrase {
                let entry = stats.entry(word.clone()).or_default();
                entry.degree += phrase.len();
                entry.frequency += 1;
            }
        }
        stats
    }

    /// Candidate phrases after length filtering (and de-duplication when
    /// repeated phrases are not counted).
    fn phrases(&self, summary: &str) -> Vec<Vec<String>> {
        let mut phrases: Vec<Vec<String>> = Vec::new();
        let mut current: Vec<String> = Vec::new();
        for (token, is_word) in word_punct_tokens(summary) {
            if !is_word || self.stop_words.contains(token) {
                if !current.is_empty() {
                    phrases.push(std::mem::take(&mut current));
                }
                continue;
            }
            if self.config.lowercase {
                current.push(token.to_lowercase());
            } else {
                current.push(token.to_string());
            }
        }
        if !current.is_empty() {
            phrases.push(current);
        }

        let min = self.config.min_phrase_len;
        let max = self.config.max_phrase_len.unwrap_or(usize::MAX);
        phrases.retain(|p| (min..=max).contains(&p.len()));

        if !self.config.include_repeated_phrases {
            let mut unique: IndexMap<Vec<String>, ()> = IndexMap::new();
            for p in phrases {
                unique.insert(p, ());
            }
            phrases = unique.into_keys().collect();
        }
        phrases
    }
}

/// Split into runs of word characters and runs of other non-space characters,
/// `(slice, is_word)`.
fn word_punct_tokens(text: &str) -> Vec<(&str, bool)> {
    #[inline]
    fn is_word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    let mut tokens = Vec::new();
    let mut start: Option<(usize, bool)> = None;
    for (idx, c) in text.char_indices() {
        let class = if c.is_whitespace() { None } else { Some(is_word_char(c)) };
        match (start, class) {
            (Some((_, cur)), Some(word)) if cur == word => {}
            (Some((s, cur)), _) => {
                tokens.push((&text[s..idx], cur));
                start = class.map(|w| (idx, w));
            }
            (None, Some(word)) => start = Some((idx, word)),
            (None, None) => {}
        }
    }
    if let Some((s, cur)) = start {
        tokens.push((&text[s..], cur));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::default()
    }

    fn words(set: &KeywordSet) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn tokenizer_splits_words_and_punctuation() {
        let t = word_punct_tokens("Hello, world... it's 2D!");
        assert_eq!(
            t,
            vec![
                ("Hello", true),
                (",", false),
                ("world", true),
                ("...", false),
                ("it", true),
                ("'", false),
                ("s", true),
                ("2D", true),
                ("!", false),
            ]
        );
    }

    #[test]
    fn empty_and_punctuation_only_give_empty_set() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("  ?! ... ").is_empty());
        assert!(extractor().extract("the and of").is_empty());
    }

    #[test]
    fn stop_words_split_phrases_and_casing_is_kept() {
        let set = extractor().extract("Pilot a Space Ship through the asteroid field.");
        assert_eq!(words(&set), vec!["Pilot", "Space", "Ship", "asteroid", "field"]);
    }

    #[test]
    fn lowercase_merges_case_variants() {
        let ex = KeywordExtractor::new(KeywordConfig { lowercase: true, ..Default::default() });
        let set = ex.extract("Space battle. space station");
        assert_eq!(words(&set), vec!["space", "battle", "station"]);
    }

    #[test]
    fn degrees_sum_phrase_lengths() {
        // phrases: [red, dragon], [dragon], [red, dragon, slayer]
        let d = extractor().word_degrees("red dragon and dragon, red dragon slayer");
        assert_eq!(
            d,
            vec![("red".to_string(), 5), ("dragon".to_string(), 6), ("slayer".to_string(), 3)]
        );
    }

    #[test]
    fn repeated_phrases_can_be_counted_once() {
        let ex = KeywordExtractor::new(KeywordConfig {
            include_repeated_phrases: false,
            ..Default::default()
        });
        let d = ex.word_degrees("space battle; space battle");
        assert_eq!(d, vec![("space".to_string(), 2), ("battle".to_string(), 2)]);
    }

    #[test]
    fn phrase_length_bounds() {
        let ex = KeywordExtractor::new(KeywordConfig {
            min_phrase_len: 2,
            max_phrase_len: Some(2),
            ..Default::default()
        });
        let set = ex.extract("open world with crafting, and very long epic story arc");
        assert_eq!(words(&set), vec!["open", "world"]);
    }

    #[test]
    fn ranked_phrases_best_first() {
        let ranked = extractor().ranked_phrases("Drift. Fast racing with tuned cars.");
        let names: Vec<_> = ranked.iter().map(|p| p.0.as_str()).collect();
        assert_eq!(names, vec!["Fast racing", "tuned cars", "Drift"]);
        assert_eq!(ranked[0].1, 4.0);
        assert_eq!(ranked[2].1, 1.0);
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "A sprawling open world RPG with dragons, magic and open quests.";
        assert_eq!(extractor().extract(text), extractor().extract(text));
    }
}
