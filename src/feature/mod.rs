//! Feature bags: one whitespace-separated term string per catalog row.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, GameRecord};
use crate::keyword::{KeywordExtractor, KeywordSet};

/// Keywords followed by the normalized platform, release year, developer,
/// genre and multiplayer values, joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureBag(String);

impl FeatureBag {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn terms(&self) -> std::str::SplitWhitespace<'_> {
        self.0.split_whitespace()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for FeatureBag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-case and drop every whitespace character so a multi-word value
/// becomes a single term: `"Game Boy Advance"` -> `"gameboyadvance"`.
pub fn normalize_token(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Build the bag of one record.
pub fn build(record: &GameRecord, keywords: &KeywordSet) -> FeatureBag {
    let year: String = record.release_year.chars().filter(|c| !c.is_whitespace()).collect();
    let categorical = [
        normalize_token(&record.platform),
        year,
        normalize_token(&record.developer),
        normalize_token(&record.genres),
        normalize_token(&record.multiplayer),
    ];

    let mut bag = String::new();
    let terms = keywords
        .iter()
        .map(String::as_str)
        .chain(categorical.iter().map(String::as_str))
        .filter(|t| !t.is_empty());
    for term in terms {
        if !bag.is_empty() {
            bag.push(' ');
        }
        bag.push_str(term);
    }
    FeatureBag(bag)
}

/// Bags for every row, aligned with catalog order.
/// Rows are independent so extraction runs in parallel; `collect` keeps order.
pub fn build_all(catalog: &Catalog, extractor: &KeywordExtractor) -> Vec<FeatureBag> {
    catalog
        .records()
        .par_iter()
        .map(|record| build(record, &extractor.extract(&record.summary)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> GameRecord {
        GameRecord {
            name: "Metroid Prime".into(),
            platform: "Game Cube".into(),
            release_year: "2002".into(),
            genres: "Action, Adventure".into(),
            developer: "Retro Studios".into(),
            multiplayer: "No Online".into(),
            summary: "Samus explores Tallon IV.".into(),
            ..Default::default()
        }
    }

    #[test]
    fn normalize_removes_whitespace_and_case() {
        assert_eq!(normalize_token("  Game Boy\tAdvance "), "gameboyadvance");
        assert_eq!(normalize_token(""), "");
    }

    #[test]
    fn bag_layout() {
        let kw = KeywordSet::from(vec!["Samus".to_string(), "explores".to_string()]);
        let bag = build(&record(), &kw);
        assert_eq!(
            bag.as_str(),
            "Samus explores gamecube 2002 retrostudios action,adventure noonline"
        );
        assert_eq!(bag.terms().count(), 7);
    }

    #[test]
    fn empty_values_add_no_term() {
        let r = GameRecord { platform: "PC".into(), ..Default::default() };
        assert_eq!(build(&r, &KeywordSet::new()).as_str(), "pc");
        assert!(build(&GameRecord::default(), &KeywordSet::new()).is_empty());
    }

    #[test]
    fn build_all_is_aligned_and_deterministic() {
        let mut second = record();
        second.name = "Other".into();
        second.summary = String::new();
        let catalog = Catalog::from_records(vec![record(), second]);
        let ex = KeywordExtractor::default();
        let a = build_all(&catalog, &ex);
        let b = build_all(&catalog, &ex);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert!(a[0].as_str().starts_with("Samus explores Tallon IV"));
        assert_eq!(a[1].as_str(), "gamecube 2002 retrostudios action,adventure noonline");
    }
}
