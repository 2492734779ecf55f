//! Filtered, read-only views of the catalog and the counts behind the
//! distribution charts.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Catalog, GameRecord};

/// Row filter.
///
/// Each list is a multi-select: an empty list places no constraint, a
/// non-empty list keeps rows whose column equals one of its values.
/// `genres` matches the whole `genre(s)` cell, not individual tokens.
/// `search` keeps rows whose name contains it, ignoring case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFilter {
    pub platforms: Vec<String>,
    pub years: Vec<String>,
    pub genres: Vec<String>,
    pub search: Option<String>,
}

impl CatalogFilter {
    pub fn matches(&self, record: &GameRecord) -> bool {
        fn selected(list: &[String], value: &str) -> bool {
            list.is_empty() || list.iter().any(|v| v == value)
        }
        selected(&self.platforms, &record.platform)
            && selected(&self.years, &record.release_year)
            && selected(&self.genres, &record.genres)
            && match self.search.as_deref() {
                None | Some("") => true,
                Some(needle) => record.name.to_lowercase().contains(&needle.to_lowercase()),
            }
    }
}

/// Borrowed subset of catalog rows, in catalog order.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    catalog: &'a Catalog,
    indices: Vec<usize>,
}

impl<'a> CatalogView<'a> {
    pub(crate) fn all(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            indices: (0..catalog.len()).collect(),
        }
    }

    pub(crate) fn filtered(catalog: &'a Catalog, filter: &CatalogFilter) -> Self {
        let indices = catalog
            .iter()
            .enumerate()
            .filter(|(_, r)| filter.matches(r))
            .map(|(i, _)| i)
            .collect();
        Self { catalog, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// catalog row indices in the view
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a GameRecord> + '_ {
        let records = self.catalog.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Distinct values of a column in first-seen order, for building selectors.
    pub fn distinct<F>(&self, column: F) -> Vec<&'a str>
    where
        F: Fn(&'a GameRecord) -> &'a str,
    {
        let mut seen: IndexMap<&'a str, ()> = IndexMap::new();
        for r in self.iter() {
            seen.insert(column(r), ());
        }
        seen.into_keys().collect()
    }

    /// Games per genre token; a row with `"Action, Shooter"` counts once for each.
    pub fn genre_distribution(&self) -> Distribution {
        Distribution::count(self.iter().flat_map(|r| r.genre_list()))
    }

    /// Games per platform
    pub fn platform_distribution(&self) -> Distribution {
        Distribution::count(self.iter().map(|r| r.platform.as_str()))
    }

    /// Games per release year, ascending by year. Rows without a year are skipped.
    pub fn year_distribution(&self) -> Distribution {
        let mut counts: IndexMap<i32, usize> = IndexMap::new();
        for year in self.iter().filter_map(|r| r.year()) {
            *counts.entry(year).or_insert(0) += 1;
        }
        counts.sort_keys();
        Distribution {
            entries: counts.into_iter().map(|(y, c)| (y.to_string(), c)).collect(),
        }
    }
}

/// Label → count table, the data a bar chart is drawn from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub entries: Vec<(String, usize)>,
}

impl Distribution {
    /// Count labels, most frequent first; equal counts keep first-seen order.
    fn count<'s, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        // stable
        counts.sort_by(|_, a, _, b| b.cmp(a));
        Self {
            entries: counts.into_iter().map(|(l, c)| (l.to_string(), c)).collect(),
        }
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Horizontal text bars, scaled to 40 columns
impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const WIDTH: usize = 40;
        let max = self.entries.iter().map(|(_, c)| *c).max().unwrap_or(0);
        let label_w = self.entries.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        for (label, count) in &self.entries {
            let bar = if max == 0 { 0 } else { (count * WIDTH).div_ceil(max) };
            writeln!(f, "{:<label_w$} | {} {}", label, "#".repeat(bar), count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, platform: &str, year: &str, genres: &str) -> GameRecord {
        GameRecord {
            name: name.into(),
            platform: platform.into(),
            release_year: year.into(),
            genres: genres.into(),
            ..Default::default()
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            rec("Super Mario 64", "N64", "1996", "Platformer"),
            rec("Halo", "Xbox", "2001", "Action, Shooter"),
            rec("Mario Kart", "N64", "1996", "Racing"),
            rec("Halo 2", "Xbox", "2004", "Action, Shooter"),
            rec("Portal", "PC", "2007", "Puzzle, Action"),
        ])
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let c = catalog();
        assert_eq!(c.filter(&CatalogFilter::default()).len(), 5);
    }

    #[test]
    fn multiselect_and_search() {
        let c = catalog();
        let f = CatalogFilter {
            platforms: vec!["N64".into(), "Xbox".into()],
            search: Some("MARIO".into()),
            ..Default::default()
        };
        let names: Vec<_> = c.filter(&f).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Super Mario 64", "Mario Kart"]);

        let f = CatalogFilter {
            genres: vec!["Action, Shooter".into()],
            years: vec!["2004".into()],
            ..Default::default()
        };
        assert_eq!(c.filter(&f).indices(), &[3]);
    }

    #[test]
    fn genre_distribution_splits_tokens() {
        let d = catalog().view().genre_distribution();
        assert_eq!(d.entries[0], ("Action".to_string(), 3));
        assert_eq!(d.get("Shooter"), Some(2));
        assert_eq!(d.get("Puzzle"), Some(1));
        assert_eq!(d.total(), 8);
    }

    #[test]
    fn year_distribution_is_sorted_by_year() {
        let d = catalog().view().year_distribution();
        let labels: Vec<_> = d.entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["1996", "2001", "2004", "2007"]);
        assert_eq!(d.get("1996"), Some(2));
    }

    #[test]
    fn platform_ties_keep_first_seen_order() {
        let d = catalog().view().platform_distribution();
        let labels: Vec<_> = d.entries.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["N64", "Xbox", "PC"]);
    }

    #[test]
    fn distinct_values() {
        let c = catalog();
        assert_eq!(c.view().distinct(|r| r.platform.as_str()), vec!["N64", "Xbox", "PC"]);
    }

    #[test]
    fn bars_render_one_line_per_entry() {
        let d = catalog().view().platform_distribution();
        let text = d.to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().next().unwrap().ends_with(" 2"));
    }
}
