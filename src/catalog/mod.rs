//! Catalog store: the immutable game table every other stage reads from.

pub mod view;

use std::fs::File;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

pub use view::{CatalogFilter, CatalogView, Distribution};

/// One catalog row.
///
/// Column names follow the dataset header, `genre(s)` included.
/// Text columns missing from the file (or empty cells) become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRecord {
    pub name: String,
    pub platform: String,
    /// kept in its textual form, the feature bag uses it as a token
    pub release_year: String,
    /// comma separated genre tokens
    #[serde(rename = "genre(s)")]
    pub genres: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub score: Option<f64>,
    pub opinion: String,
    pub developer: String,
    pub publisher: String,
    pub summary: String,
    pub multiplayer: String,
    pub rating: String,
    pub link: String,
}

impl GameRecord {
    /// Release year as a number, `2004` and `2004.0` both parse.
    pub fn year(&self) -> Option<i32> {
        let raw = self.release_year.trim();
        raw.parse::<i32>()
            .ok()
            .or_else(|| raw.parse::<f64>().ok().filter(|y| y.fract() == 0.0).map(|y| y as i32))
    }

    /// Genre tokens split on `,` and trimmed, empty pieces skipped.
    pub fn genre_list(&self) -> impl Iterator<Item = &str> + '_ {
        self.genres.split(',').map(str::trim).filter(|g| !g.is_empty())
    }
}

/// Ordered, immutable sequence of [`GameRecord`].
/// Row order is the identity every derived structure is aligned to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    records: Vec<GameRecord>,
}

impl Catalog {
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        Self { records }
    }

    /// Read a headed CSV stream.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let mut records = Vec::new();
        for row in rdr.deserialize::<GameRecord>() {
            records.push(row?);
        }
        debug!(rows = records.len(), "catalog rows decoded");
        Ok(Self { records })
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let catalog = Self::from_reader(File::open(path)?)?;
        info!(path = %path.display(), rows = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&GameRecord> {
        self.records.get(index)
    }

    #[inline]
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.records.iter()
    }

    /// Unfiltered view over every row
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView::all(self)
    }

    pub fn filter(&self, filter: &CatalogFilter) -> CatalogView<'_> {
        CatalogView::filtered(self, filter)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a GameRecord;
    type IntoIter = std::slice::Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
name,platform,release_year,genre(s),score,opinion,developer,publisher,summary,multiplayer,rating,link
Halo,Xbox,2001,\"Action, Shooter\",97,must-play,Bungie,Microsoft,Fight the Covenant on a ring world.,Yes,M,http://x/halo
Tetris,Game Boy,1989,Puzzle,n/a,,Nintendo,Nintendo,,No,E,
";

    #[test]
    fn reads_dataset_layout() {
        let catalog = Catalog::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        let halo = catalog.get(0).unwrap();
        assert_eq!(halo.genres, "Action, Shooter");
        assert_eq!(halo.score, Some(97.0));
        assert_eq!(halo.year(), Some(2001));
        assert_eq!(halo.genre_list().collect::<Vec<_>>(), vec!["Action", "Shooter"]);

        let tetris = catalog.get(1).unwrap();
        assert_eq!(tetris.score, None);
        assert_eq!(tetris.summary, "");
        assert_eq!(tetris.platform, "Game Boy");
    }

    #[test]
    fn missing_columns_default() {
        let catalog = Catalog::from_reader("name,platform\nDoom,PC\n".as_bytes()).unwrap();
        let doom = catalog.get(0).unwrap();
        assert_eq!(doom.name, "Doom");
        assert_eq!(doom.summary, "");
        assert_eq!(doom.year(), None);
    }

    #[test]
    fn year_accepts_float_form() {
        let r = GameRecord { release_year: "2004.0".into(), ..Default::default() };
        assert_eq!(r.year(), Some(2004));
    }
}
