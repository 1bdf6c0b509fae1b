// SPDX-License-Identifier: MPL-2.0
//! Album list shown on the home and admin screens: sorting, search, and the
//! per-album extras (cover thumbnail, most common camera settings) that
//! arrive after the list itself.

use crate::api::{Album, AlbumId, ModeMetadata};
use crate::media::preview::{Preview, PreviewOutcome};
use chrono::NaiveDate;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest first; undated albums last.
    #[default]
    Date,
    Name,
}

#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub album: Album,
    pub mode: Option<ModeMetadata>,
    /// File name of the album's first image, once known.
    pub cover_file: Option<String>,
    cover: Option<Preview>,
}

impl CatalogEntry {
    fn new(album: Album) -> Self {
        Self {
            album,
            mode: None,
            cover_file: None,
            cover: None,
        }
    }

    pub fn cover(&self) -> Option<&Preview> {
        self.cover.as_ref()
    }

    fn date(&self) -> Option<NaiveDate> {
        self.album
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }
}

#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    sort: SortKey,
    query: String,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list with a fresh server response.
    pub fn set_albums(&mut self, albums: Vec<Album>) {
        self.entries = albums.into_iter().map(CatalogEntry::new).collect();
        self.resort();
    }

    /// Attaches the extras fetched for one album. Unknown ids are ignored.
    pub fn set_details(
        &mut self,
        album_id: &str,
        mode: Option<ModeMetadata>,
        cover_file: Option<String>,
    ) -> bool {
        match self.entry_mut(album_id) {
            Some(entry) => {
                entry.mode = mode;
                entry.cover_file = cover_file;
                true
            }
            None => false,
        }
    }

    pub fn set_cover(&mut self, album_id: &str, outcome: PreviewOutcome) -> bool {
        match self.entry_mut(album_id) {
            Some(entry) => {
                entry.cover = outcome.into_preview();
                true
            }
            None => false,
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
        self.resort();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub fn get(&self, album_id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.album.id == album_id)
    }

    pub fn ids(&self) -> Vec<AlbumId> {
        self.entries.iter().map(|entry| entry.album.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching the search query, in the current sort order.
    pub fn visible(&self) -> Vec<&CatalogEntry> {
        let needle = self.query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| needle.is_empty() || entry.album.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn entry_mut(&mut self, album_id: &str) -> Option<&mut CatalogEntry> {
        self.entries.iter_mut().find(|entry| entry.album.id == album_id)
    }

    fn resort(&mut self) {
        match self.sort {
            SortKey::Date => self.entries.sort_by(|a, b| match (a.date(), b.date()) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
            SortKey::Name => self
                .entries
                .sort_by(|a, b| a.album.name.to_lowercase().cmp(&b.album.name.to_lowercase())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album(id: &str, name: &str, date: Option<&str>) -> Album {
        Album {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            date: date.map(Into::into),
            number_of_images: 0,
        }
    }

    fn names(catalog: &Catalog) -> Vec<String> {
        catalog.visible().iter().map(|e| e.album.name.clone()).collect()
    }

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.set_albums(vec![
            album("1", "beach", Some("2023-07-14")),
            album("2", "Alps", Some("2024-02-01")),
            album("3", "Undated", None),
            album("4", "city", Some("2022-11-30")),
        ]);
        catalog
    }

    #[test]
    fn default_sort_is_newest_first() {
        assert_eq!(names(&sample()), ["Alps", "beach", "city", "Undated"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut catalog = sample();
        catalog.set_sort(SortKey::Name);
        assert_eq!(names(&catalog), ["Alps", "beach", "city", "Undated"]);
        catalog.set_sort(SortKey::Date);
        assert_eq!(catalog.sort_key(), SortKey::Date);
    }

    #[test]
    fn search_matches_name_substring_case_insensitively() {
        let mut catalog = sample();
        catalog.set_query("EA".into());
        assert_eq!(names(&catalog), ["beach"]);
        catalog.set_query("  ".into());
        assert_eq!(catalog.visible().len(), 4);
    }

    #[test]
    fn details_attach_by_id() {
        let mut catalog = sample();
        let mode = ModeMetadata {
            camera_model: Some("X100V".into()),
            ..ModeMetadata::default()
        };
        assert!(catalog.set_details("2", Some(mode.clone()), Some("first.jpg".into())));
        assert!(!catalog.set_details("99", None, None));

        let entry = catalog.get("2").expect("entry");
        assert_eq!(entry.mode.as_ref(), Some(&mode));
        assert_eq!(entry.cover_file.as_deref(), Some("first.jpg"));
    }

    #[test]
    fn fallback_cover_leaves_no_preview() {
        let mut catalog = sample();
        assert!(catalog.set_cover("1", PreviewOutcome::Fallback("url".into())));
        assert!(catalog.get("1").expect("entry").cover().is_none());
    }
}
