//! # Song Catalog
//!
//! The song list (`songs.json`): an array of entries pointing at individual
//! song files, with language filtering, free-text search and batched paging
//! for an infinite-scroll list.
//!
//! ## Example
//! ```rust
//! use songsheet::catalog::{Catalog, LanguageFilter, Pager, PageStatus, SearchFilter};
//!
//! let catalog = Catalog::from_json(r#"[
//!     { "title": "Amazing Grace", "artist": "John Newton", "filename": "songs/amazing.json" },
//!     { "title": "Cuan Grande Es El", "language": "es", "filename": "songs/cuan.json" }
//! ]"#)?;
//!
//! let filter = SearchFilter::new(LanguageFilter::Only("en".into()), "grace");
//! let results = catalog.filter(&filter);
//! assert_eq!(results.len(), 1);
//!
//! let mut pager = Pager::new(&results, 20);
//! assert_eq!(pager.next_batch().len(), 1);
//! assert_eq!(pager.status(), PageStatus::End);
//! # Ok::<(), songsheet::SongError>(())
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SongError;

/// Songs per batch when nothing else is configured.
pub const DEFAULT_BATCH_SIZE: usize = 20;

fn default_language() -> String {
    "en".to_string()
}

/// One song in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Language code; entries without one are English.
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Path of the song document, relative to the catalog.
    #[serde(default)]
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Parse a catalog. The document must be a JSON array.
    pub fn from_json(source: &str) -> Result<Self, SongError> {
        let value: serde_json::Value = serde_json::from_str(source).map_err(SongError::from_json)?;
        if !value.is_array() {
            return Err(SongError::CatalogError(
                "expected a JSON array of songs".to_string(),
            ));
        }
        let entries = serde_json::from_value(value)
            .map_err(|e| SongError::CatalogError(e.to_string()))?;
        Ok(Catalog { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SongError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SongError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Entries matching `filter`, in catalog order.
    pub fn filter(&self, filter: &SearchFilter) -> Vec<&CatalogEntry> {
        let results: Vec<&CatalogEntry> = self
            .entries
            .iter()
            .filter(|entry| filter.matches(entry))
            .collect();
        debug!(
            language = %filter.language,
            query = %filter.query,
            matched = results.len(),
            total = self.entries.len(),
            "filtered catalog"
        );
        results
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which languages to list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageFilter {
    #[default]
    All,
    Only(String),
}

impl LanguageFilter {
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            LanguageFilter::All => true,
            LanguageFilter::Only(code) => entry.language == *code,
        }
    }
}

impl From<&str> for LanguageFilter {
    /// `"all"` (or nothing) lists every language; anything else is a code.
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | "all" => LanguageFilter::All,
            code => LanguageFilter::Only(code.to_string()),
        }
    }
}

impl From<String> for LanguageFilter {
    fn from(value: String) -> Self {
        LanguageFilter::from(value.as_str())
    }
}

impl From<LanguageFilter> for String {
    fn from(filter: LanguageFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for LanguageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageFilter::All => f.write_str("all"),
            LanguageFilter::Only(code) => f.write_str(code),
        }
    }
}

/// Language filter plus a free-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub language: LanguageFilter,
    pub query: String,
}

impl SearchFilter {
    pub fn new(language: LanguageFilter, query: impl Into<String>) -> Self {
        SearchFilter {
            language,
            query: query.into(),
        }
    }

    /// Language must match, and the trimmed query must appear (ignoring case)
    /// in the title, the artist, or the tags joined by spaces.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if !self.language.matches(entry) {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        entry.title.to_lowercase().contains(&query)
            || entry
                .artist
                .as_deref()
                .is_some_and(|artist| artist.to_lowercase().contains(&query))
            || entry.tags.join(" ").to_lowercase().contains(&query)
    }
}

/// Where a pager stands after its last batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// More batches remain.
    More,
    /// The last batch has been handed out.
    End,
    /// A batch was requested after the end.
    Exhausted,
}

impl PageStatus {
    pub fn message(self) -> &'static str {
        match self {
            PageStatus::More => "Scroll to load more",
            PageStatus::End => "End of list",
            PageStatus::Exhausted => "No more songs",
        }
    }
}

/// Hands out fixed-size batches of a result list.
#[derive(Debug, Clone)]
pub struct Pager<'a, T> {
    items: &'a [T],
    offset: usize,
    batch_size: usize,
    exhausted: bool,
}

impl<'a, T> Pager<'a, T> {
    /// A `batch_size` of zero is treated as one.
    pub fn new(items: &'a [T], batch_size: usize) -> Self {
        Pager {
            items,
            offset: 0,
            batch_size: batch_size.max(1),
            exhausted: false,
        }
    }

    /// Start somewhere other than the first item.
    pub fn starting_at(mut self, offset: usize) -> Self {
        self.offset = offset.min(self.items.len());
        self
    }

    pub fn next_batch(&mut self) -> &'a [T] {
        if self.offset >= self.items.len() {
            self.exhausted = true;
            return &[];
        }
        let end = (self.offset + self.batch_size).min(self.items.len());
        let batch = &self.items[self.offset..end];
        self.offset = end;
        batch
    }

    pub fn status(&self) -> PageStatus {
        if self.exhausted {
            PageStatus::Exhausted
        } else if self.offset >= self.items.len() {
            PageStatus::End
        } else {
            PageStatus::More
        }
    }

    /// Number of items handed out so far (including any skipped start).
    pub fn offset(&self) -> usize {
        self.offset
    }
}
