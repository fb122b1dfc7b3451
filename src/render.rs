//! # Line Rendering
//!
//! Turns a [`Song`] and a transpose offset into display rows for a
//! presentation layer.
//!
//! ## Rules
//! - A section label is emitted before the content of its line.
//! - `Paired` lines give one [`ChordWordPair`] per position, for
//!   `max(chords, lyrics)` positions. A missing or empty chord renders as an
//!   empty string so every later chord stays above its own word.
//! - `ChordLine` lines give a transposed [`DisplayRow::Chords`] row followed
//!   by the lyric text as a [`DisplayRow::Text`] row.
//! - `LyricsOnly` lines give a single text row.
//!
//! Rendering never mutates the song and keeps no state between calls. Every
//! call transposes from the chords stored in the song, so changing the offset
//! and rendering again never compounds.
//!
//! ## Example
//! ```rust
//! use songsheet::{render_lines, ChordWordPair, DisplayRow, Line, Song};
//!
//! let mut song = Song::new("Amazing Grace");
//! song.lines.push(Line::paired(["C", "", "G"], ["Amazing", "grace", "how"]));
//!
//! let rows = render_lines(&song, 2);
//! assert_eq!(
//!     rows,
//!     vec![DisplayRow::Pairs(vec![
//!         ChordWordPair::new("D", "Amazing"),
//!         ChordWordPair::new("", "grace"),
//!         ChordWordPair::new("A", "how"),
//!     ])]
//! );
//! ```

use serde::Serialize;
use tracing::debug;

use crate::chord::{transpose_chord, transpose_chord_line};
use crate::song::{LineContent, Song};

/// A chord (possibly empty) sitting above a word (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordWordPair {
    pub chord: String,
    pub word: String,
}

impl ChordWordPair {
    pub fn new(chord: impl Into<String>, word: impl Into<String>) -> Self {
        ChordWordPair {
            chord: chord.into(),
            word: word.into(),
        }
    }
}

/// One row of rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayRow {
    /// Section label such as "Verse 1"
    Section(String),
    /// Word-aligned chords
    Pairs(Vec<ChordWordPair>),
    /// Whole-line chord annotation, not aligned to words
    Chords(String),
    /// Plain lyric text
    Text(String),
}

/// Render every line of `song` with chords shifted by `transpose` semitones.
pub fn render_lines(song: &Song, transpose: i32) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(song.lines.len() * 2);

    for line in &song.lines {
        if let Some(label) = &line.section {
            rows.push(DisplayRow::Section(label.clone()));
        }

        match &line.content {
            LineContent::Paired { chords, lyrics } => {
                rows.push(DisplayRow::Pairs(pair_tokens(chords, lyrics, transpose)));
            }
            LineContent::ChordLine { chord_line, lyrics } => {
                rows.push(DisplayRow::Chords(transpose_chord_line(chord_line, transpose)));
                if let Some(lyrics) = lyrics {
                    rows.push(DisplayRow::Text(lyrics.text()));
                }
            }
            LineContent::LyricsOnly(lyrics) => rows.push(DisplayRow::Text(lyrics.text())),
            LineContent::Empty => {}
        }
    }

    debug!(
        title = %song.title,
        transpose,
        rows = rows.len(),
        "rendered song"
    );
    rows
}

/// Pair chords with words position by position.
///
/// The result has `max(chords.len(), lyrics.len())` entries; the shorter side
/// is padded with empty strings.
pub fn pair_tokens(chords: &[String], lyrics: &[String], transpose: i32) -> Vec<ChordWordPair> {
    let len = chords.len().max(lyrics.len());
    (0..len)
        .map(|i| {
            let chord = match chords.get(i) {
                Some(chord) if !chord.is_empty() => transpose_chord(chord, transpose),
                _ => String::new(),
            };
            let word = lyrics.get(i).cloned().unwrap_or_default();
            ChordWordPair { chord, word }
        })
        .collect()
}

/// View state owned by the presentation layer: the current transpose offset.
///
/// The offset is unbounded in musical terms (it is reduced modulo 12 when a
/// chord is looked up) and saturates at the `i32` limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub transpose: i32,
}

impl ViewState {
    pub fn new(transpose: i32) -> Self {
        ViewState { transpose }
    }

    pub fn increment(&mut self) {
        self.transpose = self.transpose.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.transpose = self.transpose.saturating_sub(1);
    }

    /// Back to the written key, as when a new song is loaded.
    pub fn reset(&mut self) {
        self.transpose = 0;
    }

    pub fn render(&self, song: &Song) -> Vec<DisplayRow> {
        render_lines(song, self.transpose)
    }

    pub fn heading(&self, song: &Song) -> String {
        song.heading(self.transpose)
    }
}
