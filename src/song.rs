//! # Song Documents
//!
//! Types for a loaded song and its lines, read from the JSON song format:
//!
//! ```text
//! Song: { title, key?, artist?, language?, tags?, lines: Line[] }
//! Line: { section?, chords?: string[], lyrics?: string[] | string, chordLine? }
//! ```
//!
//! In the file a line is a bag of optional fields. Here it is resolved once,
//! at load time, into [`LineContent`], so the renderer matches on a closed set
//! of shapes instead of probing fields:
//!
//! | Fields present               | Shape                                          |
//! |------------------------------|------------------------------------------------|
//! | `chords` + `lyrics` array    | `Paired`                                       |
//! | `chords` only                | `Paired` with no words                         |
//! | `chords` + `lyrics` string   | `ChordLine` (chords joined by spaces)          |
//! | `chords: []` + no array      | as if `chords` were absent                     |
//! | `chordLine` (+ `lyrics`)     | `ChordLine`                                    |
//! | `lyrics` only                | `LyricsOnly`                                   |
//! | none of the above            | `Empty`                                        |
//!
//! A `section` label is kept alongside any of these shapes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chord::{transpose_key, ChordSymbol};
use crate::error::SongError;

/// Lyric text of a line: either word tokens or one plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lyrics {
    Words(Vec<String>),
    Text(String),
}

impl Lyrics {
    /// The whole line as display text (words joined by single spaces).
    pub fn text(&self) -> String {
        match self {
            Lyrics::Words(words) => words.join(" "),
            Lyrics::Text(text) => text.clone(),
        }
    }

    /// Word tokens. A plain string is split on whitespace.
    pub fn words(&self) -> Vec<String> {
        match self {
            Lyrics::Words(words) => words.clone(),
            Lyrics::Text(text) => split_words(text),
        }
    }

    /// Replace one word, keeping the original representation.
    ///
    /// Returns `false` if there is no word at `index`.
    pub fn set_word(&mut self, index: usize, word: String) -> bool {
        match self {
            Lyrics::Words(words) => match words.get_mut(index) {
                Some(slot) => {
                    *slot = word;
                    true
                }
                None => false,
            },
            Lyrics::Text(text) => {
                let mut words = split_words(text);
                match words.get_mut(index) {
                    Some(slot) => {
                        *slot = word;
                        *text = words.join(" ");
                        true
                    }
                    None => false,
                }
            }
        }
    }
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// What a line carries besides its optional section label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineContent {
    /// Chord `i` sits above lyric word `i`. Lengths may differ.
    Paired {
        chords: Vec<String>,
        lyrics: Vec<String>,
    },
    /// One chord string shown above the lyric text, without alignment.
    ChordLine {
        chord_line: String,
        lyrics: Option<Lyrics>,
    },
    LyricsOnly(Lyrics),
    /// Nothing but (possibly) a section label.
    Empty,
}

/// One line of a song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLine", into = "RawLine")]
pub struct Line {
    pub section: Option<String>,
    pub content: LineContent,
}

impl Line {
    pub fn section(label: impl Into<String>) -> Self {
        Line {
            section: Some(label.into()),
            content: LineContent::Empty,
        }
    }

    pub fn paired<C, L>(chords: C, lyrics: L) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Line {
            section: None,
            content: LineContent::Paired {
                chords: chords.into_iter().map(Into::into).collect(),
                lyrics: lyrics.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn with_section(mut self, label: impl Into<String>) -> Self {
        self.section = Some(label.into());
        self
    }

    /// Chord tokens as written in the document, in order.
    pub fn chord_tokens(&self) -> Vec<&str> {
        match &self.content {
            LineContent::Paired { chords, .. } => chords
                .iter()
                .map(String::as_str)
                .filter(|c| !c.is_empty())
                .collect(),
            LineContent::ChordLine { chord_line, .. } => chord_line.split_whitespace().collect(),
            LineContent::LyricsOnly(_) | LineContent::Empty => Vec::new(),
        }
    }
}

/// A line exactly as it appears in the JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    // null entries are unchorded beats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chords: Option<Vec<Option<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lyrics: Option<Lyrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chord_line: Option<String>,
}

impl From<RawLine> for Line {
    fn from(raw: RawLine) -> Self {
        let chords: Option<Vec<String>> = raw
            .chords
            .map(|chords| chords.into_iter().map(Option::unwrap_or_default).collect());

        let content = match (chords, raw.lyrics, raw.chord_line) {
            (Some(chords), Some(Lyrics::Words(lyrics)), _) => LineContent::Paired { chords, lyrics },
            (Some(chords), None, None) if !chords.is_empty() => LineContent::Paired {
                chords,
                lyrics: Vec::new(),
            },
            (_, lyrics, Some(chord_line)) => LineContent::ChordLine { chord_line, lyrics },
            (Some(chords), lyrics, None) if !chords.is_empty() => LineContent::ChordLine {
                chord_line: chords.join(" "),
                lyrics,
            },
            // An empty `chords` array carries no chord row
            (_, Some(lyrics), None) => LineContent::LyricsOnly(lyrics),
            (_, None, None) => LineContent::Empty,
        };

        Line {
            section: raw.section,
            content,
        }
    }
}

impl From<Line> for RawLine {
    fn from(line: Line) -> Self {
        let mut raw = RawLine {
            section: line.section,
            ..RawLine::default()
        };
        match line.content {
            LineContent::Paired { chords, lyrics } => {
                raw.chords = Some(chords.into_iter().map(Some).collect());
                raw.lyrics = Some(Lyrics::Words(lyrics));
            }
            LineContent::ChordLine { chord_line, lyrics } => {
                raw.chord_line = Some(chord_line);
                raw.lyrics = lyrics;
            }
            LineContent::LyricsOnly(lyrics) => raw.lyrics = Some(lyrics),
            LineContent::Empty => {}
        }
        raw
    }
}

/// A song document. Read-only for a viewing session; see
/// [`crate::editor::SongEditor`] for edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

/// Position of a section label within a song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRef {
    pub line_index: usize,
    pub label: String,
}

impl Song {
    pub fn new(title: impl Into<String>) -> Self {
        Song {
            title: title.into(),
            key: None,
            artist: None,
            language: None,
            tags: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Parse a song from JSON text.
    ///
    /// ```
    /// use songsheet::Song;
    ///
    /// let song = Song::from_json(r#"{
    ///     "title": "Amazing Grace",
    ///     "key": "G",
    ///     "lines": [
    ///         { "section": "Verse 1" },
    ///         { "chords": ["G", "", "C"], "lyrics": ["Amazing", "grace", "how"] }
    ///     ]
    /// }"#).unwrap();
    ///
    /// assert_eq!(song.lines.len(), 2);
    /// assert_eq!(song.sections()[0].label, "Verse 1");
    /// ```
    pub fn from_json(source: &str) -> Result<Self, SongError> {
        serde_json::from_str(source).map_err(SongError::from_json)
    }

    /// Read and parse a song file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SongError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SongError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Serialize back to the JSON song format.
    ///
    /// Lines are written in their resolved shape, so a `chords` array paired
    /// with a lyric string comes back as a `chordLine`.
    pub fn to_json_pretty(&self) -> Result<String, SongError> {
        serde_json::to_string_pretty(self).map_err(SongError::from_json)
    }

    /// Every section label with the index of the line carrying it.
    pub fn sections(&self) -> Vec<SectionRef> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(line_index, line)| {
                line.section.as_ref().map(|label| SectionRef {
                    line_index,
                    label: label.clone(),
                })
            })
            .collect()
    }

    /// Key shifted by `transpose` semitones, if the song declares one.
    pub fn display_key(&self, transpose: i32) -> Option<String> {
        self.key.as_deref().map(|key| transpose_key(key, transpose))
    }

    /// Viewer heading: `Title [Key]`, or just the title without a key.
    pub fn heading(&self, transpose: i32) -> String {
        match self.display_key(transpose) {
            Some(key) if !key.is_empty() => format!("{} [{}]", self.title, key),
            _ => self.title.clone(),
        }
    }

    /// Chord tokens that transposition would leave untouched, with their line index.
    pub fn unrecognized_chords(&self) -> Vec<(usize, String)> {
        self.lines
            .iter()
            .enumerate()
            .flat_map(|(index, line)| {
                line.chord_tokens()
                    .into_iter()
                    .filter(|token| !is_transposable(token))
                    .map(move |token| (index, token.to_string()))
            })
            .collect()
    }
}

/// Whether `transpose_chord` would change `token`.
///
/// Follows the same first-`/` split, so empty halves (`G/`, `C//G`) are fine.
fn is_transposable(token: &str) -> bool {
    if token.is_empty() {
        return true;
    }
    match token.split_once('/') {
        Some((upper, lower)) => is_transposable(upper) && is_transposable(lower),
        None => ChordSymbol::parse(token)
            .and_then(|chord| chord.pitch_class())
            .is_some(),
    }
}
