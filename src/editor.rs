//! # Lyric Editor
//!
//! Edits lyric words on a working copy of a song and previews the result.
//! The song handed to [`SongEditor::new`] is cloned and never touched, so a
//! viewer can keep rendering the loaded song while edits happen elsewhere.
//! Edits leave the process only through [`SongEditor::export_json`].

use tracing::debug;

use crate::error::SongError;
use crate::render::{render_lines, DisplayRow};
use crate::song::{LineContent, SectionRef, Song};

#[derive(Debug, Clone)]
pub struct SongEditor {
    original: Song,
    working: Song,
}

impl SongEditor {
    pub fn new(song: &Song) -> Self {
        SongEditor {
            original: song.clone(),
            working: song.clone(),
        }
    }

    /// The working copy, including edits.
    pub fn song(&self) -> &Song {
        &self.working
    }

    /// Lyric words of a line as the editor presents them.
    ///
    /// Returns `None` for a line index past the end; lines without lyrics
    /// give an empty list.
    pub fn words(&self, line: usize) -> Option<Vec<String>> {
        let line = self.working.lines.get(line)?;
        let words = match &line.content {
            LineContent::Paired { lyrics, .. } => lyrics.clone(),
            LineContent::ChordLine {
                lyrics: Some(lyrics),
                ..
            }
            | LineContent::LyricsOnly(lyrics) => lyrics.words(),
            LineContent::ChordLine { lyrics: None, .. } | LineContent::Empty => Vec::new(),
        };
        Some(words)
    }

    /// Replace word `word` of line `line`.
    ///
    /// ```
    /// use songsheet::{Line, Song, SongEditor};
    ///
    /// let mut song = Song::new("Amazing Grace");
    /// song.lines.push(Line::paired(["G", "C"], ["Amazing", "grace"]));
    ///
    /// let mut editor = SongEditor::new(&song);
    /// editor.set_word(0, 1, "love").unwrap();
    ///
    /// assert_eq!(editor.words(0).unwrap(), vec!["Amazing", "love"]);
    /// assert!(editor.set_word(0, 5, "x").is_err());
    /// ```
    pub fn set_word(
        &mut self,
        line: usize,
        word: usize,
        text: impl Into<String>,
    ) -> Result<(), SongError> {
        let text = text.into();
        let replaced = match self.working.lines.get_mut(line).map(|l| &mut l.content) {
            Some(LineContent::Paired { lyrics, .. }) => match lyrics.get_mut(word) {
                Some(slot) => {
                    *slot = text;
                    true
                }
                None => false,
            },
            Some(LineContent::ChordLine {
                lyrics: Some(lyrics),
                ..
            })
            | Some(LineContent::LyricsOnly(lyrics)) => lyrics.set_word(word, text),
            _ => false,
        };

        if !replaced {
            return Err(SongError::EditOutOfRange { line, word });
        }
        debug!(line, word, "edited lyric word");
        Ok(())
    }

    pub fn is_modified(&self) -> bool {
        self.working != self.original
    }

    /// Drop every edit.
    pub fn revert(&mut self) {
        self.working = self.original.clone();
    }

    pub fn sections(&self) -> Vec<SectionRef> {
        self.working.sections()
    }

    /// Render the working copy.
    pub fn preview(&self, transpose: i32) -> Vec<DisplayRow> {
        render_lines(&self.working, transpose)
    }

    /// The working copy as song JSON.
    pub fn export_json(&self) -> Result<String, SongError> {
        self.working.to_json_pretty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ChordWordPair;

    fn sample_song() -> Song {
        Song::from_json(
            r#"{
                "title": "Edit Me",
                "lines": [
                    { "section": "Verse", "chords": ["G", "", "D"], "lyrics": ["one", "two", "three"] },
                    { "chordLine": "C G", "lyrics": "four five" },
                    { "lyrics": ["six"] },
                    { "section": "End" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_edit_paired_word() {
        let song = sample_song();
        let mut editor = SongEditor::new(&song);
        editor.set_word(0, 2, "3").unwrap();

        assert!(editor.is_modified());
        assert_eq!(song, sample_song());

        let rows = editor.preview(2);
        assert_eq!(
            rows[1],
            DisplayRow::Pairs(vec![
                ChordWordPair::new("A", "one"),
                ChordWordPair::new("", "two"),
                ChordWordPair::new("E", "3"),
            ])
        );
    }

    #[test]
    fn test_edit_string_lyrics_keeps_string() {
        let mut editor = SongEditor::new(&sample_song());
        editor.set_word(1, 0, "4").unwrap();
        assert_eq!(editor.words(1).unwrap(), vec!["4", "five"]);

        let exported: serde_json::Value =
            serde_json::from_str(&editor.export_json().unwrap()).unwrap();
        assert_eq!(exported["lines"][1]["lyrics"], serde_json::json!("4 five"));
        assert_eq!(exported["lines"][1]["chordLine"], serde_json::json!("C G"));
    }

    #[test]
    fn test_out_of_range_edits() {
        let mut editor = SongEditor::new(&sample_song());
        assert!(matches!(
            editor.set_word(9, 0, "x"),
            Err(SongError::EditOutOfRange { line: 9, word: 0 })
        ));
        assert!(matches!(
            editor.set_word(2, 1, "x"),
            Err(SongError::EditOutOfRange { line: 2, word: 1 })
        ));
        // Section-only line has no words
        assert!(editor.set_word(3, 0, "x").is_err());
        assert_eq!(editor.words(3), Some(vec![]));
        assert_eq!(editor.words(4), None);
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_revert_and_export_round_trip() {
        let mut editor = SongEditor::new(&sample_song());
        editor.set_word(2, 0, "seven").unwrap();

        let exported = Song::from_json(&editor.export_json().unwrap()).unwrap();
        assert_eq!(&exported, editor.song());

        editor.revert();
        assert!(!editor.is_modified());
        assert_eq!(editor.sections().len(), 2);
    }
}
