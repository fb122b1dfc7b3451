//! Plain-text layout of display rows, chords printed above their words in
//! fixed-width columns.

use crate::render::{ChordWordPair, DisplayRow};

/// Lay out rendered rows as monospaced text.
///
/// ```
/// use songsheet::{render_text, ChordWordPair, DisplayRow};
///
/// let rows = vec![
///     DisplayRow::Section("Verse 1".into()),
///     DisplayRow::Pairs(vec![
///         ChordWordPair::new("G", "Amazing"),
///         ChordWordPair::new("", "grace"),
///         ChordWordPair::new("C/E", "how"),
///     ]),
/// ];
///
/// assert_eq!(
///     render_text(&rows),
///     "[Verse 1]\nG             C/E\nAmazing grace how\n"
/// );
/// ```
pub fn render_text(rows: &[DisplayRow]) -> String {
    let mut out = String::new();
    for row in rows {
        match row {
            DisplayRow::Section(label) => push_line(&mut out, &format!("[{}]", label)),
            DisplayRow::Pairs(pairs) => {
                let (chords, words) = align_pairs(pairs);
                if !chords.is_empty() {
                    push_line(&mut out, &chords);
                }
                push_line(&mut out, &words);
            }
            DisplayRow::Chords(line) | DisplayRow::Text(line) => push_line(&mut out, line),
        }
    }
    out
}

/// Build the chord line and word line for one pair row.
///
/// Each column is as wide as the wider of its chord and word, columns are
/// separated by one space, and trailing spaces are trimmed.
fn align_pairs(pairs: &[ChordWordPair]) -> (String, String) {
    let mut chords = String::new();
    let mut words = String::new();

    for (i, pair) in pairs.iter().enumerate() {
        if i > 0 {
            chords.push(' ');
            words.push(' ');
        }
        let width = pair.chord.chars().count().max(pair.word.chars().count());
        chords.push_str(&format!("{:<width$}", pair.chord, width = width));
        words.push_str(&format!("{:<width$}", pair.word, width = width));
    }

    (chords.trim_end().to_string(), words.trim_end().to_string())
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
