pub mod catalog;
pub mod chord;
pub mod config;
pub mod editor;
pub mod error;
pub mod render;
pub mod song;
pub mod text;

pub use catalog::{Catalog, CatalogEntry, LanguageFilter, PageStatus, Pager, SearchFilter};
pub use chord::{transpose_chord, transpose_chord_line, transpose_key, ChordSymbol};
pub use config::{Theme, ViewerConfig};
pub use editor::SongEditor;
pub use error::*;
pub use render::{render_lines, ChordWordPair, DisplayRow, ViewState};
pub use song::{Line, LineContent, Lyrics, SectionRef, Song};
pub use text::render_text;

/// Parse a song document and render it at the given transpose offset.
/// This is the main entry point for the library.
pub fn render_song(source: &str, transpose: i32) -> Result<Vec<DisplayRow>, SongError> {
    let song = Song::from_json(source)?;
    Ok(render_lines(&song, transpose))
}

/// Parse, render and lay out a song as monospaced text with a heading.
pub fn render_song_text(source: &str, transpose: i32) -> Result<String, SongError> {
    let song = Song::from_json(source)?;
    let mut out = song.heading(transpose);
    out.push_str("\n\n");
    out.push_str(&render_text(&render_lines(&song, transpose)));
    Ok(out)
}
