//! Integration tests for songsheet
//!
//! Tests the full pipeline from song/catalog JSON to rendered rows and text.

use std::fs;

use songsheet::{
    render_lines, render_song, render_song_text, transpose_chord, Catalog, ChordWordPair,
    DisplayRow, LanguageFilter, PageStatus, Pager, SearchFilter, Song, SongEditor, SongError,
    ViewState, ViewerConfig,
};

const AMAZING_GRACE: &str = r#"{
    "title": "Amazing Grace",
    "key": "G",
    "artist": "John Newton",
    "lines": [
        { "section": "Verse 1" },
        { "chords": ["G", "", "G7", "C"], "lyrics": ["Amazing", "grace", "how", "sweet"] },
        { "chords": ["G", "Em"], "lyrics": ["the", "sound", "that", "saved"] },
        { "chords": ["D/F#", "G", "Bb", "H"], "lyrics": ["a", "wretch"] },
        { "section": "Chorus", "chordLine": "C  G/B Am", "lyrics": "I once was lost" },
        { "lyrics": ["but", "now", "am", "found"] }
    ]
}"#;

fn pairs(rows: &[DisplayRow]) -> Vec<&Vec<ChordWordPair>> {
    rows.iter()
        .filter_map(|row| match row {
            DisplayRow::Pairs(pairs) => Some(pairs),
            _ => None,
        })
        .collect()
}

#[test]
fn test_render_full_song() {
    let rows = render_song(AMAZING_GRACE, 0).unwrap();
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0], DisplayRow::Section("Verse 1".into()));
    assert_eq!(rows[4], DisplayRow::Section("Chorus".into()));
    assert_eq!(rows[5], DisplayRow::Chords("C G/B Am".into()));
    assert_eq!(rows[6], DisplayRow::Text("I once was lost".into()));
    assert_eq!(rows[7], DisplayRow::Text("but now am found".into()));
}

#[test]
fn test_paired_lines_use_longer_side() {
    let rows = render_song(AMAZING_GRACE, 0).unwrap();
    let lines = pairs(&rows);

    // Chords shorter than lyrics
    assert_eq!(lines[1].len(), 4);
    assert_eq!(lines[1][2], ChordWordPair::new("", "that"));
    assert_eq!(lines[1][3], ChordWordPair::new("", "saved"));

    // Chords longer than lyrics
    assert_eq!(lines[2].len(), 4);
    assert_eq!(lines[2][2], ChordWordPair::new("A#", ""));
    assert_eq!(lines[2][3], ChordWordPair::new("H", ""));
}

#[test]
fn test_transposed_render() {
    let rows = render_song(AMAZING_GRACE, 2).unwrap();
    let lines = pairs(&rows);
    assert_eq!(
        lines[0],
        &vec![
            ChordWordPair::new("A", "Amazing"),
            ChordWordPair::new("", "grace"),
            ChordWordPair::new("A7", "how"),
            ChordWordPair::new("D", "sweet"),
        ]
    );
    assert_eq!(lines[2][0].chord, "E/G#");
    assert_eq!(lines[2][2].chord, "C");
    // Unparseable chord is left alone
    assert_eq!(lines[2][3].chord, "H");
    assert_eq!(rows[5], DisplayRow::Chords("D A/C# Bm".into()));
}

#[test]
fn test_offset_changes_never_compound() {
    let song = Song::from_json(AMAZING_GRACE).unwrap();
    let mut view = ViewState::default();

    view.increment();
    view.increment();
    let first = view.render(&song);
    let second = view.render(&song);
    assert_eq!(first, second);

    let original = render_lines(&song, 0);
    for (orig, shifted) in pairs(&original).iter().zip(pairs(&first)) {
        for (o, s) in orig.iter().zip(shifted.iter()) {
            let expected = if o.chord.is_empty() {
                String::new()
            } else {
                transpose_chord(&o.chord, 2)
            };
            assert_eq!(s.chord, expected);
            assert_eq!(s.word, o.word);
        }
    }

    // Twelve steps up lands back on the canonical spelling of the original
    for _ in 0..10 {
        view.increment();
    }
    assert_eq!(view.transpose, 12);
    assert_eq!(view.render(&song), render_lines(&song, 0));

    view.decrement();
    assert_eq!(view.render(&song), render_lines(&song, -1));
    assert_eq!(view.heading(&song), "Amazing Grace [F#]");
}

#[test]
fn test_text_output() {
    let text = render_song_text(AMAZING_GRACE, -2).unwrap();
    let expected = "\
Amazing Grace [F]

[Verse 1]
F             F7  A#
Amazing grace how sweet
F   Dm
the sound that saved
C/E F      G# H
a   wretch
[Chorus]
A# F/A Gm
I once was lost
but now am found
";
    assert_eq!(text, expected);
}

#[test]
fn test_bad_song_document() {
    let err = render_song("{\n  \"title\": 3\n}", 0).unwrap_err();
    match err {
        SongError::ParseError { line, .. } => assert_eq!(line, 2),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_song_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grace.json");
    fs::write(&path, AMAZING_GRACE).unwrap();

    let song = Song::from_path(&path).unwrap();
    assert_eq!(song.title, "Amazing Grace");
    assert_eq!(song.sections().len(), 2);
    assert_eq!(
        song.unrecognized_chords(),
        vec![(3, "H".to_string())]
    );

    let missing = Song::from_path(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, SongError::Io { .. }));
}

#[test]
fn test_catalog_browse() {
    let catalog = Catalog::from_json(
        r#"[
            { "title": "Amazing Grace", "artist": "John Newton", "language": "en", "filename": "a.json" },
            { "title": "10,000 Reasons", "artist": "Matt Redman", "tags": ["praise"], "filename": "b.json" },
            { "title": "Alabaré", "language": "es", "tags": ["praise"], "filename": "c.json" }
        ]"#,
    )
    .unwrap();

    let praise = catalog.filter(&SearchFilter::new(LanguageFilter::All, "Praise"));
    assert_eq!(praise.len(), 2);

    let english = catalog.filter(&SearchFilter::new(LanguageFilter::from("en"), ""));
    let mut pager = Pager::new(&english, 1);
    assert_eq!(pager.next_batch()[0].title, "Amazing Grace");
    assert_eq!(pager.status(), PageStatus::More);
    assert_eq!(pager.next_batch()[0].title, "10,000 Reasons");
    assert_eq!(pager.status(), PageStatus::End);
}

#[test]
fn test_config_file_drives_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("viewer.yaml");
    fs::write(&path, "transpose: 5\nlanguage: es\n").unwrap();

    let config = ViewerConfig::load(&path).unwrap();
    assert_eq!(config.language, LanguageFilter::Only("es".into()));

    let song = Song::from_json(AMAZING_GRACE).unwrap();
    let view = ViewState::new(config.transpose);
    assert_eq!(view.heading(&song), "Amazing Grace [C]");
}

#[test]
fn test_editor_leaves_loaded_song_alone() {
    let song = Song::from_json(AMAZING_GRACE).unwrap();
    let mut editor = SongEditor::new(&song);
    editor.set_word(1, 1, "love").unwrap();
    editor.set_word(4, 3, "found").unwrap();

    assert_eq!(pairs(&render_lines(&song, 0))[0][1].word, "grace");
    assert_eq!(pairs(&editor.preview(0))[0][1].word, "love");
    assert_eq!(editor.preview(0)[6], DisplayRow::Text("I once was found".into()));

    let exported = Song::from_json(&editor.export_json().unwrap()).unwrap();
    assert_eq!(&exported, editor.song());
    assert_ne!(exported, song);
}
