//! # Chord Transposition
//!
//! Parses chord symbols (`C`, `F#m7`, `Bbsus4`, `G/B`) and shifts their root
//! by a signed number of semitones.
//!
//! ## Rules
//! - A chord is a root letter `A`-`G`, an optional accidental (`#` or `b`) and a
//!   free-form suffix (`m`, `maj7`, `sus4`, ...). The suffix is never altered.
//! - Flat roots are respelled as sharps (`Db` → `C#`, `Bb` → `A#`). Results are
//!   always written with sharps, so `transpose_chord("Db", 0)` is `"C#"`.
//! - Slash chords are split at the first `/` and both halves are transposed
//!   with the same step count.
//! - Anything that does not parse (`H`, `N.C.`, `x`) comes back unchanged. An
//!   empty chord stays empty.
//!
//! ## Example
//! ```rust
//! use songsheet::transpose_chord;
//!
//! assert_eq!(transpose_chord("G/B", 2), "A/C#");
//! assert_eq!(transpose_chord("Dm7", 2), "Em7");
//! assert_eq!(transpose_chord("C", -13), "B");
//! assert_eq!(transpose_chord("N.C.", 5), "N.C.");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// The 12 pitch classes in sharp spelling, indexed by semitones above C.
pub const CHROMATIC: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Root letter of a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteName {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::A => 'A',
            NoteName::B => 'B',
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Accidental::Sharp),
            'b' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Accidental::Sharp => '#',
            Accidental::Flat => 'b',
        }
    }
}

/// Pitch class as semitones above C, always in `0..12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build a pitch class from any semitone count, wrapping into `0..12`.
    pub fn new(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Shift by a signed number of semitones.
    ///
    /// The step count is reduced before it is added, so any `i32` is accepted.
    pub fn shift(self, steps: i32) -> Self {
        let steps = steps.rem_euclid(12) as u8;
        PitchClass((self.0 + steps) % 12)
    }

    /// Canonical (sharp) spelling, e.g. `"A#"`.
    pub fn name(self) -> &'static str {
        CHROMATIC[self.0 as usize]
    }

    /// Sharp spelling split into letter and accidental.
    fn spelling(self) -> (NoteName, Option<Accidental>) {
        match self.0 {
            0 => (NoteName::C, None),
            1 => (NoteName::C, Some(Accidental::Sharp)),
            2 => (NoteName::D, None),
            3 => (NoteName::D, Some(Accidental::Sharp)),
            4 => (NoteName::E, None),
            5 => (NoteName::F, None),
            6 => (NoteName::F, Some(Accidental::Sharp)),
            7 => (NoteName::G, None),
            8 => (NoteName::G, Some(Accidental::Sharp)),
            9 => (NoteName::A, None),
            10 => (NoteName::A, Some(Accidental::Sharp)),
            _ => (NoteName::B, None),
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed chord symbol, e.g. `Bbmaj7` or `G/B`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSymbol {
    pub root: NoteName,
    pub accidental: Option<Accidental>,
    /// Quality/extension text after the root, kept verbatim.
    pub suffix: String,
    /// Bass chord of a slash chord (`B` in `G/B`).
    pub bass: Option<Box<ChordSymbol>>,
}

impl ChordSymbol {
    /// Parse a chord symbol.
    ///
    /// Returns `None` when the text does not start with a root letter. A slash
    /// chord parses only when it has exactly one `/` and both halves parse.
    ///
    /// ```
    /// use songsheet::chord::{Accidental, ChordSymbol, NoteName};
    ///
    /// let chord = ChordSymbol::parse("Bbm7").unwrap();
    /// assert_eq!(chord.root, NoteName::B);
    /// assert_eq!(chord.accidental, Some(Accidental::Flat));
    /// assert_eq!(chord.suffix, "m7");
    ///
    /// assert!(ChordSymbol::parse("H7").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        if let Some((upper, lower)) = text.split_once('/') {
            if lower.contains('/') {
                return None;
            }
            let mut chord = Self::parse_simple(upper)?;
            chord.bass = Some(Box::new(Self::parse_simple(lower)?));
            return Some(chord);
        }
        Self::parse_simple(text)
    }

    fn parse_simple(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let root = NoteName::from_char(chars.next()?)?;
        let rest = chars.as_str();

        let accidental = rest.chars().next().and_then(Accidental::from_char);
        // Both accidentals are one byte wide
        let suffix = if accidental.is_some() { &rest[1..] } else { rest };

        Some(ChordSymbol {
            root,
            accidental,
            suffix: suffix.to_string(),
            bass: None,
        })
    }

    /// Pitch class of the root.
    ///
    /// Only naturals, sharps and the flats `Db Eb Gb Ab Bb` are known.
    /// `Cb`, `Fb`, `E#` and `B#` have no entry and return `None`.
    pub fn pitch_class(&self) -> Option<PitchClass> {
        let semitone = match (self.root, self.accidental) {
            (NoteName::C, None) => 0,
            (NoteName::C, Some(Accidental::Sharp)) | (NoteName::D, Some(Accidental::Flat)) => 1,
            (NoteName::D, None) => 2,
            (NoteName::D, Some(Accidental::Sharp)) | (NoteName::E, Some(Accidental::Flat)) => 3,
            (NoteName::E, None) => 4,
            (NoteName::F, None) => 5,
            (NoteName::F, Some(Accidental::Sharp)) | (NoteName::G, Some(Accidental::Flat)) => 6,
            (NoteName::G, None) => 7,
            (NoteName::G, Some(Accidental::Sharp)) | (NoteName::A, Some(Accidental::Flat)) => 8,
            (NoteName::A, None) => 9,
            (NoteName::A, Some(Accidental::Sharp)) | (NoteName::B, Some(Accidental::Flat)) => 10,
            (NoteName::B, None) => 11,
            _ => return None,
        };
        Some(PitchClass(semitone))
    }

    /// Transpose root (and bass) by `steps` semitones, respelling with sharps.
    ///
    /// Returns `None` if either root has no pitch class.
    pub fn transpose(&self, steps: i32) -> Option<ChordSymbol> {
        let (root, accidental) = self.pitch_class()?.shift(steps).spelling();
        let bass = match &self.bass {
            Some(bass) => Some(Box::new(bass.transpose(steps)?)),
            None => None,
        };
        Some(ChordSymbol {
            root,
            accidental,
            suffix: self.suffix.clone(),
            bass,
        })
    }
}

impl fmt::Display for ChordSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.as_char())?;
        if let Some(acc) = self.accidental {
            write!(f, "{}", acc.as_char())?;
        }
        f.write_str(&self.suffix)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

/// Transpose a chord symbol by `steps` semitones.
///
/// Never fails: empty input gives an empty string and text that is not a
/// chord is returned as-is. Slash chords split at the first `/`; the part
/// after it goes through the same rule, so `A/B/C` degrades to transposing
/// each piece rather than erroring.
pub fn transpose_chord(chord: &str, steps: i32) -> String {
    if chord.is_empty() {
        return String::new();
    }

    if let Some((upper, lower)) = chord.split_once('/') {
        return format!(
            "{}/{}",
            transpose_chord(upper, steps),
            transpose_chord(lower, steps)
        );
    }

    match ChordSymbol::parse(chord).and_then(|c| c.transpose(steps)) {
        Some(transposed) => transposed.to_string(),
        None => {
            trace!(chord, "passing through unrecognized chord");
            chord.to_string()
        }
    }
}

/// Transpose a whitespace-separated chord line token by token.
///
/// Runs of whitespace collapse to a single space.
pub fn transpose_chord_line(line: &str, steps: i32) -> String {
    line.split_whitespace()
        .map(|token| transpose_chord(token, steps))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transpose a song key such as `"G"` or `"Ebm"` for display.
pub fn transpose_key(key: &str, steps: i32) -> String {
    transpose_chord(key.trim(), steps)
}
