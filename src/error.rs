//! # Error Types
//!
//! Errors raised by the collaborators around the rendering core: document
//! loading, catalog parsing, configuration and the lyric editor.
//!
//! Chord transposition and line rendering never fail. A malformed chord is
//! passed through unchanged and a missing token renders blank, so nothing in
//! [`crate::chord`] or [`crate::render`] returns a `SongError`.
//!
//! ## Usage
//! ```rust
//! use songsheet::{Song, SongError};
//!
//! match Song::from_json("{ not json") {
//!     Ok(song) => println!("Loaded {}", song.title),
//!     Err(SongError::ParseError { line, column, message }) => {
//!         eprintln!("Bad song file at {}:{}: {}", line, column, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongError {
    /// A song document is not valid JSON or does not match the song schema.
    ///
    /// # Example
    /// ```
    /// # use songsheet::SongError;
    /// let err = SongError::ParseError {
    ///     line: 3,
    ///     column: 7,
    ///     message: "missing field `title`".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 3, column 7: missing field `title`");
    /// ```
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// The song catalog could not be read as a list of entries.
    #[error("Invalid catalog: {0}")]
    CatalogError(String),

    /// The viewer configuration is malformed or holds an unusable value.
    ///
    /// # Example
    /// ```
    /// # use songsheet::SongError;
    /// let err = SongError::ConfigError("batch_size must be at least 1".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: batch_size must be at least 1");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// An edit addressed a line or word that does not exist in the working copy.
    #[error("No lyric word {word} on line {line}")]
    EditOutOfRange { line: usize, word: usize },

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SongError {
    /// Wrap a `serde_json` failure, keeping its position in the document.
    pub(crate) fn from_json(err: serde_json::Error) -> Self {
        SongError::ParseError {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}
