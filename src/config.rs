//! # Viewer Configuration
//!
//! Viewer preferences stored as YAML:
//!
//! ```yaml
//! theme: dark        # light | dark | system (default)
//! language: es       # all (default) | a language code
//! batch_size: 20     # songs per list batch, at least 1
//! transpose: 0       # starting transpose offset in semitones
//! ```
//!
//! Every key is optional. Unknown keys are rejected so typos do not silently
//! fall back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{LanguageFilter, DEFAULT_BATCH_SIZE};
use crate::error::SongError;

/// Colour theme preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the system colour scheme
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub theme: Theme,
    pub language: LanguageFilter,
    pub batch_size: usize,
    pub transpose: i32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            language: LanguageFilter::All,
            batch_size: DEFAULT_BATCH_SIZE,
            transpose: 0,
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a YAML config. Blank input gives the defaults.
    ///
    /// ```
    /// use songsheet::config::{Theme, ViewerConfig};
    ///
    /// let config = ViewerConfig::from_yaml("theme: dark\nbatch_size: 10\n").unwrap();
    /// assert_eq!(config.theme, Theme::Dark);
    /// assert_eq!(config.batch_size, 10);
    /// assert_eq!(config.transpose, 0);
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, SongError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ViewerConfig =
            serde_yaml::from_str(source).map_err(|e| SongError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SongError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SongError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&source)
    }

    pub fn to_yaml(&self) -> Result<String, SongError> {
        serde_yaml::to_string(self).map_err(|e| SongError::ConfigError(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), SongError> {
        if self.batch_size == 0 {
            return Err(SongError::ConfigError(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
