//! Importer configuration management for `wikiport.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                             |
//! |------------|-----------------------------------------------------|
//! | `[import]` | Output extension, link base, date style             |
//! | `[tags]`   | Tag remap table (original tag -> replacement tag)   |
//!
//! Every field has a default and the config file itself is optional, so a
//! bare `wikiport import <dir>` works without any setup.

mod error;

pub use error::ConfigError;

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::convert::TagMap;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing wikiport.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Import settings
    pub import: ImportSection,

    /// Tag remap table, applied to every captured tag token
    pub tags: TagMap,
}

/// The `[import]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportSection {
    /// File extension for converted posts
    pub output_ext: String,

    /// Relative base prefixed to same-collection link targets
    pub posts_base: String,

    /// Force ISO 8601 date stamps (CLI --iso8601 also enables this)
    pub iso8601: bool,
}

impl Default for ImportSection {
    fn default() -> Self {
        Self {
            output_ext: ".md".to_string(),
            posts_base: "..".to_string(),
            iso8601: false,
        }
    }
}

impl ImportConfig {
    /// Load configuration from a config file path.
    ///
    /// A missing file is not an error: all settings default.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Ok(toml::from_str(&raw)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
