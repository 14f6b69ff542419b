//! Data-driven language comment configuration.
//!
//! Hosts usually keep comment syntax in a settings file rather than in code. This module reads
//! a YAML document mapping language names to the comment formats they support:
//!
//! ```yaml
//! languages:
//!   rust:
//!     formats:
//!       - line: "//"
//!       - block_start: "/*"
//!         block_end: "*/"
//!         allow_nesting: true
//!   python:
//!     formats:
//!       - line: "#"
//! ```
//!
//! Format order is significant: the first line format and the first block format are the
//! preferred formats when commenting.

use crate::{BlockCommentFormat, CommentFormat, FormatError, FormatSet, LineCommentFormat};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors produced while loading a language comment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("invalid comment format for language '{language}': {source}")]
    /// A configured format had an empty token.
    Format {
        /// The language whose entry was invalid.
        language: String,
        /// The underlying format error.
        source: FormatError,
    },

    #[error("unknown language '{0}'")]
    /// No configuration exists for the requested language.
    UnknownLanguage(String),
}

/// A single configured comment format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FormatEntry {
    /// A line comment token.
    Line {
        /// Line comment token (e.g. `//`, `#`).
        line: String,
    },
    /// A block comment token pair.
    Block {
        /// Block comment start token (e.g. `/*`).
        block_start: String,
        /// Block comment end token (e.g. `*/`).
        block_end: String,
        #[serde(default)]
        /// Whether the language allows nested block comments.
        allow_nesting: bool,
    },
}

impl FormatEntry {
    fn to_format(&self) -> Result<CommentFormat, FormatError> {
        match self {
            Self::Line { line } => LineCommentFormat::new(line.as_str()).map(CommentFormat::Line),
            Self::Block {
                block_start,
                block_end,
                allow_nesting,
            } => BlockCommentFormat::with_nesting(
                block_start.as_str(),
                block_end.as_str(),
                *allow_nesting,
            )
            .map(CommentFormat::Block),
        }
    }
}

/// Comment tokens/config for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CommentConfig {
    #[serde(default)]
    /// Configured formats, in preference order.
    pub formats: Vec<FormatEntry>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            formats: vec![FormatEntry::Line { line: token.into() }],
        }
    }

    /// Create a config that supports only block comments.
    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            formats: vec![FormatEntry::Block {
                block_start: start.into(),
                block_end: end.into(),
                allow_nesting: false,
            }],
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        let mut config = Self::line(line);
        config.formats.extend(Self::block(block_start, block_end).formats);
        config
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.formats
            .iter()
            .any(|f| matches!(f, FormatEntry::Line { line } if !line.is_empty()))
    }

    /// Returns `true` if a complete block comment token pair is configured.
    pub fn has_block(&self) -> bool {
        self.formats.iter().any(|f| {
            matches!(f, FormatEntry::Block { block_start, block_end, .. }
                if !block_start.is_empty() && !block_end.is_empty())
        })
    }

    /// Validate the configured tokens and build a [`FormatSet`].
    pub fn to_format_set(&self) -> Result<FormatSet, FormatError> {
        self.formats.iter().map(FormatEntry::to_format).collect()
    }
}

/// Comment configuration for a set of named languages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LanguageCommentConfig {
    #[serde(default)]
    /// Per-language comment configuration keyed by language name.
    pub languages: BTreeMap<String, CommentConfig>,
}

impl LanguageCommentConfig {
    /// Parse a configuration from YAML text, validating every language entry.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        for (language, entry) in &config.languages {
            entry
                .to_format_set()
                .map_err(|source| ConfigError::Format {
                    language: language.clone(),
                    source,
                })?;
        }
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Configured language names, sorted.
    pub fn language_names(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Build the [`FormatSet`] for `language`.
    pub fn formats_for(&self, language: &str) -> Result<FormatSet, ConfigError> {
        let entry = self
            .languages
            .get(language)
            .ok_or_else(|| ConfigError::UnknownLanguage(language.to_string()))?;
        entry.to_format_set().map_err(|source| ConfigError::Format {
            language: language.to_string(),
            source,
        })
    }
}
