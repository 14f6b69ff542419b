#![warn(missing_docs)]
//! `comment-core-lang` - comment delimiter descriptions for `comment-core`.
//!
//! This crate intentionally stays lightweight and does **not** know anything about text buffers,
//! snapshots or selections. It provides the small immutable values a host uses to tell the
//! commenting engine which comment syntax a language supports:
//!
//! - [`LineCommentFormat`]: a start token running to the end of the line (`//`, `#`, `--`).
//! - [`BlockCommentFormat`]: a start/end token pair (`/*` ... `*/`).
//! - [`FormatSet`]: an ordered list of formats with derived line/block views.
//!
//! The [`config`] module loads the same information from YAML.

pub mod config;

pub use config::{CommentConfig, ConfigError, FormatEntry, LanguageCommentConfig};

use thiserror::Error;

/// Errors produced when building comment formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A delimiter token was empty.
    #[error("{0} token cannot be empty")]
    EmptyToken(&'static str),
}

/// A line comment format (e.g. `//`), open-ended to the physical end of the line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineCommentFormat {
    start_text: String,
}

impl LineCommentFormat {
    /// Create a line comment format from its start token.
    pub fn new(start_text: impl Into<String>) -> Result<Self, FormatError> {
        let start_text = start_text.into();
        if start_text.is_empty() {
            return Err(FormatError::EmptyToken("line comment start"));
        }
        Ok(Self { start_text })
    }

    /// The token that starts a line comment.
    pub fn start_text(&self) -> &str {
        &self.start_text
    }
}

/// A block comment format (e.g. `/*` ... `*/`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockCommentFormat {
    start_text: String,
    end_text: String,
    allow_nesting: bool,
}

impl BlockCommentFormat {
    /// Create a non-nesting block comment format.
    pub fn new(
        start_text: impl Into<String>,
        end_text: impl Into<String>,
    ) -> Result<Self, FormatError> {
        Self::with_nesting(start_text, end_text, false)
    }

    /// Create a block comment format, recording whether the language allows nested comments.
    ///
    /// The commenting engine stores the flag but does not currently act on it.
    pub fn with_nesting(
        start_text: impl Into<String>,
        end_text: impl Into<String>,
        allow_nesting: bool,
    ) -> Result<Self, FormatError> {
        let start_text = start_text.into();
        let end_text = end_text.into();
        if start_text.is_empty() {
            return Err(FormatError::EmptyToken("block comment start"));
        }
        if end_text.is_empty() {
            return Err(FormatError::EmptyToken("block comment end"));
        }
        Ok(Self {
            start_text,
            end_text,
            allow_nesting,
        })
    }

    /// The token that opens a block comment.
    pub fn start_text(&self) -> &str {
        &self.start_text
    }

    /// The token that closes a block comment.
    pub fn end_text(&self) -> &str {
        &self.end_text
    }

    /// Whether block comments of this format may nest.
    pub fn allow_nesting(&self) -> bool {
        self.allow_nesting
    }
}

/// A comment format supported by a language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommentFormat {
    /// Line comment (start token only).
    Line(LineCommentFormat),
    /// Block comment (start and end tokens).
    Block(BlockCommentFormat),
}

impl CommentFormat {
    /// Shorthand for `CommentFormat::Line(LineCommentFormat::new(start)?)`.
    pub fn line(start_text: impl Into<String>) -> Result<Self, FormatError> {
        LineCommentFormat::new(start_text).map(Self::Line)
    }

    /// Shorthand for `CommentFormat::Block(BlockCommentFormat::new(start, end)?)`.
    pub fn block(
        start_text: impl Into<String>,
        end_text: impl Into<String>,
    ) -> Result<Self, FormatError> {
        BlockCommentFormat::new(start_text, end_text).map(Self::Block)
    }

    /// The opening token of this format.
    pub fn start_text(&self) -> &str {
        match self {
            Self::Line(format) => format.start_text(),
            Self::Block(format) => format.start_text(),
        }
    }
}

impl From<LineCommentFormat> for CommentFormat {
    fn from(format: LineCommentFormat) -> Self {
        Self::Line(format)
    }
}

impl From<BlockCommentFormat> for CommentFormat {
    fn from(format: BlockCommentFormat) -> Self {
        Self::Block(format)
    }
}

/// An ordered set of comment formats for one language.
///
/// The first line format and the first block format are the *preferred* formats used when
/// commenting; uncommenting probes every format in order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatSet {
    formats: Vec<CommentFormat>,
    line_formats: Vec<LineCommentFormat>,
    block_formats: Vec<BlockCommentFormat>,
}

impl FormatSet {
    /// Build a format set, preserving the given order.
    pub fn new(formats: impl IntoIterator<Item = CommentFormat>) -> Self {
        let formats: Vec<CommentFormat> = formats.into_iter().collect();
        let mut line_formats = Vec::new();
        let mut block_formats = Vec::new();
        for format in &formats {
            match format {
                CommentFormat::Line(line) => line_formats.push(line.clone()),
                CommentFormat::Block(block) => block_formats.push(block.clone()),
            }
        }

        Self {
            formats,
            line_formats,
            block_formats,
        }
    }

    /// All formats, in registration order.
    pub fn formats(&self) -> &[CommentFormat] {
        &self.formats
    }

    /// Line formats only, in registration order.
    pub fn line_formats(&self) -> &[LineCommentFormat] {
        &self.line_formats
    }

    /// Block formats only, in registration order.
    pub fn block_formats(&self) -> &[BlockCommentFormat] {
        &self.block_formats
    }

    /// The first registered line format.
    pub fn preferred_line_format(&self) -> Option<&LineCommentFormat> {
        self.line_formats.first()
    }

    /// The first registered block format.
    pub fn preferred_block_format(&self) -> Option<&BlockCommentFormat> {
        self.block_formats.first()
    }

    /// Returns `true` if at least one line format is registered.
    pub fn prefer_line_comments(&self) -> bool {
        !self.line_formats.is_empty()
    }

    /// Returns `true` if no formats are registered.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl FromIterator<CommentFormat> for FormatSet {
    fn from_iter<T: IntoIterator<Item = CommentFormat>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_tokens_rejected() {
        assert_eq!(
            LineCommentFormat::new(""),
            Err(FormatError::EmptyToken("line comment start"))
        );
        assert_eq!(
            BlockCommentFormat::new("", "*/"),
            Err(FormatError::EmptyToken("block comment start"))
        );
        assert_eq!(
            BlockCommentFormat::new("/*", ""),
            Err(FormatError::EmptyToken("block comment end"))
        );
    }

    #[test]
    fn test_format_set_views_preserve_order() {
        let set = FormatSet::new([
            CommentFormat::block("/*", "*/").unwrap(),
            CommentFormat::line("//").unwrap(),
            CommentFormat::block("(*", "*)").unwrap(),
            CommentFormat::line("#").unwrap(),
        ]);

        assert_eq!(set.formats().len(), 4);
        let lines: Vec<&str> = set.line_formats().iter().map(|f| f.start_text()).collect();
        assert_eq!(lines, vec!["//", "#"]);
        let blocks: Vec<(&str, &str)> = set
            .block_formats()
            .iter()
            .map(|f| (f.start_text(), f.end_text()))
            .collect();
        assert_eq!(blocks, vec![("/*", "*/"), ("(*", "*)")]);

        assert_eq!(set.preferred_line_format().unwrap().start_text(), "//");
        assert_eq!(set.preferred_block_format().unwrap().start_text(), "/*");
        assert!(set.prefer_line_comments());
    }

    #[test]
    fn test_block_only_set_does_not_prefer_line_comments() {
        let set: FormatSet = [CommentFormat::block("<!--", "-->").unwrap()]
            .into_iter()
            .collect();
        assert!(!set.prefer_line_comments());
        assert!(set.preferred_line_format().is_none());
        assert!(set.preferred_block_format().is_some());
    }

    #[test]
    fn test_nesting_flag_is_kept() {
        let nested = BlockCommentFormat::with_nesting("/*", "*/", true).unwrap();
        assert!(nested.allow_nesting());
        assert!(!BlockCommentFormat::new("/*", "*/").unwrap().allow_nesting());
    }
}
