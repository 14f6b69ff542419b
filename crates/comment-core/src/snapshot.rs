//! Immutable, versioned views of document text.
//!
//! A [`Snapshot`] never changes: applying an edit produces a new snapshot with the next
//! [`Version`]. Lines are derived on demand as [`SnapshotLine`] views.

use crate::line_index::LineIndex;
use crate::span::{Version, VirtualPoint};

/// An immutable view of document text at one version.
///
/// Cloning is O(1).
#[derive(Debug, Clone)]
pub struct Snapshot {
    version: Version,
    index: LineIndex,
}

impl Snapshot {
    pub(crate) fn new(version: Version, index: LineIndex) -> Self {
        Self { version, index }
    }

    /// Build a standalone snapshot at version 0.
    pub fn from_text(text: &str) -> Self {
        Self::new(Version::default(), LineIndex::from_text(text))
    }

    /// Version of this snapshot within its buffer.
    pub fn version(&self) -> Version {
        self.version
    }

    pub(crate) fn index(&self) -> &LineIndex {
        &self.index
    }

    /// Total length in characters.
    pub fn len_chars(&self) -> usize {
        self.index.char_count()
    }

    /// Returns `true` if the snapshot holds no text.
    pub fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    /// The complete text.
    pub fn text(&self) -> String {
        self.index.get_text()
    }

    /// Text in `start..end` (character offsets, clamped).
    pub fn text_range(&self, start: usize, end: usize) -> String {
        self.index.slice(start, end).to_string()
    }

    /// Returns `true` if the text at `offset` starts with `token` (ordinal comparison).
    pub fn matches_at(&self, offset: usize, token: &str) -> bool {
        self.index.matches_at(offset, token)
    }

    /// The line with 0-based number `line_number`, clamped to the last line.
    pub fn line(&self, line_number: usize) -> SnapshotLine<'_> {
        let number = line_number.min(self.line_count() - 1);
        SnapshotLine {
            snapshot: self,
            number,
            start: self.index.line_start(number),
            end: self.index.line_end(number),
            end_including_line_break: self.index.line_end_including_break(number),
        }
    }

    /// The line containing `offset` (clamped to the document end).
    pub fn line_from_offset(&self, offset: usize) -> SnapshotLine<'_> {
        self.line(self.index.line_of_offset(offset))
    }

    /// A point at `column` on `line_number`; columns past the line end become virtual space.
    pub fn virtual_point(&self, line_number: usize, column: usize) -> VirtualPoint {
        let line = self.line(line_number);
        if column <= line.len() {
            VirtualPoint::new(line.start() + column)
        } else {
            VirtualPoint::with_virtual_spaces(line.end(), column - line.len())
        }
    }
}

/// A derived view of one line of a [`Snapshot`].
#[derive(Debug, Clone, Copy)]
pub struct SnapshotLine<'a> {
    snapshot: &'a Snapshot,
    number: usize,
    start: usize,
    end: usize,
    end_including_line_break: usize,
}

impl<'a> SnapshotLine<'a> {
    /// 0-based line number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Offset of the first character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset just past the last character, excluding the line break.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Offset just past the line break.
    pub fn end_including_line_break(&self) -> usize {
        self.end_including_line_break
    }

    /// Length in characters, excluding the line break.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the line has no characters besides its break.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The line's characters, excluding the line break.
    pub fn chars(&self) -> impl Iterator<Item = char> + use<'a> {
        self.snapshot.index().slice(self.start, self.end).chars()
    }

    /// The line's text, excluding the line break.
    pub fn text(&self) -> String {
        self.snapshot.text_range(self.start, self.end)
    }

    /// Column of the first non-whitespace character, or the line length if there is none.
    pub fn first_non_whitespace(&self) -> usize {
        self.chars().take_while(|c| c.is_whitespace()).count()
    }

    /// Returns `true` if the line contains only whitespace.
    pub fn is_blank(&self) -> bool {
        self.chars().all(char::is_whitespace)
    }

    /// Returns `true` if every character in columns `from..to` is whitespace.
    pub fn is_whitespace_between(&self, from: usize, to: usize) -> bool {
        self.chars()
            .skip(from)
            .take(to.saturating_sub(from))
            .all(char::is_whitespace)
    }
}
