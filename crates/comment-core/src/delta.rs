//! Structured text change deltas.
//!
//! Every applied edit batch is recorded as a [`TextDelta`]: the set of changes that transforms
//! one snapshot version into the next. Deltas are what allow points and spans computed against
//! an older snapshot to be re-targeted to a newer one without diffing text.
//!
//! All offsets are **character offsets** (Unicode scalar values) in the *before* document.

use crate::span::PointTrackingMode;

/// A single replacement expressed in character offsets of the "before" document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    /// Start character offset of the replaced range.
    pub old_start: usize,
    /// Number of characters removed.
    pub old_len: usize,
    /// Exact inserted text (may be empty).
    pub new_text: String,
}

impl TextChange {
    /// Exclusive end character offset in the pre-edit document.
    pub fn old_end(&self) -> usize {
        self.old_start + self.old_len
    }

    /// Length of `new_text` in characters.
    pub fn new_len(&self) -> usize {
        self.new_text.chars().count()
    }

    /// Net change in document length.
    pub fn delta(&self) -> isize {
        self.new_len() as isize - self.old_len as isize
    }

    /// Returns `true` if nothing is removed.
    pub fn is_insertion(&self) -> bool {
        self.old_len == 0
    }
}

/// A structured description of a document text change.
///
/// `changes` are sorted by `old_start` and never overlap; two changes may touch (one starting
/// where the previous one ends).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDelta {
    /// Character count before applying `changes`.
    pub before_char_count: usize,
    /// Character count after applying `changes`.
    pub after_char_count: usize,
    /// Sorted, non-overlapping changes in "before" coordinates.
    pub changes: Vec<TextChange>,
}

impl TextDelta {
    /// Returns `true` if this delta contains no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Map a "before" offset to the "after" document.
    ///
    /// A point inside a replaced range collapses to the start of the replacement
    /// ([`PointTrackingMode::Negative`]) or to its end ([`PointTrackingMode::Positive`]). The
    /// mode also decides which side of text inserted exactly at the point it ends up on.
    pub fn translate_offset(&self, offset: usize, mode: PointTrackingMode) -> usize {
        let mut shift: isize = 0;

        for change in &self.changes {
            if offset < change.old_start {
                break;
            }

            let inside = if change.is_insertion() {
                offset == change.old_start
            } else {
                offset < change.old_end()
            };

            if !inside {
                shift += change.delta();
                continue;
            }

            let base = change.old_start as isize + shift;
            let mapped = match mode {
                PointTrackingMode::Negative => base,
                PointTrackingMode::Positive => base + change.new_len() as isize,
            };
            return (mapped.max(0) as usize).min(self.after_char_count);
        }

        ((offset as isize + shift).max(0) as usize).min(self.after_char_count)
    }
}
