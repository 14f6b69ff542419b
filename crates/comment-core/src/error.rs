//! Error types.
//!
//! None of these describe "nothing to comment": a span without an applicable format is passed
//! through unchanged. Errors only report caller contract violations, detected before any text
//! is modified.

use crate::span::Version;
use thiserror::Error;

/// Errors produced when applying an edit batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The edit was built against a snapshot that is no longer current.
    #[error("edit targets {edit} but the buffer is at {current}")]
    StaleEdit {
        /// Version the edit was created against.
        edit: Version,
        /// Current buffer version.
        current: Version,
    },

    /// An operation reaches past the end of the base snapshot.
    #[error("edit range {start}..{end} is out of bounds (length {len})")]
    OutOfBounds {
        /// Start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
        /// Length of the base snapshot.
        len: usize,
    },

    /// Two operations touch overlapping text.
    #[error("overlapping edits at offset {0}")]
    Overlap(usize),
}

/// Errors produced when resolving or translating a span.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    /// The span refers to a version this buffer never produced.
    #[error("unknown snapshot version {version} (current is {current})")]
    UnknownVersion {
        /// Version carried by the span.
        version: Version,
        /// Current buffer version.
        current: Version,
    },

    /// The span's target is older than the span itself.
    #[error("cannot translate from {from} back to {to}")]
    Backwards {
        /// Version carried by the span.
        from: Version,
        /// Requested target version.
        to: Version,
    },

    /// The span endpoints are inverted or out of range.
    #[error("invalid span {start}..{end} (length {len})")]
    InvalidSpan {
        /// Start character offset.
        start: usize,
        /// End character offset.
        end: usize,
        /// Length of the snapshot the span refers to.
        len: usize,
    },
}

/// Errors produced by the commenting operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    /// An input span could not be resolved against the buffer.
    #[error(transparent)]
    Span(#[from] SpanError),

    /// The edit batch could not be applied.
    #[error(transparent)]
    Edit(#[from] EditError),
}
