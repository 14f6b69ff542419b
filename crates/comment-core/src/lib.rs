#![warn(missing_docs)]
//! Comment Core - headless comment/uncomment engine for text editors
//!
//! # Overview
//!
//! `comment-core` comments and uncomments selected text using the line and block comment
//! formats of a language. It does not render or track a cursor itself; the upper layer supplies
//! selections as spans and receives spans covering the affected text back.
//!
//! # Core Features
//!
//! - **Versioned snapshots**: every batch of edits produces a new immutable snapshot
//! - **Span tracking**: spans from any earlier version can be re-targeted to the current one
//! - **Atomic batches**: all selections of a command are edited in one step, or not at all
//! - **Virtual space**: carets past the end of a line are honored
//! - **Language configuration**: comment formats per language from YAML
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Command Interface & Selections             │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Commenter (FormatCommenter)                │  ← Comment strategy
//! ├─────────────────────────────────────────────┤
//! │  TextHost / TextBuffer (versions, deltas)   │  ← Edit application
//! ├─────────────────────────────────────────────┤
//! │  Snapshot & Span model                      │  ← Coordinates
//! ├─────────────────────────────────────────────┤
//! │  Line Index (Rope-based)                    │  ← Line Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Using the Commenter directly
//!
//! ```rust
//! use comment_core::{
//!     CommentFormat, Commenter, FormatCommenter, TextBuffer, TextHost, Version, VirtualSpan,
//! };
//!
//! let commenter = FormatCommenter::from_formats([
//!     CommentFormat::line("//").unwrap(),
//!     CommentFormat::block("/*", "*/").unwrap(),
//! ]);
//! let mut buffer = TextBuffer::new("let x = 1;");
//!
//! let selection = VirtualSpan::from_offsets(Version(0), 4, 9);
//! let spans = commenter.comment_spans(&mut buffer, &[selection]).unwrap();
//! assert_eq!(buffer.text(), "let /*x = 1*/;");
//!
//! commenter.uncomment_spans(&mut buffer, &spans).unwrap();
//! assert_eq!(buffer.text(), "let x = 1;");
//! ```
//!
//! ## Using the Command Interface
//!
//! See [`commands`].
//!
//! # Module Description
//!
//! - [`line_index`] - Rope based line index
//! - [`span`] - versions, points and spans
//! - [`snapshot`] - immutable text snapshots and their lines
//! - [`delta`] - structured change records between versions
//! - [`edit`] - edit batches
//! - [`buffer`] - the [`TextHost`] seam and the in-memory [`TextBuffer`]
//! - [`commenter`] - the comment/uncomment engine
//! - [`selection`] - selections, normalization and box selection
//! - [`commands`] - unified command interface
//!
//! # Unicode Support
//!
//! All offsets and columns count Unicode scalar values (`char`s), never bytes.

pub mod buffer;
pub mod commands;
pub mod commenter;
pub mod delta;
pub mod edit;
pub mod error;
pub mod line_index;
/// Selections, normalization and box selection.
pub mod selection;
pub mod snapshot;
pub mod span;

pub use buffer::{TextBuffer, TextHost};
pub use commands::{CommandResult, CommentCommand, CommentExecutor};
pub use commenter::{Commenter, FormatCommenter, trim_span};
pub use delta::{TextChange, TextDelta};
pub use edit::TextEdit;
pub use error::{CommentError, EditError, SpanError};
pub use line_index::LineIndex;
pub use selection::{Selection, SelectionDirection, box_selections, normalize_selections};
pub use snapshot::{Snapshot, SnapshotLine};
pub use span::{PointTrackingMode, Span, SpanTrackingMode, Version, VirtualPoint, VirtualSpan};

pub use comment_core_lang::{
    BlockCommentFormat, CommentConfig, CommentFormat, ConfigError, FormatError, FormatSet,
    LanguageCommentConfig, LineCommentFormat,
};
