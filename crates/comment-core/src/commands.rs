//! Command interface.
//!
//! [`CommentExecutor`] is the entry point for editor frontends: it owns a [`TextBuffer`], a
//! [`Commenter`] and the current selections, and runs [`CommentCommand`]s against them. After a
//! successful command the selections are replaced by the spans covering the affected text, so
//! running the inverse command right away restores the original text.
//!
//! # Example
//!
//! ```rust
//! use comment_core::{CommentCommand, CommentExecutor, CommentFormat, FormatSet};
//!
//! let formats = FormatSet::new([
//!     CommentFormat::line("//").unwrap(),
//!     CommentFormat::block("/*", "*/").unwrap(),
//! ]);
//! let mut executor = CommentExecutor::with_formats("    Initial text", formats);
//!
//! executor.execute(CommentCommand::CommentSelection).unwrap();
//! assert_eq!(executor.text(), "    //Initial text");
//!
//! executor.execute(CommentCommand::UncommentSelection).unwrap();
//! assert_eq!(executor.text(), "    Initial text");
//! ```

use crate::buffer::{TextBuffer, TextHost};
use crate::commenter::{Commenter, FormatCommenter};
use crate::delta::TextDelta;
use crate::error::CommentError;
use crate::selection::{Selection, box_selections, normalize_selections};
use crate::span::{SpanTrackingMode, Version, VirtualPoint, VirtualSpan};
use comment_core_lang::FormatSet;

/// Commands understood by [`CommentExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentCommand {
    /// Comment out every selection.
    CommentSelection,
    /// Remove comments from every selection.
    UncommentSelection,
}

/// Command execution result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Nothing was selected, so nothing ran.
    Success,
    /// Spans covering the affected text in the buffer's current snapshot.
    Spans(Vec<VirtualSpan>),
}

/// Runs comment commands against an owned buffer and selection set.
///
/// Dropping the executor releases the buffer, the commenter and the selections together.
#[derive(Debug, Clone)]
pub struct CommentExecutor<C = FormatCommenter> {
    buffer: TextBuffer,
    commenter: C,
    selections: Vec<Selection>,
    primary_index: usize,
    command_history: Vec<CommentCommand>,
    /// Delta of the last command that changed the text (cleared on each `execute()` call).
    last_text_delta: Option<TextDelta>,
}

impl CommentExecutor<FormatCommenter> {
    /// Create an executor that comments with `formats`.
    pub fn with_formats(text: &str, formats: FormatSet) -> Self {
        Self::new(text, FormatCommenter::new(formats))
    }
}

impl<C: Commenter> CommentExecutor<C> {
    /// Create an executor over `text` with a caret at offset 0.
    pub fn new(text: &str, commenter: C) -> Self {
        let buffer = TextBuffer::new(text);
        let caret = Selection::caret(buffer.version(), VirtualPoint::new(0));
        Self {
            buffer,
            commenter,
            selections: vec![caret],
            primary_index: 0,
            command_history: Vec::new(),
            last_text_delta: None,
        }
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Mutable access to the buffer.
    ///
    /// Edits applied directly are fine: selections are re-targeted to the current snapshot
    /// before the next command.
    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    /// Current text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Current version.
    pub fn version(&self) -> Version {
        self.buffer.version()
    }

    /// The commenter commands run with.
    pub fn commenter(&self) -> &C {
        &self.commenter
    }

    /// Current selections.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// The selection holding the primary caret, if any.
    pub fn primary_selection(&self) -> Option<&Selection> {
        self.selections.get(self.primary_index)
    }

    /// Replace the selection set with a single selection.
    pub fn set_selection(&mut self, selection: Selection) -> Result<(), CommentError> {
        self.set_selections(vec![selection], 0)
    }

    /// Replace the selection set.
    ///
    /// Every selection is re-targeted to the current snapshot, then overlapping selections are
    /// merged. Fails without changing anything if any selection is invalid.
    pub fn set_selections(
        &mut self,
        selections: Vec<Selection>,
        primary_index: usize,
    ) -> Result<(), CommentError> {
        let current = self.buffer.current_snapshot();
        let selections = selections
            .iter()
            .map(|selection| -> Result<Selection, CommentError> {
                let span = self.buffer.translate_span(
                    &selection.span(),
                    &current,
                    SpanTrackingMode::EdgeExclusive,
                )?;
                Ok(Selection::from_span(span, selection.direction()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (selections, primary_index) = normalize_selections(selections, primary_index);
        self.selections = selections;
        self.primary_index = primary_index;
        Ok(())
    }

    /// Select a box between two `(line, column)` corners, one selection per line.
    pub fn select_box(&mut self, anchor: (usize, usize), active: (usize, usize)) {
        let current = self.buffer.current_snapshot();
        let (selections, primary_index) = box_selections(&current, anchor, active);
        self.selections = selections;
        self.primary_index = primary_index;
    }

    /// Execute a command.
    pub fn execute(&mut self, command: CommentCommand) -> Result<CommandResult, CommentError> {
        self.last_text_delta = None;
        self.command_history.push(command);

        // Re-target selections left behind by direct buffer edits.
        let selections = std::mem::take(&mut self.selections);
        if let Err(err) = self.set_selections(selections.clone(), self.primary_index) {
            self.selections = selections;
            return Err(err);
        }

        let spans: Vec<VirtualSpan> = self.selections.iter().map(Selection::span).collect();
        let before = self.buffer.version();
        let result = match command {
            CommentCommand::CommentSelection => {
                self.commenter.comment_spans(&mut self.buffer, &spans)?
            }
            CommentCommand::UncommentSelection => {
                self.commenter.uncomment_spans(&mut self.buffer, &spans)?
            }
        };

        if self.buffer.version() != before {
            self.last_text_delta = self.buffer.delta(before).cloned();
        }

        tracing::debug!(
            ?command,
            selections = spans.len(),
            results = result.len(),
            version = %self.buffer.version(),
            "executed comment command"
        );

        if result.is_empty() {
            return Ok(CommandResult::Success);
        }

        let direction = self
            .primary_selection()
            .map(Selection::direction)
            .unwrap_or_default();
        self.selections = result
            .iter()
            .map(|span| Selection::from_span(*span, direction))
            .collect();
        self.primary_index = self.primary_index.min(self.selections.len() - 1);

        Ok(CommandResult::Spans(result))
    }

    /// Execute commands in order, stopping at the first failure.
    pub fn execute_batch(
        &mut self,
        commands: Vec<CommentCommand>,
    ) -> Result<Vec<CommandResult>, CommentError> {
        let mut results = Vec::new();

        for command in commands {
            let result = self.execute(command)?;
            results.push(result);
        }

        Ok(results)
    }

    /// Get command history
    pub fn get_command_history(&self) -> &[CommentCommand] {
        &self.command_history
    }

    /// Get the structured text delta produced by the last successful `execute()` call, if any.
    pub fn last_text_delta(&self) -> Option<&TextDelta> {
        self.last_text_delta.as_ref()
    }

    /// Take the structured text delta produced by the last successful `execute()` call, if any.
    pub fn take_last_text_delta(&mut self) -> Option<TextDelta> {
        self.last_text_delta.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionDirection;
    use comment_core_lang::CommentFormat;

    fn executor(text: &str) -> CommentExecutor {
        CommentExecutor::with_formats(
            text,
            FormatSet::new([
                CommentFormat::line("//").unwrap(),
                CommentFormat::block("/*", "*/").unwrap(),
            ]),
        )
    }

    #[test]
    fn test_starts_with_caret() {
        let executor = executor("abc");
        assert_eq!(
            executor.primary_selection(),
            Some(&Selection::caret(Version(0), VirtualPoint::new(0)))
        );
    }

    #[test]
    fn test_history_and_delta() {
        let mut executor = executor("abc");
        executor.execute(CommentCommand::CommentSelection).unwrap();
        assert_eq!(executor.text(), "//abc");
        assert_eq!(executor.last_text_delta().map(|d| d.after_char_count), Some(5));

        // No block comment encloses the selection, so the line comment goes.
        executor.execute(CommentCommand::UncommentSelection).unwrap();
        assert_eq!(executor.text(), "abc");
        assert_eq!(
            executor.get_command_history(),
            &[
                CommentCommand::CommentSelection,
                CommentCommand::UncommentSelection
            ]
        );
        assert!(executor.take_last_text_delta().is_some());
        assert!(executor.last_text_delta().is_none());
    }

    #[test]
    fn test_no_selection_is_noop() {
        let mut executor = executor("abc");
        executor.set_selections(Vec::new(), 0).unwrap();
        assert_eq!(
            executor.execute(CommentCommand::CommentSelection),
            Ok(CommandResult::Success)
        );
        assert_eq!(executor.version(), Version(0));
        assert!(executor.last_text_delta().is_none());
    }

    #[test]
    fn test_invalid_selection_rejected() {
        let mut executor = executor("abc");
        let bad = Selection::new(Version(0), VirtualPoint::new(1), VirtualPoint::new(10));
        assert!(executor.set_selection(bad).is_err());
        assert_eq!(executor.selections().len(), 1);
    }

    #[test]
    fn test_reversed_selection_stays_reversed() {
        let mut executor = executor("let x = 1;");
        let backward = Selection::new(Version(0), VirtualPoint::new(9), VirtualPoint::new(4));
        executor.set_selection(backward).unwrap();

        executor.execute(CommentCommand::CommentSelection).unwrap();
        assert_eq!(executor.text(), "let /*x = 1*/;");

        let selection = executor.primary_selection().copied().unwrap();
        assert_eq!(selection.direction(), SelectionDirection::Backward);
        assert_eq!(selection.span(), VirtualSpan::from_offsets(Version(1), 4, 13));
    }
}
