//! Text buffers: the owner of a document's snapshot sequence.
//!
//! [`TextHost`] is the seam between the commenting engine and whatever stores the text. The
//! engine only needs three things from a host: the current snapshot, atomic application of an
//! edit batch, and translation of spans between versions.
//!
//! [`TextBuffer`] is the in-memory implementation. It keeps one [`TextDelta`] per applied
//! batch, so any span computed against any earlier version can be re-targeted to the current
//! one.

use crate::delta::TextDelta;
use crate::edit::TextEdit;
use crate::error::{EditError, SpanError};
use crate::snapshot::Snapshot;
use crate::span::{PointTrackingMode, SpanTrackingMode, Version, VirtualPoint, VirtualSpan};

/// Host-side text storage the commenting engine edits through.
pub trait TextHost {
    /// The current snapshot.
    fn current_snapshot(&self) -> Snapshot;

    /// Apply `edit` atomically, returning the resulting snapshot.
    ///
    /// An edit with no operations returns the current snapshot unchanged.
    fn apply(&mut self, edit: TextEdit) -> Result<Snapshot, EditError>;

    /// Re-target `span` onto `target`, which must be the same as or newer than `span.version`.
    fn translate_span(
        &self,
        span: &VirtualSpan,
        target: &Snapshot,
        mode: SpanTrackingMode,
    ) -> Result<VirtualSpan, SpanError>;
}

/// An in-memory text buffer with a full version history.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    current: Snapshot,
    /// `deltas[n]` transforms version `n` into version `n + 1`.
    deltas: Vec<TextDelta>,
}

impl TextBuffer {
    /// Create a buffer holding `text` at version 0.
    pub fn new(text: &str) -> Self {
        Self {
            current: Snapshot::from_text(text),
            deltas: Vec::new(),
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Current version.
    pub fn version(&self) -> Version {
        self.current.version()
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.current.text()
    }

    /// Start an edit batch against the current snapshot.
    pub fn create_edit(&self) -> TextEdit {
        TextEdit::new(self.current.clone())
    }

    /// The delta that produced `version + 1` from `version`.
    pub fn delta(&self, version: Version) -> Option<&TextDelta> {
        self.deltas.get(version.0 as usize)
    }

    /// Check that `span` is well formed for its own version.
    fn validate(&self, span: &VirtualSpan) -> Result<(), SpanError> {
        let current = self.version();
        if span.version > current {
            return Err(SpanError::UnknownVersion {
                version: span.version,
                current,
            });
        }

        let len = match span.version.0 as usize {
            v if v == self.deltas.len() => self.current.len_chars(),
            v => self.deltas[v].before_char_count,
        };
        if span.start > span.end || span.end.position > len {
            return Err(SpanError::InvalidSpan {
                start: span.start.position,
                end: span.end.position,
                len,
            });
        }
        Ok(())
    }

    fn translate_point(
        &self,
        point: VirtualPoint,
        from: Version,
        target: &Snapshot,
        mode: PointTrackingMode,
    ) -> VirtualPoint {
        let position = self.deltas[from.0 as usize..target.version().0 as usize]
            .iter()
            .fold(point.position, |offset, delta| {
                delta.translate_offset(offset, mode)
            });

        // Virtual space only survives while the point still sits at its line end.
        let virtual_spaces = if point.is_in_virtual_space()
            && target.line_from_offset(position).end() == position
        {
            point.virtual_spaces
        } else {
            0
        };

        VirtualPoint::with_virtual_spaces(position, virtual_spaces)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl TextHost for TextBuffer {
    fn current_snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    fn apply(&mut self, edit: TextEdit) -> Result<Snapshot, EditError> {
        let current = self.version();
        if edit.version() != current {
            return Err(EditError::StaleEdit {
                edit: edit.version(),
                current,
            });
        }

        let delta = edit.to_delta()?;
        if delta.is_empty() {
            tracing::trace!(version = %current, "applied empty edit");
            return Ok(self.current.clone());
        }

        let mut index = self.current.index().clone();
        // Back to front, so earlier offsets stay valid.
        for change in delta.changes.iter().rev() {
            index.delete(change.old_start, change.old_len);
            index.insert(change.old_start, &change.new_text);
        }

        let version = current.next();
        tracing::debug!(
            %version,
            changes = delta.changes.len(),
            before = delta.before_char_count,
            after = delta.after_char_count,
            "applied text edit"
        );

        self.deltas.push(delta);
        self.current = Snapshot::new(version, index);
        Ok(self.current.clone())
    }

    fn translate_span(
        &self,
        span: &VirtualSpan,
        target: &Snapshot,
        mode: SpanTrackingMode,
    ) -> Result<VirtualSpan, SpanError> {
        self.validate(span)?;
        if target.version() > self.version() {
            return Err(SpanError::UnknownVersion {
                version: target.version(),
                current: self.version(),
            });
        }
        if target.version() < span.version {
            return Err(SpanError::Backwards {
                from: span.version,
                to: target.version(),
            });
        }
        if target.version() == span.version {
            return Ok(*span);
        }

        let start = self.translate_point(span.start, span.version, target, mode.start_mode());
        let mut end = self.translate_point(span.end, span.version, target, mode.end_mode());
        if end < start {
            end = start;
        }

        Ok(VirtualSpan::new(target.version(), start, end))
    }
}
