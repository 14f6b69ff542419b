//! The comment/uncomment engine.
//!
//! [`FormatCommenter`] turns a set of selected spans into commented or uncommented text using a
//! language's [`FormatSet`]. Each call opens a single [`TextEdit`] against the host's current
//! snapshot, lets every span queue its insertions/deletions, applies the batch once, and returns
//! the spans covering the result, re-targeted to the new snapshot.
//!
//! # Strategy
//!
//! Commenting a span uses line comments when the language has one and the span covers whole
//! lines (or is a caret). Anything else is wrapped in the preferred block comment:
//!
//! ```text
//! "    Initial text"   caret anywhere    ->  "    //Initial text"
//! "let x = 1;"         "x = 1" selected  ->  "let /*x = 1*/;"
//! ```
//!
//! Uncommenting a non-empty span first looks for a block comment exactly enclosing the
//! (whitespace-trimmed) selection, then falls back to removing line comment tokens from every
//! selected line.

use crate::buffer::TextHost;
use crate::edit::TextEdit;
use crate::error::CommentError;
use crate::snapshot::Snapshot;
use crate::span::{SpanTrackingMode, VirtualPoint, VirtualSpan};
use comment_core_lang::{BlockCommentFormat, CommentFormat, FormatSet, LineCommentFormat};

/// Commenting and uncommenting of selected spans.
///
/// Both operations take spans (possibly against older snapshots of the host) and return the
/// spans covering the resulting text in the host's new current snapshot. An empty input is a
/// no-op that never touches the host.
pub trait Commenter {
    /// Comment out `spans`.
    fn comment_spans<H: TextHost + ?Sized>(
        &self,
        host: &mut H,
        spans: &[VirtualSpan],
    ) -> Result<Vec<VirtualSpan>, CommentError>;

    /// Remove comments from `spans`.
    fn uncomment_spans<H: TextHost + ?Sized>(
        &self,
        host: &mut H,
        spans: &[VirtualSpan],
    ) -> Result<Vec<VirtualSpan>, CommentError>;
}

/// A [`Commenter`] driven by a fixed list of comment formats.
#[derive(Debug, Clone, Default)]
pub struct FormatCommenter {
    formats: FormatSet,
}

impl FormatCommenter {
    /// Create a commenter for `formats`.
    pub fn new(formats: FormatSet) -> Self {
        Self { formats }
    }

    /// Create a commenter from individual formats, preserving their order.
    pub fn from_formats(formats: impl IntoIterator<Item = CommentFormat>) -> Self {
        Self::new(FormatSet::new(formats))
    }

    /// The configured format set.
    pub fn format_set(&self) -> &FormatSet {
        &self.formats
    }

    /// All formats, in registration order.
    pub fn formats(&self) -> &[CommentFormat] {
        self.formats.formats()
    }

    /// Line formats, in registration order.
    pub fn line_formats(&self) -> &[LineCommentFormat] {
        self.formats.line_formats()
    }

    /// Block formats, in registration order.
    pub fn block_formats(&self) -> &[BlockCommentFormat] {
        self.formats.block_formats()
    }

    /// The line format used when commenting.
    pub fn preferred_line_format(&self) -> Option<&LineCommentFormat> {
        self.formats.preferred_line_format()
    }

    /// The block format used when commenting.
    pub fn preferred_block_format(&self) -> Option<&BlockCommentFormat> {
        self.formats.preferred_block_format()
    }

    /// Whether whole-line selections are commented with line comments.
    pub fn prefer_line_comments(&self) -> bool {
        self.formats.prefer_line_comments()
    }

    fn run_batch<H, F>(
        &self,
        host: &mut H,
        spans: &[VirtualSpan],
        operation: &'static str,
        mut per_span: F,
    ) -> Result<Vec<VirtualSpan>, CommentError>
    where
        H: TextHost + ?Sized,
        F: FnMut(&Self, &VirtualSpan, &mut TextEdit) -> VirtualSpan,
    {
        if spans.is_empty() {
            return Ok(Vec::new());
        }

        // Resolve every span before queuing anything, so a bad span edits nothing.
        let base = host.current_snapshot();
        let spans = spans
            .iter()
            .map(|span| host.translate_span(span, &base, SpanTrackingMode::EdgeExclusive))
            .collect::<Result<Vec<_>, _>>()?;

        // Queue in document order so same-offset insertions nest correctly; results keep the
        // input order.
        let mut order: Vec<usize> = (0..spans.len()).collect();
        order.sort_by_key(|&index| (spans[index].start, spans[index].end));

        let mut edit = TextEdit::new(base);
        let mut result = spans.clone();
        for index in order {
            result[index] = per_span(self, &spans[index], &mut edit);
        }
        let queued = edit.len();
        let target = host.apply(edit)?;

        if result.len() > 1 {
            result.retain(|span| !span.is_empty());
        }

        let result = result
            .iter()
            .map(|span| host.translate_span(span, &target, SpanTrackingMode::EdgeInclusive))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            operation,
            spans = spans.len(),
            queued,
            results = result.len(),
            version = %target.version(),
            "comment batch applied"
        );
        Ok(result)
    }

    /// Comment one span, queuing the edits into `edit`.
    ///
    /// `span` must refer to the edit's base snapshot. Returns the span covered by the inserted
    /// markers (in base coordinates), or `span` unchanged if no format applies.
    pub fn comment_span(&self, span: &VirtualSpan, edit: &mut TextEdit) -> VirtualSpan {
        let use_line_comments = self.prefer_line_comments()
            && (span.is_empty() || covers_whole_lines(edit.snapshot(), span));

        if use_line_comments {
            if let Some(format) = self.preferred_line_format() {
                return self.comment_lines(span, edit, format);
            }
        }

        match self.preferred_block_format() {
            Some(format) => self.comment_block(span, edit, format),
            None => {
                tracing::trace!(
                    start = span.start.position,
                    end = span.end.position,
                    "no comment format applies"
                );
                *span
            }
        }
    }

    /// Insert `format`'s token on every non-blank line touched by `span`.
    ///
    /// Tokens go in at the smallest indentation among those lines, so relative indentation is
    /// preserved. Lines already commented by another span of the same batch are skipped. Returns the full line range (start of the first line to end of the last).
    pub fn comment_lines(
        &self,
        span: &VirtualSpan,
        edit: &mut TextEdit,
        format: &LineCommentFormat,
    ) -> VirtualSpan {
        let snapshot = edit.snapshot().clone();
        let span = shrink_to_selected_lines(&snapshot, span);
        let first = snapshot.line_from_offset(span.start.position).number();
        let last = snapshot.line_from_offset(span.end.position).number();

        let column = (first..=last)
            .map(|number| snapshot.line(number))
            .filter(|line| !line.is_blank())
            .map(|line| line.first_non_whitespace())
            .min();

        if let Some(column) = column {
            for number in first..=last {
                let line = snapshot.line(number);
                if !line.is_blank() && edit.claim_line(number) {
                    edit.insert(line.start() + column, format.start_text());
                }
            }
        }

        tracing::trace!(
            first,
            last,
            column,
            token = format.start_text(),
            "commenting lines"
        );
        VirtualSpan::from_offsets(
            span.version,
            snapshot.line(first).start(),
            snapshot.line(last).end(),
        )
    }

    /// Wrap `span` in `format`'s delimiters.
    ///
    /// A caret is first widened to its line, from the first non-whitespace character to the line
    /// end (or the caret's virtual position). Returns the wrapped span in base coordinates.
    pub fn comment_block(
        &self,
        span: &VirtualSpan,
        edit: &mut TextEdit,
        format: &BlockCommentFormat,
    ) -> VirtualSpan {
        let span = if span.is_empty() {
            expand_to_line_content(edit.snapshot(), span)
        } else {
            *span
        };

        edit.insert(span.start.position, format.start_text());
        edit.insert(span.end.position, format.end_text());

        tracing::trace!(
            start = span.start.position,
            end = span.end.position,
            token = format.start_text(),
            "commenting block"
        );
        span
    }

    /// Uncomment one span, queuing the edits into `edit`.
    ///
    /// A caret only removes line comments. Otherwise every block format is tried in order and
    /// the first exact match wins; if none matches, line comments are removed.
    pub fn uncomment_span(&self, span: &VirtualSpan, edit: &mut TextEdit) -> VirtualSpan {
        if !span.is_empty() {
            if let Some(result) = self.try_uncomment_blocks(span, edit, self.block_formats()) {
                return result;
            }
        }

        let (_, result) = self.try_uncomment_lines(span, edit, self.line_formats());
        result
    }

    /// Remove one leading line comment token from every line touched by `span`.
    ///
    /// On each line the first format whose token starts at the first non-whitespace character
    /// is removed, unless another span of the same batch already removed one there. Returns whether anything was removed, plus the full line range.
    pub fn try_uncomment_lines(
        &self,
        span: &VirtualSpan,
        edit: &mut TextEdit,
        formats: &[LineCommentFormat],
    ) -> (bool, VirtualSpan) {
        let snapshot = edit.snapshot().clone();
        let span = shrink_to_selected_lines(&snapshot, span);
        let first = snapshot.line_from_offset(span.start.position).number();
        let last = snapshot.line_from_offset(span.end.position).number();

        let mut found = false;
        for number in first..=last {
            let line = snapshot.line(number);
            let column = line.first_non_whitespace();
            let offset = line.start() + column;

            let matched = formats.iter().find(|format| {
                column + token_len(format.start_text()) <= line.len()
                    && snapshot.matches_at(offset, format.start_text())
            });
            if let Some(format) = matched {
                if !edit.claim_line(number) {
                    continue;
                }
                tracing::trace!(line = number, token = format.start_text(), "removing line comment");
                edit.delete(offset, token_len(format.start_text()));
                found = true;
            }
        }

        let result = VirtualSpan::from_offsets(
            span.version,
            snapshot.line(first).start(),
            snapshot.line(last).end(),
        );
        (found, result)
    }

    /// Try each of `formats` in order with [`Self::try_uncomment_block`].
    pub fn try_uncomment_blocks(
        &self,
        span: &VirtualSpan,
        edit: &mut TextEdit,
        formats: &[BlockCommentFormat],
    ) -> Option<VirtualSpan> {
        formats
            .iter()
            .find_map(|format| self.try_uncomment_block(span, edit, format))
    }

    /// Remove `format`'s delimiters if they exactly enclose the whitespace-trimmed `span`.
    ///
    /// Returns the trimmed span (base coordinates, delimiters included) on a match, or `None`
    /// without queuing anything.
    pub fn try_uncomment_block(
        &self,
        span: &VirtualSpan,
        edit: &mut TextEdit,
        format: &BlockCommentFormat,
    ) -> Option<VirtualSpan> {
        let snapshot = edit.snapshot().clone();

        let mut span = trim_span(&snapshot, span);
        if span.is_empty() {
            span = expand_to_line_content(&snapshot, &span);
        }

        let start_len = token_len(format.start_text());
        let end_len = token_len(format.end_text());
        let start = span.start.position;
        let end = span.end.position;

        let start_line = snapshot.line_from_offset(start);
        let end_line = snapshot.line_from_offset(end);
        let fits = start - start_line.start() + start_len <= start_line.len()
            && end - end_line.start() >= end_len
            && start + start_len <= end - end_len;
        if !fits {
            return None;
        }

        if !snapshot.matches_at(start, format.start_text())
            || !snapshot.matches_at(end - end_len, format.end_text())
        {
            return None;
        }

        tracing::trace!(
            start,
            end,
            token = format.start_text(),
            "removing block comment"
        );
        edit.delete(end - end_len, end_len);
        edit.delete(start, start_len);
        Some(span)
    }
}

impl Commenter for FormatCommenter {
    fn comment_spans<H: TextHost + ?Sized>(
        &self,
        host: &mut H,
        spans: &[VirtualSpan],
    ) -> Result<Vec<VirtualSpan>, CommentError> {
        self.run_batch(host, spans, "comment", Self::comment_span)
    }

    fn uncomment_spans<H: TextHost + ?Sized>(
        &self,
        host: &mut H,
        spans: &[VirtualSpan],
    ) -> Result<Vec<VirtualSpan>, CommentError> {
        self.run_batch(host, spans, "uncomment", Self::uncomment_span)
    }
}

fn token_len(token: &str) -> usize {
    token.chars().count()
}

/// Only whitespace precedes the span on its first line, and only whitespace precedes or
/// follows its end on the last line.
fn covers_whole_lines(snapshot: &Snapshot, span: &VirtualSpan) -> bool {
    let start_line = snapshot.line_from_offset(span.start.position);
    let end_line = snapshot.line_from_offset(span.end.position);
    let start_column = span.start.position - start_line.start();
    let end_column = span.end.position - end_line.start();

    start_line.is_whitespace_between(0, start_column)
        && (end_line.is_whitespace_between(0, end_column)
            || end_line.is_whitespace_between(end_column, end_line.len()))
}

/// Drop the last line from a multi-line span ending exactly at that line's start.
///
/// Dragging through a line break selects up to the start of the next line, which the user
/// does not consider selected.
fn shrink_to_selected_lines(snapshot: &Snapshot, span: &VirtualSpan) -> VirtualSpan {
    let start_line = snapshot.line_from_offset(span.start.position);
    let end_line = snapshot.line_from_offset(span.end.position);

    if end_line.number() > start_line.number() && span.end.position == end_line.start() {
        let end = VirtualPoint::new(snapshot.line(end_line.number() - 1).start());
        let start = span.start.min(end);
        return VirtualSpan::new(span.version, start, end);
    }
    *span
}

/// Widen a caret to its line's content: first non-whitespace character through the line end,
/// or through the caret itself when it sits in virtual space.
fn expand_to_line_content(snapshot: &Snapshot, span: &VirtualSpan) -> VirtualSpan {
    let line = snapshot.line_from_offset(span.start.position);
    let start = VirtualPoint::new(line.start() + line.first_non_whitespace());
    let end = if span.is_in_virtual_space() {
        span.end
    } else {
        VirtualPoint::new(snapshot.line_from_offset(span.end.position).end())
    };
    VirtualSpan::new(span.version, start, end)
}

/// Strip leading and trailing whitespace from `span`.
///
/// A span holding only whitespace collapses to a caret at its start.
pub fn trim_span(snapshot: &Snapshot, span: &VirtualSpan) -> VirtualSpan {
    let text = span.text(snapshot);
    let len = text.chars().count();
    let leading = text.chars().take_while(|c| c.is_whitespace()).count();

    if leading == len {
        return if len == 0 {
            *span
        } else {
            VirtualSpan::caret(span.version, span.start)
        };
    }

    let trailing = text.chars().rev().take_while(|c| c.is_whitespace()).count();
    let start = if leading > 0 {
        VirtualPoint::new(span.start.position + leading)
    } else {
        span.start
    };
    let end = if trailing > 0 {
        VirtualPoint::new(span.end.position - trailing)
    } else {
        span.end
    };
    VirtualSpan::new(span.version, start, end)
}
