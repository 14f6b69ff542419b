//! Edit batches.
//!
//! A [`TextEdit`] queues insertions and deletions against the offsets of one base
//! [`Snapshot`]. Nothing happens until the batch is handed to a host
//! ([`crate::TextHost::apply`]), which applies every operation atomically and records the
//! result as a [`TextDelta`]. Operations never need to account for offset shifts caused by
//! earlier operations in the same batch.

use std::collections::BTreeSet;

use crate::delta::{TextChange, TextDelta};
use crate::error::EditError;
use crate::snapshot::Snapshot;
use crate::span::Version;

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditOp {
    Insert { offset: usize, text: String },
    Delete { offset: usize, len: usize },
}

impl EditOp {
    fn offset(&self) -> usize {
        match self {
            Self::Insert { offset, .. } | Self::Delete { offset, .. } => *offset,
        }
    }
}

/// A batch of text operations against one base snapshot.
#[derive(Debug, Clone)]
pub struct TextEdit {
    snapshot: Snapshot,
    ops: Vec<EditOp>,
    claimed_lines: BTreeSet<usize>,
}

impl TextEdit {
    /// Start an empty batch against `snapshot`.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            ops: Vec::new(),
            claimed_lines: BTreeSet::new(),
        }
    }

    /// The base snapshot all offsets refer to.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Version of the base snapshot.
    pub fn version(&self) -> Version {
        self.snapshot.version()
    }

    /// Queue an insertion of `text` at base offset `offset`.
    ///
    /// Insertions at the same offset keep their queue order.
    pub fn insert(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        self.ops.push(EditOp::Insert {
            offset,
            text: text.to_string(),
        });
    }

    /// Queue a deletion of `len` characters at base offset `offset`.
    pub fn delete(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.ops.push(EditOp::Delete { offset, len });
    }

    /// Mark base line `line_number` as edited by a line-level operation.
    ///
    /// Returns `false` if the line was already claimed in this batch. Spans sharing a line
    /// use this to add or remove its line comment token only once.
    pub fn claim_line(&mut self, line_number: usize) -> bool {
        self.claimed_lines.insert(line_number)
    }

    /// Returns `true` if no operations are queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Resolve the queued operations into a sorted, non-overlapping delta.
    pub fn to_delta(&self) -> Result<TextDelta, EditError> {
        let len = self.snapshot.len_chars();

        let mut ops: Vec<&EditOp> = self.ops.iter().collect();
        // Stable: operations at the same offset keep their queue order.
        ops.sort_by_key(|op| op.offset());

        let mut changes: Vec<TextChange> = Vec::with_capacity(ops.len());
        for op in ops {
            let (start, end) = match op {
                EditOp::Insert { offset, .. } => (*offset, *offset),
                EditOp::Delete { offset, len } => (*offset, offset + len),
            };
            if end > len {
                return Err(EditError::OutOfBounds { start, end, len });
            }

            if let Some(last) = changes.last_mut() {
                if start == last.old_start {
                    match op {
                        EditOp::Insert { text, .. } => {
                            last.new_text.push_str(text);
                            continue;
                        }
                        EditOp::Delete { len, .. } if last.is_insertion() => {
                            last.old_len = *len;
                            continue;
                        }
                        EditOp::Delete { .. } => return Err(EditError::Overlap(start)),
                    }
                }
                if start < last.old_end() {
                    return Err(EditError::Overlap(start));
                }
            }

            changes.push(match op {
                EditOp::Insert { offset, text } => TextChange {
                    old_start: *offset,
                    old_len: 0,
                    new_text: text.clone(),
                },
                EditOp::Delete { offset, len } => TextChange {
                    old_start: *offset,
                    old_len: *len,
                    new_text: String::new(),
                },
            });
        }

        let after_char_count = changes
            .iter()
            .fold(len as isize, |acc, change| acc + change.delta()) as usize;

        Ok(TextDelta {
            before_char_count: len,
            after_char_count,
            changes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(text: &str) -> TextEdit {
        TextEdit::new(Snapshot::from_text(text))
    }

    #[test]
    fn test_empty_batch() {
        let batch = edit("abc");
        assert!(batch.is_empty());
        let delta = batch.to_delta().unwrap();
        assert!(delta.is_empty());
        assert_eq!(delta.after_char_count, 3);
    }

    #[test]
    fn test_ops_are_sorted_by_offset() {
        let mut batch = edit("    Initial text");
        batch.insert(16, "*/");
        batch.insert(4, "/*");

        let delta = batch.to_delta().unwrap();
        let starts: Vec<usize> = delta.changes.iter().map(|c| c.old_start).collect();
        assert_eq!(starts, vec![4, 16]);
        assert_eq!(delta.after_char_count, 20);
    }

    #[test]
    fn test_same_offset_inserts_keep_queue_order() {
        let mut batch = edit("");
        batch.insert(0, "/*");
        batch.insert(0, "*/");

        let delta = batch.to_delta().unwrap();
        assert_eq!(delta.changes.len(), 1);
        assert_eq!(delta.changes[0].new_text, "/**/");
    }

    #[test]
    fn test_delete_order_does_not_matter() {
        let mut batch = edit("/*foo*/");
        batch.delete(5, 2);
        batch.delete(0, 2);

        let delta = batch.to_delta().unwrap();
        assert_eq!(delta.changes.len(), 2);
        assert_eq!(delta.after_char_count, 3);
    }

    #[test]
    fn test_overlapping_deletes_rejected() {
        let mut batch = edit("abcdef");
        batch.delete(1, 3);
        batch.delete(2, 2);
        assert_eq!(batch.to_delta(), Err(EditError::Overlap(2)));

        let mut batch = edit("abcdef");
        batch.delete(1, 3);
        batch.insert(2, "x");
        assert_eq!(batch.to_delta(), Err(EditError::Overlap(2)));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut batch = edit("abc");
        batch.delete(2, 5);
        assert_eq!(
            batch.to_delta(),
            Err(EditError::OutOfBounds {
                start: 2,
                end: 7,
                len: 3
            })
        );
    }

    #[test]
    fn test_claim_line_once() {
        let mut batch = edit("a\nb");
        assert!(batch.claim_line(1));
        assert!(!batch.claim_line(1));
        assert!(batch.claim_line(0));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_insert_then_delete_at_same_offset_becomes_replacement() {
        let mut batch = edit("abcdef");
        batch.insert(2, "XY");
        batch.delete(2, 2);

        let delta = batch.to_delta().unwrap();
        assert_eq!(
            delta.changes,
            vec![TextChange {
                old_start: 2,
                old_len: 2,
                new_text: "XY".to_string(),
            }]
        );
    }
}
