//! Logical Line Index
//!
//! Provides line lookup over a Rope, supporting O(log N) access by line number or character
//! offset. All offsets are character offsets (Unicode scalar values).

use ropey::{Rope, RopeSlice};

/// Number of trailing line-break characters at the end of `line`.
///
/// Recognises the same breaks as ropey: `\r\n`, `\n`, lone `\r` and the Unicode separators.
pub(crate) fn line_break_len(line: RopeSlice<'_>) -> usize {
    let len = line.len_chars();
    if len == 0 {
        return 0;
    }

    match line.char(len - 1) {
        '\n' if len >= 2 && line.char(len - 2) == '\r' => 2,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => 1,
        _ => 0,
    }
}

/// Logical line index - implemented using Rope data structure
///
/// Cloning is O(1): clones share the underlying tree, so an index can back an immutable
/// snapshot while edits build a new one.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count (an empty document has 1 line)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Character offset of the first character of `line_number` (clamped to the last line).
    pub fn line_start(&self, line_number: usize) -> usize {
        let line_number = line_number.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line_number)
    }

    /// Character offset just past the last character of `line_number`, excluding its line break.
    pub fn line_end(&self, line_number: usize) -> usize {
        let line_number = line_number.min(self.line_count().saturating_sub(1));
        let line = self.rope.line(line_number);
        self.rope.line_to_char(line_number) + line.len_chars() - line_break_len(line)
    }

    /// Character offset just past the line break of `line_number`.
    pub fn line_end_including_break(&self, line_number: usize) -> usize {
        let line_number = line_number.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line_number) + self.rope.line(line_number).len_chars()
    }

    /// Line number containing `char_offset` (clamped to the document end).
    pub fn line_of_offset(&self, char_offset: usize) -> usize {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.char_to_line(char_offset)
    }

    /// Borrow `start..end` (character offsets, clamped) as a rope slice.
    pub fn slice(&self, start: usize, end: usize) -> RopeSlice<'_> {
        let end = end.min(self.rope.len_chars());
        let start = start.min(end);
        self.rope.slice(start..end)
    }

    /// Returns `true` if the text at `char_offset` starts with `token` (exact `char` comparison).
    pub fn matches_at(&self, char_offset: usize, token: &str) -> bool {
        let token_len = token.chars().count();
        if char_offset + token_len > self.rope.len_chars() {
            return false;
        }
        self.rope
            .slice(char_offset..char_offset + token_len)
            .chars()
            .eq(token.chars())
    }

    /// Insert text (at specified character offset)
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete text range (character offset)
    pub fn delete(&mut self, start_char: usize, len_chars: usize) {
        let start_char = start_char.min(self.rope.len_chars());
        let end_char = (start_char + len_chars).min(self.rope.len_chars());

        if start_char < end_char {
            self.rope.remove(start_char..end_char);
        }
    }

    /// Get complete text
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }
}
