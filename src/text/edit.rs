//! Editable text buffer with cursor, wrapping and edit limits.
//!
//! This module provides [`EditBuffer`], which wraps a [`TextBuffer`] with
//! a cursor, a remembered column for vertical navigation, a wrap width and
//! an [`EditPolicy`]. Every mutation either applies in full or is rejected
//! and leaves the buffer untouched.
//!
//! # Examples
//!
//! ```
//! use textarea_core::EditBuffer;
//!
//! let mut buf = EditBuffer::with_text("Hello World");
//!
//! // The cursor starts at the document end.
//! buf.delete_backward().unwrap();
//! assert_eq!(buf.value(), "Hello Worl");
//!
//! buf.move_to_line_start();
//! buf.insert_str("Oh, ").unwrap();
//! assert_eq!(buf.value(), "Oh, Hello Worl");
//! ```

use std::cell::{Ref, RefCell};

use crate::error::{Error, Rejection, Result};
use crate::event::{LogLevel, emit_log};
use crate::text::cursor::{Cursor, LineInfo, landing_offset};
use crate::text::policy::EditPolicy;
use crate::text::wrap::{Layout, wrap_line};
use crate::text::{Snapshot, TextBuffer};
use crate::unicode::{
    Sanitizer, WidthMethod, boundaries, ceil_boundary, clusters, floor_boundary, next_boundary,
    prev_boundary,
};

/// Wrap width used until the host sets one.
pub const DEFAULT_WRAP_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LayoutKey {
    revision: u64,
    width: usize,
    width_method: WidthMethod,
}

#[derive(Debug, Default)]
struct LayoutCache {
    key: Option<LayoutKey>,
    layout: Layout,
}

/// Text buffer with cursor, soft wrapping and edit limits.
#[derive(Debug)]
pub struct EditBuffer {
    buffer: TextBuffer,
    cursor: Cursor,
    remembered_column: Option<usize>,
    wrap_width: usize,
    policy: EditPolicy,
    sanitizer: Sanitizer,
    layout: RefCell<LayoutCache>,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EditBuffer {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            cursor: self.cursor,
            remembered_column: self.remembered_column,
            wrap_width: self.wrap_width,
            policy: self.policy,
            sanitizer: self.sanitizer.clone(),
            layout: RefCell::default(),
        }
    }
}

impl EditBuffer {
    /// Create an empty buffer with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            cursor: Cursor::default(),
            remembered_column: None,
            wrap_width: DEFAULT_WRAP_WIDTH,
            policy: EditPolicy::default(),
            sanitizer: Sanitizer::default(),
            layout: RefCell::default(),
        }
    }

    /// Create a buffer holding `text`, cursor at the end.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.set_value(text);
        buf
    }

    /// Replace the edit policy (builder style).
    #[must_use]
    pub fn with_policy(mut self, policy: EditPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Get the underlying line store.
    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Current edit policy.
    #[must_use]
    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Replace the edit policy. Existing content is not re-validated.
    pub fn set_policy(&mut self, policy: EditPolicy) {
        self.policy = policy;
    }

    /// Replace the input sanitizer.
    pub fn set_sanitizer(&mut self, sanitizer: Sanitizer) {
        self.sanitizer = sanitizer;
    }

    /// Width used for soft wrapping.
    #[must_use]
    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// Set the width used for soft wrapping (at least 1).
    pub fn set_wrap_width(&mut self, width: usize) {
        self.wrap_width = width.max(1);
    }

    /// Set the width method used to measure clusters.
    pub fn set_width_method(&mut self, method: WidthMethod) {
        self.buffer.set_width_method(method);
    }

    /// Whole content with line breaks between lines.
    #[must_use]
    pub fn value(&self) -> String {
        self.buffer.to_string()
    }

    /// Replace the whole content and put the cursor at the document end.
    ///
    /// The text is sanitized but not checked against the edit policy.
    pub fn set_value(&mut self, text: &str) {
        let text = self.sanitizer.sanitize(text);
        self.buffer.set_text(&text);
        self.remembered_column = None;
        self.move_to_end();
    }

    /// Empty the buffer and put the cursor at the origin.
    pub fn reset(&mut self) {
        self.buffer.set_text("");
        self.cursor = Cursor::default();
        self.remembered_column = None;
    }

    /// Total rune count, line breaks included.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// Number of logical lines.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Whether the buffer holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Cursor position.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Column remembered by a run of vertical moves, if any.
    #[must_use]
    pub fn remembered_column(&self) -> Option<usize> {
        self.remembered_column
    }

    /// Wrapped rows of the whole buffer at the current width.
    ///
    /// The layout is cached and rebuilt when the content, width or width
    /// method changed since the last call.
    pub fn layout(&self) -> Ref<'_, Layout> {
        let key = LayoutKey {
            revision: self.buffer.revision(),
            width: self.wrap_width,
            width_method: self.buffer.width_method(),
        };
        let stale = self.layout.borrow().key != Some(key);
        if stale {
            let layout = Layout::new(&self.buffer, self.wrap_width);
            *self.layout.borrow_mut() = LayoutCache {
                key: Some(key),
                layout,
            };
        }
        Ref::map(self.layout.borrow(), |cache| &cache.layout)
    }

    /// Where the cursor sits within the wrapped rows of its line.
    #[must_use]
    pub fn line_info(&self) -> LineInfo {
        let line = self.cursor.line;
        let cl = clusters(self.line_runes(line), self.buffer.width_method());
        let layout = self.layout();
        LineInfo::compute(&cl, layout.line_segments(line), self.cursor.offset)
    }

    /// Global visual row of the cursor.
    #[must_use]
    pub fn cursor_row(&self) -> usize {
        let info = self.line_info();
        self.layout().first_row_of_line(self.cursor.line) + info.row_offset
    }

    // ---------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------

    /// Move one cluster left, onto the end of the previous line at a line start.
    pub fn move_left(&mut self) -> bool {
        self.remembered_column = None;
        let Cursor { line, offset } = self.cursor;
        if offset > 0 {
            self.cursor.offset = prev_boundary(self.line_runes(line), offset);
            true
        } else if line > 0 {
            self.cursor = Cursor::new(line - 1, self.line_len(line - 1));
            true
        } else {
            false
        }
    }

    /// Move one cluster right, onto the start of the next line at a line end.
    pub fn move_right(&mut self) -> bool {
        self.remembered_column = None;
        let Cursor { line, offset } = self.cursor;
        let runes = self.line_runes(line);
        if offset < runes.len() {
            self.cursor.offset = next_boundary(runes, offset);
            true
        } else if line + 1 < self.buffer.len_lines() {
            self.cursor = Cursor::new(line + 1, 0);
            true
        } else {
            false
        }
    }

    /// Move one visual row up, keeping the remembered column.
    pub fn move_up(&mut self) -> bool {
        self.move_vertical(false)
    }

    /// Move one visual row down, keeping the remembered column.
    pub fn move_down(&mut self) -> bool {
        self.move_vertical(true)
    }

    /// Move to the start of the previous word, crossing lines.
    pub fn move_word_left(&mut self) -> bool {
        self.remembered_column = None;
        let target = self.word_left_target();
        self.move_to(target)
    }

    /// Move past the end of the next word, crossing lines.
    pub fn move_word_right(&mut self) -> bool {
        self.remembered_column = None;
        let start = self.skip_whitespace_forward(self.cursor);
        let end = self.word_end(start);
        self.move_to(Cursor::new(start.line, end))
    }

    /// Move to the start of the logical line.
    pub fn move_to_line_start(&mut self) -> bool {
        self.remembered_column = None;
        self.move_to(Cursor::new(self.cursor.line, 0))
    }

    /// Move to the end of the logical line.
    pub fn move_to_line_end(&mut self) -> bool {
        self.remembered_column = None;
        let line = self.cursor.line;
        self.move_to(Cursor::new(line, self.line_len(line)))
    }

    /// Move to the start of the document.
    pub fn move_to_begin(&mut self) -> bool {
        self.remembered_column = None;
        self.move_to(Cursor::default())
    }

    /// Move to the end of the document.
    pub fn move_to_end(&mut self) -> bool {
        self.remembered_column = None;
        let line = self.buffer.len_lines() - 1;
        self.move_to(Cursor::new(line, self.line_len(line)))
    }

    /// Put the cursor at `offset` on the current line, clamped to the line.
    pub fn set_cursor(&mut self, offset: usize) -> bool {
        self.remembered_column = None;
        let line = self.cursor.line;
        let offset = floor_boundary(self.line_runes(line), offset);
        self.move_to(Cursor::new(line, offset))
    }

    // ---------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------

    /// Insert one character at the cursor.
    pub fn insert_char(&mut self, c: char) -> Result<()> {
        let mut utf8 = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut utf8))
    }

    /// Insert text at the cursor, splitting it into lines on `\n`.
    ///
    /// The text is sanitized first. Either all of it is inserted or none.
    pub fn insert_str(&mut self, text: &str) -> Result<()> {
        let text = self.sanitizer.sanitize(text);
        if text.is_empty() {
            return Ok(());
        }
        let breaks = text.matches('\n').count();
        self.check_growth(text.chars().count(), breaks)?;

        let first = self.cursor.line;
        self.edit(first, first, |ed| {
            let Cursor {
                mut line,
                mut offset,
            } = ed.cursor;
            for (i, piece) in text.split('\n').enumerate() {
                if i > 0 {
                    ed.buffer.split_line(line, offset)?;
                    line += 1;
                    offset = 0;
                }
                let runes: Vec<char> = piece.chars().collect();
                ed.buffer.insert(line, offset, &runes)?;
                offset += runes.len();
            }
            ed.cursor = Cursor::new(line, offset);
            Ok(line)
        })
    }

    /// Break the line at the cursor.
    pub fn insert_newline(&mut self) -> Result<()> {
        self.check_growth(1, 1)?;
        let line = self.cursor.line;
        self.edit(line, line, |ed| {
            ed.buffer.split_line(line, ed.cursor.offset)?;
            ed.cursor = Cursor::new(line + 1, 0);
            Ok(line + 1)
        })
    }

    /// Delete the cluster before the cursor, joining lines at a line start.
    pub fn delete_backward(&mut self) -> Result<()> {
        let Cursor { line, offset } = self.cursor;
        if offset == 0 {
            return self.join_with_previous();
        }
        let start = prev_boundary(self.line_runes(line), offset);
        self.delete_in_line(line, start, offset)
    }

    /// Delete the cluster under the cursor, joining lines at a line end.
    pub fn delete_forward(&mut self) -> Result<()> {
        let Cursor { line, offset } = self.cursor;
        let runes = self.line_runes(line);
        if offset >= runes.len() {
            return self.join_with_next();
        }
        let end = next_boundary(runes, offset);
        self.delete_in_line(line, offset, end)
    }

    /// Delete the word left of the cursor.
    pub fn delete_word_backward(&mut self) -> Result<()> {
        let Cursor { line, offset } = self.cursor;
        if offset == 0 {
            return self.join_with_previous();
        }
        let runes = self.line_runes(line);
        let mut start = offset;
        while start > 0 && runes[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !runes[start - 1].is_whitespace() {
            start -= 1;
        }
        let start = floor_boundary(runes, start);
        self.delete_in_line(line, start, offset)
    }

    /// Delete the word right of the cursor.
    pub fn delete_word_forward(&mut self) -> Result<()> {
        let Cursor { line, offset } = self.cursor;
        let runes = self.line_runes(line);
        if offset >= runes.len() {
            return self.join_with_next();
        }
        let mut end = offset;
        while end < runes.len() && runes[end].is_whitespace() {
            end += 1;
        }
        while end < runes.len() && !runes[end].is_whitespace() {
            end += 1;
        }
        let end = ceil_boundary(runes, end);
        self.delete_in_line(line, offset, end)
    }

    /// Delete from the line start to the cursor.
    pub fn delete_before_cursor(&mut self) -> Result<()> {
        let Cursor { line, offset } = self.cursor;
        if offset == 0 {
            return self.join_with_previous();
        }
        self.delete_in_line(line, 0, offset)
    }

    /// Delete from the cursor to the line end.
    pub fn delete_after_cursor(&mut self) -> Result<()> {
        let Cursor { line, offset } = self.cursor;
        let len = self.line_len(line);
        if offset >= len {
            return self.join_with_next();
        }
        self.delete_in_line(line, offset, len)
    }

    /// Uppercase the word right of the cursor and move past it.
    pub fn uppercase_word_forward(&mut self) -> Result<()> {
        self.transform_word_forward(|_, c| single(c.to_uppercase(), c))
    }

    /// Lowercase the word right of the cursor and move past it.
    pub fn lowercase_word_forward(&mut self) -> Result<()> {
        self.transform_word_forward(|_, c| single(c.to_lowercase(), c))
    }

    /// Uppercase the first rune of the word right of the cursor and move past it.
    pub fn capitalize_word_forward(&mut self) -> Result<()> {
        self.transform_word_forward(|i, c| {
            if i == 0 {
                single(c.to_uppercase(), c)
            } else {
                c
            }
        })
    }

    /// Swap the cluster before the cursor with the one under it.
    ///
    /// At the line end the last two clusters are swapped and the cursor
    /// stays at the end.
    pub fn transpose_backward(&mut self) -> Result<()> {
        let Cursor { line, offset } = self.cursor;
        let runes = self.line_runes(line);
        if offset == 0 || boundaries(runes).len() < 3 {
            return Ok(());
        }
        let mid = if offset >= runes.len() {
            prev_boundary(runes, runes.len())
        } else {
            offset
        };
        let start = prev_boundary(runes, mid);
        let end = next_boundary(runes, mid);
        let mut swapped = runes[mid..end].to_vec();
        swapped.extend_from_slice(&runes[start..mid]);

        self.edit(line, line, |ed| {
            ed.buffer.replace_range(line, start, end, &swapped)?;
            ed.cursor.offset = end;
            Ok(line)
        })
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    fn line_runes(&self, line: usize) -> &[char] {
        self.buffer.line(line).unwrap_or(&[])
    }

    fn line_len(&self, line: usize) -> usize {
        self.line_runes(line).len()
    }

    fn move_to(&mut self, target: Cursor) -> bool {
        let moved = self.cursor != target;
        self.cursor = target;
        moved
    }

    fn move_vertical(&mut self, down: bool) -> bool {
        let line = self.cursor.line;
        let info = self.line_info();
        let dest = if down {
            if !info.is_last_row() {
                Some((line, info.row_offset + 1))
            } else if line + 1 < self.buffer.len_lines() {
                Some((line + 1, 0))
            } else {
                None
            }
        } else if info.row_offset > 0 {
            Some((line, info.row_offset - 1))
        } else if line > 0 {
            Some((line - 1, usize::MAX))
        } else {
            None
        };
        let Some((dest_line, dest_row)) = dest else {
            return false;
        };

        let target = *self.remembered_column.get_or_insert(info.char_offset);
        let offset = {
            let layout = self.layout();
            let segs = layout.line_segments(dest_line);
            let row = dest_row.min(segs.len().saturating_sub(1));
            let Some(seg) = segs.get(row) else {
                return false;
            };
            let cl = clusters(self.line_runes(dest_line), self.buffer.width_method());
            landing_offset(&cl, seg, row + 1 == segs.len(), target)
        };
        self.cursor = Cursor::new(dest_line, offset);
        true
    }

    fn word_left_target(&self) -> Cursor {
        let Cursor {
            mut line,
            mut offset,
        } = self.cursor;
        loop {
            if offset == 0 {
                if line == 0 {
                    break;
                }
                line -= 1;
                offset = self.line_len(line);
                continue;
            }
            if self.line_runes(line)[offset - 1].is_whitespace() {
                offset -= 1;
            } else {
                break;
            }
        }
        let runes = self.line_runes(line);
        while offset > 0 && !runes[offset - 1].is_whitespace() {
            offset -= 1;
        }
        Cursor::new(line, floor_boundary(runes, offset))
    }

    fn skip_whitespace_forward(&self, from: Cursor) -> Cursor {
        let Cursor {
            mut line,
            mut offset,
        } = from;
        let last = self.buffer.len_lines() - 1;
        loop {
            match self.line_runes(line).get(offset) {
                Some(c) if c.is_whitespace() => offset += 1,
                Some(_) => break,
                None if line < last => {
                    line += 1;
                    offset = 0;
                }
                None => break,
            }
        }
        Cursor::new(line, offset)
    }

    fn word_end(&self, from: Cursor) -> usize {
        let runes = self.line_runes(from.line);
        let mut end = from.offset;
        while runes.get(end).is_some_and(|c| !c.is_whitespace()) {
            end += 1;
        }
        ceil_boundary(runes, end)
    }

    fn transform_word_forward<F>(&mut self, map: F) -> Result<()>
    where
        F: Fn(usize, char) -> char,
    {
        let start = self.skip_whitespace_forward(self.cursor);
        let end = self.word_end(start);
        let line = start.line;
        let runes = self.line_runes(line);
        let word: Vec<char> = runes[start.offset..end]
            .iter()
            .enumerate()
            .map(|(i, &c)| map(i, c))
            .collect();

        if word.as_slice() == &runes[start.offset..end] {
            self.remembered_column = None;
            self.move_to(Cursor::new(line, end));
            return Ok(());
        }

        self.edit(line, line, |ed| {
            ed.buffer.replace_range(line, start.offset, end, &word)?;
            ed.cursor = Cursor::new(line, end);
            Ok(line)
        })
    }

    fn delete_in_line(&mut self, line: usize, start: usize, end: usize) -> Result<()> {
        self.edit(line, line, |ed| {
            ed.buffer.delete_range(line, start, end)?;
            ed.cursor = Cursor::new(line, start);
            Ok(line)
        })
    }

    fn join_with_previous(&mut self) -> Result<()> {
        let line = self.cursor.line;
        if line == 0 {
            return Ok(());
        }
        let prev_len = self.line_len(line - 1);
        self.edit(line - 1, line, |ed| {
            ed.buffer.join_line(line - 1)?;
            ed.cursor = Cursor::new(line - 1, prev_len);
            Ok(line - 1)
        })
    }

    fn join_with_next(&mut self) -> Result<()> {
        let line = self.cursor.line;
        if line + 1 >= self.buffer.len_lines() {
            return Ok(());
        }
        self.edit(line, line + 1, |ed| {
            ed.buffer.join_line(line)?;
            Ok(line)
        })
    }

    fn check_growth(&self, runes: usize, line_breaks: usize) -> Result<()> {
        self.policy
            .check_chars(self.buffer.len_chars(), runes)
            .and_then(|()| {
                self.policy
                    .check_lines(self.buffer.len_lines() + line_breaks)
            })
            .map_err(rejected)
    }

    /// Run a mutation covering lines `first..=last` and apply the overflow
    /// guard to the lines it leaves behind.
    ///
    /// The closure may only touch those lines and the lines it splits off
    /// them. It returns the last line it touched. On any failure, including
    /// one halfway through the closure, the lines and the cursor are put
    /// back as they were.
    fn edit<F>(&mut self, first: usize, last: usize, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<usize>,
    {
        let before = self.cursor;
        let snapshot = self.buffer.snapshot_lines(first, last);
        let rows_before = self.policy.row_budget.map(|_| self.max_rows(first, last));

        let outcome = mutate(self).and_then(|last_after| {
            let Cursor { line, offset } = self.cursor;
            self.cursor.offset = ceil_boundary(self.line_runes(line), offset);
            match rows_before {
                Some(rows_before) => {
                    let rows_after = self.max_rows(first, last_after);
                    self.policy
                        .check_rows(rows_before, rows_after)
                        .map_err(rejected)
                }
                None => Ok(()),
            }
        });

        match outcome {
            Ok(()) => {
                self.remembered_column = None;
                Ok(())
            }
            Err(err) => {
                self.restore(snapshot, before);
                Err(err)
            }
        }
    }

    fn restore(&mut self, snapshot: Snapshot, cursor: Cursor) {
        self.buffer.restore(snapshot);
        self.cursor = cursor;
    }

    fn max_rows(&self, first: usize, last: usize) -> usize {
        let method = self.buffer.width_method();
        (first..=last)
            .filter_map(|line| {
                self.buffer
                    .line(line)
                    .map(|runes| wrap_line(line, runes, self.wrap_width, method).len())
            })
            .max()
            .unwrap_or(1)
    }
}

fn rejected(reason: Rejection) -> Error {
    emit_log(LogLevel::Debug, &format!("edit rejected: {reason}"));
    Error::Rejected(reason)
}

/// The single-rune result of a case mapping, or `original` if it expands.
fn single(mut mapped: impl Iterator<Item = char>, original: char) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => c,
        _ => original,
    }
}
