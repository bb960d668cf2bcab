//! Line store for the textarea.
//!
//! This module provides [`TextBuffer`], an ordered list of logical lines,
//! each an ordered list of runes. Line breaks are never stored inside a
//! line; they are the boundaries between entries. For editing with a
//! cursor and edit policy, see [`EditBuffer`](super::EditBuffer).

use crate::error::{Error, Result};
use crate::unicode::{WidthMethod, width_method};
use std::fmt;

/// Saved lines, restored when an edit is reverted.
///
/// A snapshot covers a run of lines. Restoring it replaces whatever an edit
/// confined to that run left in its place, including lines the edit split
/// off or joined away.
#[derive(Clone, Debug)]
pub struct Snapshot {
    first: usize,
    lines: Vec<Vec<char>>,
    total: usize,
}

/// Ordered sequence of logical lines.
///
/// Every mutation bumps [`revision`](Self::revision), which layout caches
/// use to notice that previously computed wrap segments are stale. The
/// revision never goes backwards, not even when a snapshot is restored.
#[derive(Clone, Debug)]
pub struct TextBuffer {
    lines: Vec<Vec<char>>,
    width_method: WidthMethod,
    revision: u64,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create a buffer holding a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            width_method: width_method(),
            revision: 0,
        }
    }

    /// Create a buffer from text, splitting on `\n`.
    ///
    /// The text is expected to be sanitized already (no `\r`, no control
    /// characters).
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            lines: split_lines(text),
            width_method: width_method(),
            revision: 0,
        }
    }

    /// Replace the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.lines = split_lines(text);
        self.bump();
    }

    /// Width method used for layout of this buffer.
    #[must_use]
    pub fn width_method(&self) -> WidthMethod {
        self.width_method
    }

    /// Set the width method used for layout of this buffer.
    pub fn set_width_method(&mut self, method: WidthMethod) {
        self.width_method = method;
        self.bump();
    }

    /// Monotonic mutation counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of logical lines (always at least 1).
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    /// Total rune count, counting each line break as one rune.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.lines.iter().map(Vec::len).sum::<usize>() + self.lines.len() - 1
    }

    /// Whether the buffer holds a single empty line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Runes of a line.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&[char]> {
        self.lines.get(line).map(Vec::as_slice)
    }

    /// Rune length of a line.
    pub fn line_len(&self, line: usize) -> Result<usize> {
        self.checked_line(line).map(<[char]>::len)
    }

    /// Iterate over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &[char]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Insert runes before `offset`. The runes must not contain `\n`.
    pub fn insert(&mut self, line: usize, offset: usize, runes: &[char]) -> Result<()> {
        self.check_offset(line, offset)?;
        self.lines[line].splice(offset..offset, runes.iter().copied());
        self.bump();
        Ok(())
    }

    /// Remove runes in `[start, end)`; a no-op when `start == end`.
    pub fn delete_range(&mut self, line: usize, start: usize, end: usize) -> Result<Vec<char>> {
        self.check_offset(line, end)?;
        if start > end {
            return Err(Error::OutOfRange {
                line,
                offset: start,
                len: end,
            });
        }
        if start == end {
            return Ok(Vec::new());
        }
        let removed = self.lines[line].drain(start..end).collect();
        self.bump();
        Ok(removed)
    }

    /// Replace runes in `[start, end)` with `runes`.
    pub fn replace_range(
        &mut self,
        line: usize,
        start: usize,
        end: usize,
        runes: &[char],
    ) -> Result<()> {
        self.check_offset(line, end)?;
        if start > end {
            return Err(Error::OutOfRange {
                line,
                offset: start,
                len: end,
            });
        }
        self.lines[line].splice(start..end, runes.iter().copied());
        self.bump();
        Ok(())
    }

    /// Break `line` at `offset`; the tail becomes a new line right after it.
    pub fn split_line(&mut self, line: usize, offset: usize) -> Result<()> {
        self.check_offset(line, offset)?;
        let tail = self.lines[line].split_off(offset);
        self.lines.insert(line + 1, tail);
        self.bump();
        Ok(())
    }

    /// Merge `line` with the line that follows it.
    pub fn join_line(&mut self, line: usize) -> Result<()> {
        if line + 1 >= self.lines.len() {
            return Err(Error::LineOutOfRange {
                line: line + 1,
                lines: self.lines.len(),
            });
        }
        let next = self.lines.remove(line + 1);
        self.lines[line].extend(next);
        self.bump();
        Ok(())
    }

    /// Capture the whole content.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_lines(0, self.lines.len().saturating_sub(1))
    }

    /// Capture lines `first..=last`; indices past the end are ignored.
    #[must_use]
    pub fn snapshot_lines(&self, first: usize, last: usize) -> Snapshot {
        let total = self.lines.len();
        let first = first.min(total);
        let end = last.saturating_add(1).clamp(first, total);
        Snapshot {
            first,
            lines: self.lines[first..end].to_vec(),
            total,
        }
    }

    /// Restore content captured by [`snapshot`](Self::snapshot) or
    /// [`snapshot_lines`](Self::snapshot_lines).
    ///
    /// Only edits confined to the captured lines can be undone this way.
    pub fn restore(&mut self, snapshot: Snapshot) {
        let now = self.lines.len();
        let start = snapshot.first.min(now);
        // The captured run grew or shrank by the change in line count.
        let end = (snapshot.first + snapshot.lines.len() + now)
            .saturating_sub(snapshot.total)
            .clamp(start, now);
        self.lines.splice(start..end, snapshot.lines);
        self.bump();
    }

    fn checked_line(&self, line: usize) -> Result<&[char]> {
        self.lines
            .get(line)
            .map(Vec::as_slice)
            .ok_or(Error::LineOutOfRange {
                line,
                lines: self.lines.len(),
            })
    }

    fn check_offset(&self, line: usize, offset: usize) -> Result<()> {
        let len = self.checked_line(line)?.len();
        if offset > len {
            return Err(Error::OutOfRange { line, offset, len });
        }
        Ok(())
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &c in line {
                fmt::Write::write_char(f, c)?;
            }
        }
        Ok(())
    }
}

fn split_lines(text: &str) -> Vec<Vec<char>> {
    text.split('\n').map(|l| l.chars().collect()).collect()
}
