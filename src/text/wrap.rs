//! Soft wrapping of logical lines into visual rows.
//!
//! Wrapping is greedy and width-aware: clusters are packed left to right
//! and a row is closed after the last whitespace that keeps it within the
//! target width. A word longer than the width is broken at the width
//! boundary instead. Clusters are never split between rows.
//!
//! Two details keep every cursor position on a cell of its own:
//!
//! - Whitespace that would overflow a row starts the next row, so the
//!   boundary before it is never pushed past the width.
//! - A line whose last row fills the width exactly gets one extra empty
//!   row, which holds the append position.

use crate::text::TextBuffer;
use crate::unicode::{Cluster, WidthMethod, clusters};

/// One visual row of a logical line.
///
/// Segments are derived from the buffer and a target width; they are never
/// stored in the buffer and must be recomputed after any edit or resize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WrapSegment {
    /// Logical line index.
    pub line: usize,
    /// Rune offset where the row starts.
    pub start: usize,
    /// Rune offset one past the row end.
    pub end: usize,
    /// Display width of the row, trailing whitespace included.
    pub width: usize,
}

impl WrapSegment {
    /// Number of runes in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the row holds no runes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Wrap one line of runes at `width` columns.
#[must_use]
pub fn wrap_line(line: usize, runes: &[char], width: usize, method: WidthMethod) -> Vec<WrapSegment> {
    wrap_clusters(line, &clusters(runes, method), width)
}

/// Wrap a line already split into clusters.
///
/// Always returns at least one segment; segments are contiguous and cover
/// the whole line.
#[must_use]
pub fn wrap_clusters(line: usize, clusters: &[Cluster], width: usize) -> Vec<WrapSegment> {
    let width = width.max(1);
    let line_len = clusters.last().map_or(0, Cluster::end);
    let mut segments = Vec::new();

    let mut seg_start = 0usize;
    let mut seg_first = 0usize;
    let mut seg_width = 0usize;
    // (cluster index right after a whitespace cluster, row width up to it)
    let mut last_break: Option<(usize, usize)> = None;

    let mut i = 0usize;
    while i < clusters.len() {
        let cluster = clusters[i];
        if seg_width + cluster.width > width && i > seg_first {
            // Overflowing whitespace opens the next row instead.
            let soft = if cluster.is_space {
                None
            } else {
                last_break.take()
            };
            if let Some((brk, brk_width)) = soft {
                let end = clusters[brk].start;
                segments.push(WrapSegment {
                    line,
                    start: seg_start,
                    end,
                    width: brk_width,
                });
                seg_start = end;
                seg_first = brk;
                seg_width -= brk_width;
                continue;
            }

            segments.push(WrapSegment {
                line,
                start: seg_start,
                end: cluster.start,
                width: seg_width,
            });
            seg_start = cluster.start;
            seg_first = i;
            seg_width = 0;
            last_break = None;
            continue;
        }

        seg_width += cluster.width;
        i += 1;
        if cluster.is_space {
            last_break = Some((i, seg_width));
        }
    }

    segments.push(WrapSegment {
        line,
        start: seg_start,
        end: line_len,
        width: seg_width,
    });
    if seg_width >= width && seg_start < line_len {
        segments.push(WrapSegment {
            line,
            start: line_len,
            end: line_len,
            width: 0,
        });
    }
    segments
}

/// Index of the row holding rune `offset`.
///
/// An offset equal to the end of a row that is followed by another row
/// belongs to the following row; the end of the line belongs to the last.
#[must_use]
pub fn row_of_offset(segments: &[WrapSegment], offset: usize) -> usize {
    segments
        .iter()
        .position(|s| offset < s.end)
        .unwrap_or_else(|| segments.len().saturating_sub(1))
}

/// Wrapped rows of a whole buffer at one width.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    lines: Vec<Vec<WrapSegment>>,
    first_rows: Vec<usize>,
    total_rows: usize,
}

impl Layout {
    /// Wrap every line of `buffer` at `width`.
    #[must_use]
    pub fn new(buffer: &TextBuffer, width: usize) -> Self {
        let method = buffer.width_method();
        let lines: Vec<Vec<WrapSegment>> = buffer
            .lines()
            .enumerate()
            .map(|(idx, runes)| wrap_line(idx, runes, width, method))
            .collect();

        let mut first_rows = Vec::with_capacity(lines.len());
        let mut total_rows = 0;
        for segs in &lines {
            first_rows.push(total_rows);
            total_rows += segs.len();
        }

        Self {
            width: width.max(1),
            lines,
            first_rows,
            total_rows,
        }
    }

    /// Target width the layout was computed for.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of visual rows.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Number of logical lines.
    #[must_use]
    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    /// Rows of one logical line.
    #[must_use]
    pub fn line_segments(&self, line: usize) -> &[WrapSegment] {
        self.lines.get(line).map_or(&[], Vec::as_slice)
    }

    /// Global row index of the first row of `line`.
    #[must_use]
    pub fn first_row_of_line(&self, line: usize) -> usize {
        self.first_rows
            .get(line)
            .copied()
            .unwrap_or(self.total_rows)
    }

    /// Iterate over all rows in document order.
    pub fn rows(&self) -> impl Iterator<Item = &WrapSegment> {
        self.lines.iter().flatten()
    }

    /// Widest row in the layout.
    #[must_use]
    pub fn max_width(&self) -> usize {
        self.rows().map(|s| s.width).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str, width: usize) -> Vec<String> {
        let runes: Vec<char> = text.chars().collect();
        wrap_line(0, &runes, width, WidthMethod::WcWidth)
            .iter()
            .map(|s| runes[s.start..s.end].iter().collect())
            .collect()
    }

    #[test]
    fn test_empty_line_has_one_row() {
        let segs = wrap_line(3, &[], 10, WidthMethod::WcWidth);
        assert_eq!(
            segs,
            vec![WrapSegment {
                line: 3,
                start: 0,
                end: 0,
                width: 0
            }]
        );
    }

    #[test]
    fn test_short_line_single_row() {
        assert_eq!(wrap("hello", 10), vec!["hello"]);
    }

    #[test]
    fn test_word_wrap_at_last_space() {
        assert_eq!(wrap("foo bar baz", 5), vec!["foo ", "bar ", "baz"]);
        assert_eq!(
            wrap("This is a really long line that should wrap", 20),
            vec!["This is a really ", "long line that ", "should wrap"]
        );
    }

    #[test]
    fn test_hard_wrap_long_word() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("a bcdefg", 5), vec!["a ", "bcdef", "g"]);
    }

    #[test]
    fn test_overflowing_whitespace_starts_next_row() {
        assert_eq!(wrap("foo   bar", 3), vec!["foo", "   ", "bar", ""]);
        assert_eq!(wrap("abc d", 3), vec!["abc", " d"]);
        assert_eq!(wrap("one two three", 7), vec!["one two", " three"]);

        let runes: Vec<char> = "abc d".chars().collect();
        let segs = wrap_line(0, &runes, 3, WidthMethod::WcWidth);
        assert_eq!(row_of_offset(&segs, 3), 1);
        assert!(segs.iter().all(|s| s.width <= 3));
    }

    #[test]
    fn test_exact_fill_adds_append_row() {
        let segs = wrap_line(0, &['a', 'b', 'c'], 3, WidthMethod::WcWidth);
        assert_eq!(segs.len(), 2);
        assert!(segs[1].is_empty());
        assert_eq!(segs[1].start, 3);
    }

    #[test]
    fn test_wide_runes_never_split() {
        // Four double-width runes at width 5: two per row.
        assert_eq!(wrap("你好你好", 5), vec!["你好", "你好"]);
        let runes: Vec<char> = "你好你好".chars().collect();
        let segs = wrap_line(0, &runes, 5, WidthMethod::WcWidth);
        assert!(segs.iter().all(|s| s.width <= 5));
    }

    #[test]
    fn test_cluster_wider_than_width_stands_alone() {
        let segs = wrap_line(0, &['你', 'a'], 1, WidthMethod::WcWidth);
        assert_eq!(segs[0].end, 1);
        assert_eq!(segs[0].width, 2);
        assert_eq!(segs[1].start, 1);
    }

    #[test]
    fn test_combining_cluster_kept_together() {
        let runes: Vec<char> = "abe\u{0301}d".chars().collect();
        let segs = wrap_line(0, &runes, 3, WidthMethod::WcWidth);
        assert_eq!(segs[0].end, 4);
        assert_eq!(segs[1].start, 4);
    }

    #[test]
    fn test_row_of_offset() {
        let runes: Vec<char> = "foo bar baz".chars().collect();
        let segs = wrap_line(0, &runes, 5, WidthMethod::WcWidth);
        assert_eq!(row_of_offset(&segs, 0), 0);
        assert_eq!(row_of_offset(&segs, 3), 0);
        assert_eq!(row_of_offset(&segs, 4), 1);
        assert_eq!(row_of_offset(&segs, 11), 2);
    }

    #[test]
    fn test_layout_rows() {
        let buf = TextBuffer::with_text("foo bar baz\n\nhi");
        let layout = Layout::new(&buf, 5);
        assert_eq!(layout.total_rows(), 5);
        assert_eq!(layout.first_row_of_line(1), 3);
        assert_eq!(layout.first_row_of_line(2), 4);
        assert_eq!(layout.line_segments(0).len(), 3);
        assert_eq!(layout.max_width(), 4);
        assert!(layout.line_segments(9).is_empty());
    }
}
