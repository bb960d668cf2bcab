//! Cursor position and its projection onto wrapped rows.

use crate::text::wrap::{WrapSegment, row_of_offset};
use crate::unicode::Cluster;

/// Logical cursor position.
///
/// `offset` is a rune index into the line, always on a cluster boundary
/// and never past the line end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cursor {
    /// Logical line index.
    pub line: usize,
    /// Rune offset within the line.
    pub offset: usize,
}

impl Cursor {
    #[must_use]
    pub const fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }
}

/// Where the cursor sits within the wrapped rows of its line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineInfo {
    /// Index of the cursor's row within the logical line.
    pub row_offset: usize,
    /// Number of rows the logical line wraps into.
    pub height: usize,
    /// Rune offset where the cursor's row starts.
    pub start_offset: usize,
    /// Display width of the cursor's row.
    pub width: usize,
    /// Number of runes on the cursor's row.
    pub rune_count: usize,
    /// Terminal columns before the cursor on its row.
    pub column_offset: usize,
    /// Width-weighted character position of the cursor on its row.
    ///
    /// Each cluster counts its display width, so this matches
    /// `column_offset`. Vertical movement uses it as the target column.
    pub char_offset: usize,
    /// Runes before the cursor on its row.
    pub rune_offset: usize,
}

impl LineInfo {
    /// Project `offset` onto the wrapped rows of one line.
    #[must_use]
    pub fn compute(clusters: &[Cluster], segments: &[WrapSegment], offset: usize) -> Self {
        let row = row_of_offset(segments, offset);
        let Some(seg) = segments.get(row) else {
            return Self {
                height: 1,
                ..Self::default()
            };
        };

        let column: usize = clusters
            .iter()
            .filter(|c| c.start >= seg.start && c.end() <= offset)
            .map(|c| c.width)
            .sum();

        Self {
            row_offset: row,
            height: segments.len(),
            start_offset: seg.start,
            width: seg.width,
            rune_count: seg.len(),
            column_offset: column,
            char_offset: column,
            rune_offset: offset.saturating_sub(seg.start),
        }
    }

    /// Whether the cursor is on the first row of its line.
    #[must_use]
    pub fn is_first_row(&self) -> bool {
        self.row_offset == 0
    }

    /// Whether the cursor is on the last row of its line.
    #[must_use]
    pub fn is_last_row(&self) -> bool {
        self.row_offset + 1 >= self.height
    }
}

/// Offset on `segment` closest to display column `target`.
///
/// Ties go to the right. On a row that is followed by another row of the
/// same line the landing stops before the row's last cluster, since the
/// boundary after it already belongs to the next row.
#[must_use]
pub fn landing_offset(
    clusters: &[Cluster],
    segment: &WrapSegment,
    is_last_row: bool,
    target: usize,
) -> usize {
    let row_clusters: Vec<&Cluster> = clusters
        .iter()
        .filter(|c| c.start >= segment.start && c.end() <= segment.end)
        .collect();
    let limit = if is_last_row {
        row_clusters.len()
    } else {
        row_clusters.len().saturating_sub(1)
    };

    let mut column = 0usize;
    let mut offset = segment.start;
    for c in &row_clusters[..limit] {
        if column >= target || c.width > 2 * (target - column) {
            break;
        }
        column += c.width;
        offset = c.end();
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::wrap::wrap_clusters;
    use crate::unicode::{WidthMethod, clusters};

    fn layout(text: &str, width: usize) -> (Vec<Cluster>, Vec<WrapSegment>) {
        let runes: Vec<char> = text.chars().collect();
        let cl = clusters(&runes, WidthMethod::WcWidth);
        let segs = wrap_clusters(0, &cl, width);
        (cl, segs)
    }

    #[test]
    fn test_line_info_double_width() {
        let (cl, segs) = layout("你好你好", 20);
        let info = LineInfo::compute(&cl, &segs, 2);
        assert_eq!(info.column_offset, 4);
        assert_eq!(info.char_offset, 4);
        assert_eq!(info.rune_offset, 2);
        assert_eq!(info.height, 1);
        assert_eq!(info.width, 8);
        assert_eq!(info.rune_count, 4);
    }

    #[test]
    fn test_line_info_emoji() {
        let (cl, segs) = layout("🧋🧋🧋", 20);
        let info = LineInfo::compute(&cl, &segs, 3);
        assert_eq!(info.char_offset, 6);
        assert_eq!(info.column_offset, 6);
    }

    #[test]
    fn test_line_info_wrapped_rows() {
        let (cl, segs) = layout("foo bar baz", 5);
        let info = LineInfo::compute(&cl, &segs, 11);
        assert_eq!(info.row_offset, 2);
        assert_eq!(info.height, 3);
        assert_eq!(info.start_offset, 8);
        assert_eq!(info.column_offset, 3);
        assert!(info.is_last_row());

        let info = LineInfo::compute(&cl, &segs, 4);
        assert_eq!(info.row_offset, 1);
        assert_eq!(info.column_offset, 0);
        assert!(!info.is_first_row());
    }

    #[test]
    fn test_landing_closest_column() {
        let (cl, segs) = layout("Hello", 20);
        assert_eq!(landing_offset(&cl, &segs[0], true, 4), 4);
        assert_eq!(landing_offset(&cl, &segs[0], true, 20), 5);
        assert_eq!(landing_offset(&cl, &segs[0], true, 0), 0);
    }

    #[test]
    fn test_landing_wide_ties_right() {
        let (cl, segs) = layout("你好", 20);
        // Column 1 is halfway through the first cell pair.
        assert_eq!(landing_offset(&cl, &segs[0], true, 1), 1);
        assert_eq!(landing_offset(&cl, &segs[0], true, 3), 2);
        assert_eq!(landing_offset(&cl, &segs[0], true, 4), 2);
    }

    #[test]
    fn test_landing_stays_on_wrapped_row() {
        let (cl, segs) = layout("foo bar baz", 5);
        // Row "foo " is followed by another row; the last boundary is off-limits.
        assert_eq!(landing_offset(&cl, &segs[0], false, 10), 3);
        assert_eq!(landing_offset(&cl, &segs[2], true, 10), 11);
    }

    #[test]
    fn test_landing_on_rows_split_at_whitespace() {
        let (cl, segs) = layout("foo   bar", 3);
        // "foo" | "   " | "bar" | ""
        assert_eq!(landing_offset(&cl, &segs[0], false, 5), 2);
        assert_eq!(landing_offset(&cl, &segs[1], false, 1), 4);
        assert_eq!(landing_offset(&cl, &segs[2], false, 5), 8);
        assert_eq!(landing_offset(&cl, &segs[3], true, 5), 9);
    }

    #[test]
    fn test_line_info_columns_stay_inside_width() {
        let (cl, segs) = layout("foo   bar", 3);
        let cells: Vec<(usize, usize)> = (0..=9)
            .map(|offset| {
                let info = LineInfo::compute(&cl, &segs, offset);
                assert!(info.column_offset < 3, "offset {offset}: {info:?}");
                (info.row_offset, info.column_offset)
            })
            .collect();
        let mut unique = cells.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), cells.len());
    }
}
