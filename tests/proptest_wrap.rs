//! Property-based tests for soft wrapping and cursor movement.
//!
//! Uses proptest to check invariants that must hold for any line content
//! and any target width.

use proptest::prelude::*;
use textarea_core::EditBuffer;
use textarea_core::text::{EditPolicy, wrap_line};
use textarea_core::unicode::{WidthMethod, clusters};

// ============================================================================
// Strategies
// ============================================================================

/// Printable text mixing ASCII, spaces, CJK, combining marks and emoji.
fn line_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "a", "b", "z", " ", "  ", "中", "文", "é", "e\u{0301}", "🧋", "👨‍👩‍👧", "-", ".",
        ]),
        0..60,
    )
    .prop_map(|parts| parts.concat())
}

/// Multi-line text built from `line_text` pieces.
fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(line_text(), 1..5).prop_map(|lines| lines.join("\n"))
}

fn runes(s: &str) -> Vec<char> {
    s.chars().collect()
}

// ============================================================================
// Wrap Properties
// ============================================================================

proptest! {
    /// Wrapping the same line at the same width twice gives the same rows.
    #[test]
    fn wrap_is_idempotent(s in line_text(), width in 1usize..30) {
        let line = runes(&s);
        let first = wrap_line(0, &line, width, WidthMethod::WcWidth);
        let second = wrap_line(0, &line, width, WidthMethod::WcWidth);
        prop_assert_eq!(first, second);
    }

    /// Rows are contiguous and cover the whole line.
    #[test]
    fn wrap_covers_line(s in line_text(), width in 1usize..30) {
        let line = runes(&s);
        let segs = wrap_line(0, &line, width, WidthMethod::WcWidth);
        prop_assert!(!segs.is_empty());
        prop_assert_eq!(segs[0].start, 0);
        prop_assert_eq!(segs[segs.len() - 1].end, line.len());
        for pair in segs.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }

    /// No row is wider than the target, unless it holds a cluster that is
    /// wider than the target by itself.
    #[test]
    fn wrap_respects_width(s in line_text(), width in 1usize..30) {
        let line = runes(&s);
        let cl = clusters(&line, WidthMethod::WcWidth);
        for seg in wrap_line(0, &line, width, WidthMethod::WcWidth) {
            let oversized = cl
                .iter()
                .any(|c| c.start >= seg.start && c.end() <= seg.end && c.width > width);
            prop_assert!(
                seg.width <= width || oversized,
                "row {:?} wider than {}", seg, width
            );
        }
    }

    /// Row boundaries never fall inside a cluster.
    #[test]
    fn wrap_keeps_clusters_whole(s in line_text(), width in 1usize..30) {
        let line = runes(&s);
        let cl = clusters(&line, WidthMethod::WcWidth);
        for seg in wrap_line(0, &line, width, WidthMethod::WcWidth) {
            prop_assert!(
                seg.start == line.len() || cl.iter().any(|c| c.start == seg.start),
                "row starts inside a cluster: {:?}", seg
            );
        }
    }
}

// ============================================================================
// Buffer Properties
// ============================================================================

proptest! {
    /// `set_value` then `value` returns the input unchanged.
    #[test]
    fn value_round_trips(s in document()) {
        let mut editor = EditBuffer::new().with_policy(EditPolicy::unrestricted());
        editor.set_value(&s);
        prop_assert_eq!(editor.value(), s);
    }

    /// Repeated `move_right` from the start reaches the document end within
    /// `len_chars` steps and then stops.
    #[test]
    fn move_right_reaches_end(s in document(), width in 1usize..30) {
        let mut editor = EditBuffer::with_text(&s);
        editor.set_width_method(WidthMethod::WcWidth);
        editor.set_wrap_width(width);
        let end = editor.cursor();

        editor.move_to_begin();
        for _ in 0..editor.len_chars() {
            editor.move_right();
        }
        prop_assert_eq!(editor.cursor(), end);
        prop_assert!(!editor.move_right());
    }

    /// Walking right puts every cursor position on a cell of its own,
    /// inside the wrap width.
    #[test]
    fn move_right_visits_distinct_cells(s in document(), width in 1usize..30) {
        let mut editor = EditBuffer::with_text(&s);
        editor.set_width_method(WidthMethod::WcWidth);
        editor.set_wrap_width(width);
        editor.move_to_begin();

        let mut previous: Option<(usize, usize)> = None;
        loop {
            let cell = (editor.cursor_row(), editor.line_info().column_offset);
            prop_assert!(cell.1 < width, "cursor {:?} at column {}", editor.cursor(), cell.1);
            if let Some(prev) = previous {
                prop_assert!(cell > prev, "cell {:?} repeats or precedes {:?}", cell, prev);
            }
            previous = Some(cell);
            if !editor.move_right() {
                break;
            }
        }
    }

    /// Vertical moves keep the cursor on a valid cluster boundary.
    #[test]
    fn vertical_moves_land_on_boundaries(
        s in document(),
        width in 1usize..30,
        moves in prop::collection::vec(any::<bool>(), 0..20),
    ) {
        let mut editor = EditBuffer::with_text(&s);
        editor.set_width_method(WidthMethod::WcWidth);
        editor.set_wrap_width(width);
        editor.move_to_begin();
        for down in moves {
            if down {
                editor.move_down();
            } else {
                editor.move_up();
            }
            let cursor = editor.cursor();
            let line = editor.buffer().line(cursor.line).unwrap_or(&[]);
            let cl = clusters(line, WidthMethod::WcWidth);
            prop_assert!(
                cursor.offset == 0 || cl.iter().any(|c| c.end() == cursor.offset),
                "cursor {:?} inside a cluster", cursor
            );
            prop_assert!(editor.line_info().column_offset <= width.max(2));
        }
    }
}
