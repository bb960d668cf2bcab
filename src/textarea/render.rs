//! Plain-text rendering of the textarea viewport.
//!
//! Styling is left to the host: the view is a block of rows made of the
//! prompt, the line-number gutter and the row text padded to the width.

use crate::text::WrapSegment;
use crate::textarea::Textarea;
use crate::unicode::{WidthMethod, clustered_width, graphemes};

const ELLIPSIS: &str = "...";

/// One wrapped row inside the viewport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleRow {
    /// Logical line the row belongs to.
    pub line: usize,
    /// Row bounds within the line.
    pub segment: WrapSegment,
    /// Row text, including the whitespace a soft break leaves at its end.
    pub text: String,
    /// Whether this is the first row of its line.
    pub is_first_row: bool,
    /// Whether the cursor is on this row.
    pub is_cursor_row: bool,
}

impl Textarea {
    /// Rows of the viewport window, top to bottom.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let editor = self.editor();
        let cursor_row = editor.cursor_row();
        let layout = editor.layout();

        let mut rows = Vec::with_capacity(self.height());
        for (row, seg) in layout
            .rows()
            .enumerate()
            .skip(self.scroll_y)
            .take(self.height())
        {
            let runes = editor.buffer().line(seg.line).unwrap_or(&[]);
            rows.push(VisibleRow {
                line: seg.line,
                segment: *seg,
                text: runes.get(seg.start..seg.end).unwrap_or(&[]).iter().collect(),
                is_first_row: seg.start == 0,
                is_cursor_row: row == cursor_row,
            });
        }
        rows
    }

    /// The viewport as plain text, one line per row.
    ///
    /// Every row is the prompt, the gutter (when line numbers are shown)
    /// and the text padded to the width. Rows past the end of the value
    /// show the end-of-buffer character. An empty value with a placeholder
    /// renders the placeholder instead.
    #[must_use]
    pub fn view(&self) -> String {
        if self.editor().is_empty() && !self.options().placeholder.is_empty() {
            return self.placeholder_view();
        }

        let width = self.width();
        let mut out = Vec::with_capacity(self.height());
        for row in self.visible_rows() {
            let number = if row.is_first_row {
                (row.line + 1).to_string()
            } else {
                String::new()
            };
            out.push(self.render_row(&number, &row.text, width));
        }
        while out.len() < self.height() {
            out.push(self.render_end_of_buffer(width));
        }
        out.join("\n")
    }

    /// Cursor cell as `(column, row)` relative to the view's top-left.
    ///
    /// `None` when the host scrolled the cursor out of the viewport.
    #[must_use]
    pub fn cursor_position(&self) -> Option<(usize, usize)> {
        let row = self.editor().cursor_row();
        let offset = self.scroll_y;
        if row < offset || row >= offset + self.height() {
            return None;
        }
        let column = self
            .editor()
            .line_info()
            .column_offset
            .min(self.width().saturating_sub(1));
        let left = self.prompt_width() + self.options().gutter_width();
        Some((left + column, row - offset))
    }

    fn placeholder_view(&self) -> String {
        let width = self.width();
        let mut out = Vec::with_capacity(self.height());
        for (i, line) in self
            .options()
            .placeholder
            .split('\n')
            .take(self.height())
            .enumerate()
        {
            let number = if i == 0 { "1" } else { "" };
            let text = truncate(line, width, ELLIPSIS, self.width_method());
            out.push(self.render_row(number, &text, width));
        }
        while out.len() < self.height() {
            out.push(self.render_end_of_buffer(width));
        }
        out.join("\n")
    }

    fn render_row(&self, number: &str, text: &str, width: usize) -> String {
        let mut row = self.options().prompt.clone();
        if self.options().show_line_numbers {
            let digits = self.options().gutter_digits();
            row.push_str(&format!("{number:>digits$} "));
        }
        row.push_str(text);
        let used = clustered_width(text, self.width_method());
        row.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
        row
    }

    fn width_method(&self) -> WidthMethod {
        self.editor().buffer().width_method()
    }

    fn render_end_of_buffer(&self, width: usize) -> String {
        let eob = self.options().end_of_buffer.to_string();
        if self.options().show_line_numbers {
            self.render_row(&eob, "", width)
        } else {
            self.render_row("", &eob, width)
        }
    }
}

/// Cut `s` to `width` columns, ending with `tail` when cut.
fn truncate(s: &str, width: usize, tail: &str, method: WidthMethod) -> String {
    if clustered_width(s, method) <= width {
        return s.to_string();
    }
    let budget = width.saturating_sub(clustered_width(tail, method));
    let mut out = String::new();
    let mut used = 0;
    for g in graphemes(s) {
        let w = clustered_width(g, method);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textarea::TextareaOptions;

    fn plain(width: usize, height: usize) -> Textarea {
        let mut t = Textarea::new(TextareaOptions {
            width,
            height,
            prompt: String::new(),
            show_line_numbers: false,
            ..TextareaOptions::default()
        });
        t.focus();
        t
    }

    fn trimmed(view: &str) -> Vec<String> {
        view.lines().map(|l| l.trim_end().to_string()).collect()
    }

    #[test]
    fn test_truncate() {
        let m = WidthMethod::WcWidth;
        assert_eq!(truncate("hello", 10, ELLIPSIS, m), "hello");
        assert_eq!(truncate("Hello, World!", 8, ELLIPSIS, m), "Hello...");
        assert_eq!(truncate("你好你好", 6, ELLIPSIS, m), "你...");
    }

    #[test]
    fn test_visible_rows_text() {
        let mut t = plain(5, 5);
        t.set_value("foo bar baz");
        let rows = t.visible_rows();
        let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["foo ", "bar ", "baz"]);
        assert!(rows[0].is_first_row);
        assert!(!rows[1].is_first_row);
        assert!(rows[2].is_cursor_row);

        let mut t = plain(3, 5);
        t.set_value("foo   bar");
        let texts: Vec<String> = t.visible_rows().into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["foo", "   ", "bar", ""]);
    }

    #[test]
    fn test_view_pads_rows() {
        let mut t = plain(6, 2);
        t.set_value("ab");
        let view = t.view();
        assert_eq!(view, "ab    \n~     ");
    }

    #[test]
    fn test_view_with_gutter() {
        let mut t = Textarea::new(TextareaOptions {
            width: 11,
            height: 4,
            prompt: "> ".to_string(),
            ..TextareaOptions::default()
        });
        t.set_value("hello world\nx");
        assert_eq!(
            trimmed(&t.view()),
            vec![">  1 hello", ">    world", ">  2 x", ">  ~"]
        );
    }

    #[test]
    fn test_placeholder_view() {
        let t = Textarea::new(TextareaOptions {
            width: 13,
            height: 2,
            prompt: "> ".to_string(),
            placeholder: "Hello, World!".to_string(),
            ..TextareaOptions::default()
        });
        assert_eq!(trimmed(&t.view()), vec![">  1 Hello...", ">  ~"]);
    }

    #[test]
    fn test_cursor_position() {
        let mut t = Textarea::new(TextareaOptions {
            width: 10,
            height: 2,
            prompt: "> ".to_string(),
            ..TextareaOptions::default()
        });
        t.set_value("ab");
        assert_eq!(t.cursor_position(), Some((7, 0)));

        t.set_value("1\n2\n3");
        assert_eq!(t.cursor_position(), Some((6, 1)));
        t.scroll_up(5);
        assert_eq!(t.cursor_position(), None);
    }
}
