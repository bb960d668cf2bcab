//! Textarea configuration.

use crate::text::{DEFAULT_CHAR_LIMIT, DEFAULT_MAX_LINES, EditPolicy};
use crate::unicode::{DEFAULT_TAB_REPLACEMENT, Sanitizer, WidthMethod};

/// Narrowest text area, in columns.
pub const MIN_WIDTH: usize = 2;
/// Lowest text area, in rows.
pub const MIN_HEIGHT: usize = 1;
/// Default outer width.
pub const DEFAULT_WIDTH: usize = 40;
/// Default height in rows.
pub const DEFAULT_HEIGHT: usize = 6;
/// Default cap on the text width.
pub const DEFAULT_MAX_WIDTH: usize = 500;

/// Options for creating a [`Textarea`](super::Textarea).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextareaOptions {
    /// Outer width, prompt and line-number gutter included.
    pub width: usize,
    /// Visible rows.
    pub height: usize,
    /// Maximum total runes (line breaks included); `None` for no limit.
    pub char_limit: Option<usize>,
    /// Maximum logical lines; also caps the height.
    pub max_lines: Option<usize>,
    /// Cap on the text width in columns.
    pub max_width: Option<usize>,
    /// Maximum wrapped rows for the line holding the cursor.
    ///
    /// `None` follows the visible height, so a line never wraps past the
    /// viewport. `Some(n)` fixes the budget regardless of resizes.
    pub row_budget: Option<usize>,
    /// Show line numbers in a gutter.
    pub show_line_numbers: bool,
    /// Prefix drawn at the start of every row.
    pub prompt: String,
    /// Text shown while the value is empty.
    pub placeholder: String,
    /// Gutter character for rows past the end of the buffer.
    pub end_of_buffer: char,
    /// Whether Enter and pasted line breaks create new lines.
    pub allow_newlines: bool,
    /// What a typed or pasted tab becomes.
    pub tab_replacement: String,
    /// Width method override; `None` uses the global setting.
    pub width_method: Option<WidthMethod>,
}

impl Default for TextareaOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            char_limit: Some(DEFAULT_CHAR_LIMIT),
            max_lines: Some(DEFAULT_MAX_LINES),
            max_width: Some(DEFAULT_MAX_WIDTH),
            row_budget: None,
            show_line_numbers: true,
            prompt: "┃ ".to_string(),
            placeholder: String::new(),
            end_of_buffer: '~',
            allow_newlines: true,
            tab_replacement: DEFAULT_TAB_REPLACEMENT.to_string(),
            width_method: None,
        }
    }
}

impl TextareaOptions {
    /// Edit limits derived from these options.
    #[must_use]
    pub fn policy(&self) -> EditPolicy {
        EditPolicy {
            char_limit: self.char_limit,
            max_lines: self.max_lines,
            row_budget: Some(self.row_budget.unwrap_or(self.height)),
        }
    }

    /// Input sanitizer derived from these options.
    ///
    /// Line breaks become spaces when newlines are not allowed.
    #[must_use]
    pub fn sanitizer(&self) -> Sanitizer {
        let newline = if self.allow_newlines { "\n" } else { " " };
        Sanitizer::new()
            .with_tab_replacement(&self.tab_replacement)
            .with_newline_replacement(newline)
    }

    /// Digits reserved for line numbers in the gutter (at least two).
    #[must_use]
    pub fn gutter_digits(&self) -> usize {
        let max = self.max_lines.unwrap_or(999);
        (max.max(1).ilog10() as usize + 1).max(2)
    }

    /// Columns taken by the line-number gutter, zero when hidden.
    #[must_use]
    pub fn gutter_width(&self) -> usize {
        if self.show_line_numbers {
            self.gutter_digits() + 1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = TextareaOptions::default();
        assert_eq!(opts.width, 40);
        assert_eq!(opts.height, 6);
        assert_eq!(opts.char_limit, Some(400));
        assert_eq!(opts.max_lines, Some(99));
        assert_eq!(opts.max_width, Some(500));
        assert_eq!(opts.row_budget, None);
        assert!(opts.show_line_numbers);
        assert_eq!(opts.end_of_buffer, '~');
        assert_eq!(opts.tab_replacement, "    ");
    }

    #[test]
    fn test_gutter_digits() {
        let mut opts = TextareaOptions::default();
        assert_eq!(opts.gutter_digits(), 2);
        assert_eq!(opts.gutter_width(), 3);
        opts.max_lines = Some(5);
        assert_eq!(opts.gutter_digits(), 2);
        opts.max_lines = None;
        assert_eq!(opts.gutter_digits(), 3);
        opts.show_line_numbers = false;
        assert_eq!(opts.gutter_width(), 0);
    }

    #[test]
    fn test_single_line_sanitizer() {
        let opts = TextareaOptions {
            allow_newlines: false,
            ..TextareaOptions::default()
        };
        assert_eq!(opts.sanitizer().sanitize("a\nb"), "a b");
    }

    #[test]
    fn test_policy_mirrors_options() {
        let opts = TextareaOptions {
            row_budget: Some(3),
            ..TextareaOptions::default()
        };
        let policy = opts.policy();
        assert_eq!(policy.row_budget, Some(3));
        assert_eq!(policy.char_limit, Some(400));
    }

    #[test]
    fn test_row_budget_defaults_to_height() {
        let mut opts = TextareaOptions::default();
        assert_eq!(opts.policy().row_budget, Some(DEFAULT_HEIGHT));
        opts.height = 2;
        assert_eq!(opts.policy().row_budget, Some(2));
    }
}
