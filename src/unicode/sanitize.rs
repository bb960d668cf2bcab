//! Input sanitizing for text typed or pasted into a textarea.

/// Default replacement for a tab rune.
pub const DEFAULT_TAB_REPLACEMENT: &str = "    ";

/// Cleans runes coming from key input, pastes and programmatic values.
///
/// Control characters and the Unicode replacement character are dropped,
/// line breaks (`\r\n`, `\r`, `\n`) are normalized to the newline
/// replacement and tabs are expanded to the tab replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sanitizer {
    newline: String,
    tab: String,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self {
            newline: "\n".to_string(),
            tab: DEFAULT_TAB_REPLACEMENT.to_string(),
        }
    }
}

impl Sanitizer {
    /// Create a sanitizer with the default replacements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace tabs with `replacement`.
    #[must_use]
    pub fn with_tab_replacement(mut self, replacement: &str) -> Self {
        self.tab = replacement.to_string();
        self
    }

    /// Replace line breaks with `replacement`.
    #[must_use]
    pub fn with_newline_replacement(mut self, replacement: &str) -> Self {
        self.newline = replacement.to_string();
        self
    }

    /// Sanitize `input`.
    #[must_use]
    pub fn sanitize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\u{FFFD}' => {}
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    out.push_str(&self.newline);
                }
                '\n' => out.push_str(&self.newline),
                '\t' => out.push_str(&self.tab),
                c if c.is_control() => {}
                c => out.push(c),
            }
        }
        out
    }
}
