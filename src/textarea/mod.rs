//! Multi-line text input widget.
//!
//! [`Textarea`] wraps an [`EditBuffer`] with focus, key bindings, sizing
//! and a scrolling viewport. Hosts feed it [`Event`]s and read back its
//! value, its plain-text view and the cursor cell.
//!
//! # Examples
//!
//! ```
//! use textarea_core::{Event, KeyCode, KeyEvent, Outcome, Textarea, TextareaOptions};
//!
//! let mut textarea = Textarea::new(TextareaOptions::default());
//! textarea.focus();
//!
//! for c in "hi".chars() {
//!     textarea.update(&Event::Key(KeyEvent::char(c)));
//! }
//! let outcome = textarea.update(&Event::Key(KeyEvent::key(KeyCode::Enter)));
//! assert_eq!(outcome, Outcome::Edited);
//! assert_eq!(textarea.value(), "hi\n");
//! ```

mod keymap;
mod options;
mod render;

pub use keymap::{Action, KeyMap};
pub use options::{
    DEFAULT_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_WIDTH, MIN_HEIGHT, MIN_WIDTH, TextareaOptions,
};
pub use render::VisibleRow;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Rejection, Result};
use crate::event::{LogLevel, emit_event, emit_log};
use crate::input::Event;
use crate::text::{Cursor, EditBuffer, LineInfo};
use crate::unicode::clustered_width;

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// What an update or action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Unchanged,
    /// The cursor moved; the value is the same.
    Moved,
    /// The value changed.
    Edited,
    /// The edit policy refused the edit; nothing changed.
    Rejected(Rejection),
}

impl Outcome {
    /// Whether the value changed.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edited)
    }
}

/// Scroll state the host uses to draw a scrollbar or decide to scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollInfo {
    /// Wrapped rows of the whole value.
    pub total_rows: usize,
    /// Global row of the cursor.
    pub cursor_row: usize,
    /// First visible row.
    pub offset: usize,
    /// Visible rows.
    pub height: usize,
    /// Whether the content is taller than the viewport.
    pub can_scroll: bool,
}

/// Multi-line text input.
#[derive(Clone, Debug)]
pub struct Textarea {
    id: usize,
    options: TextareaOptions,
    editor: EditBuffer,
    keymap: KeyMap,
    focused: bool,
    height: usize,
    scroll_y: usize,
}

impl Default for Textarea {
    fn default() -> Self {
        Self::new(TextareaOptions::default())
    }
}

impl Textarea {
    /// Create an empty, unfocused textarea.
    #[must_use]
    pub fn new(options: TextareaOptions) -> Self {
        let mut editor = EditBuffer::new().with_policy(options.policy());
        editor.set_sanitizer(options.sanitizer());
        if let Some(method) = options.width_method {
            editor.set_width_method(method);
        }

        let mut textarea = Self {
            id: next_id(),
            editor,
            keymap: KeyMap::default(),
            focused: false,
            height: options.height,
            scroll_y: 0,
            options,
        };
        textarea.set_width(textarea.options.width);
        textarea.set_height(textarea.options.height);
        textarea
    }

    /// Process-unique id of this instance.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &TextareaOptions {
        &self.options
    }

    /// The underlying edit buffer.
    #[must_use]
    pub fn editor(&self) -> &EditBuffer {
        &self.editor
    }

    /// Key bindings.
    #[must_use]
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    /// Mutable key bindings.
    pub fn keymap_mut(&mut self) -> &mut KeyMap {
        &mut self.keymap
    }

    // ---------------------------------------------------------------
    // Focus
    // ---------------------------------------------------------------

    /// Accept key and paste input.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Ignore key and paste input.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Whether the textarea accepts input.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    // ---------------------------------------------------------------
    // Value
    // ---------------------------------------------------------------

    /// The whole value with `\n` between lines.
    #[must_use]
    pub fn value(&self) -> String {
        self.editor.value()
    }

    /// Replace the value; the cursor goes to the end.
    pub fn set_value(&mut self, value: &str) {
        self.editor.set_value(value);
        self.reposition_view();
    }

    /// Insert text at the cursor as if pasted.
    pub fn insert_str(&mut self, text: &str) -> Outcome {
        self.apply(Action::Insert(text.to_string()))
    }

    /// Empty the value and scroll to the top.
    pub fn reset(&mut self) {
        self.editor.reset();
        self.scroll_y = 0;
    }

    /// Total rune count, line breaks included.
    #[must_use]
    pub fn length(&self) -> usize {
        self.editor.len_chars()
    }

    /// Number of logical lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.editor.len_lines()
    }

    /// Cursor position.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.editor.cursor()
    }

    /// Where the cursor sits within its wrapped line.
    #[must_use]
    pub fn line_info(&self) -> LineInfo {
        self.editor.line_info()
    }

    // ---------------------------------------------------------------
    // Limits and decoration
    // ---------------------------------------------------------------

    /// Change the total rune limit.
    pub fn set_char_limit(&mut self, limit: Option<usize>) {
        self.options.char_limit = limit;
        self.editor.set_policy(self.options.policy());
    }

    /// Change the logical line limit; the height is clamped to it.
    pub fn set_max_lines(&mut self, limit: Option<usize>) {
        self.options.max_lines = limit;
        self.editor.set_policy(self.options.policy());
        self.set_width(self.options.width);
        self.set_height(self.height);
    }

    /// Change the overflow guard budget; `None` follows the height.
    pub fn set_row_budget(&mut self, budget: Option<usize>) {
        self.options.row_budget = budget;
        self.editor.set_policy(self.options.policy());
    }

    /// Change the prompt and recompute the text width.
    pub fn set_prompt(&mut self, prompt: &str) {
        self.options.prompt = prompt.to_string();
        self.set_width(self.options.width);
    }

    /// Show or hide line numbers and recompute the text width.
    pub fn set_show_line_numbers(&mut self, show: bool) {
        self.options.show_line_numbers = show;
        self.set_width(self.options.width);
    }

    /// Change the placeholder.
    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.options.placeholder = placeholder.to_string();
    }

    // ---------------------------------------------------------------
    // Sizing and viewport
    // ---------------------------------------------------------------

    /// Set the outer width; prompt and gutter are taken out of it.
    ///
    /// The remaining text width is clamped to `[MIN_WIDTH, max_width]`.
    pub fn set_width(&mut self, width: usize) {
        self.options.width = width;
        let reserved = self.prompt_width() + self.options.gutter_width();
        let max = self.options.max_width.unwrap_or(usize::MAX).max(MIN_WIDTH);
        let text_width = width.saturating_sub(reserved).clamp(MIN_WIDTH, max);
        if text_width != self.editor.wrap_width() {
            emit_log(
                LogLevel::Trace,
                &format!("textarea {} text width {text_width}", self.id),
            );
        }
        self.editor.set_wrap_width(text_width);
        self.reposition_view();
    }

    /// Width of the text area in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.editor.wrap_width()
    }

    /// Set the number of visible rows, clamped to `[MIN_HEIGHT, max_lines]`.
    ///
    /// Unless a fixed row budget was set, the overflow guard follows the
    /// new height.
    pub fn set_height(&mut self, height: usize) {
        let max = self.options.max_lines.unwrap_or(usize::MAX).max(MIN_HEIGHT);
        self.height = height.clamp(MIN_HEIGHT, max);
        self.options.height = self.height;
        self.editor.set_policy(self.options.policy());
        self.reposition_view();
    }

    /// Number of visible rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Scroll the viewport up without moving the cursor.
    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_y = self.scroll_y.saturating_sub(rows);
    }

    /// Scroll the viewport down without moving the cursor.
    pub fn scroll_down(&mut self, rows: usize) {
        let max = self.max_scroll();
        self.scroll_y = (self.scroll_y + rows).min(max);
    }

    /// Scroll state of the viewport.
    #[must_use]
    pub fn scroll_info(&self) -> ScrollInfo {
        let total_rows = self.editor.layout().total_rows();
        ScrollInfo {
            total_rows,
            cursor_row: self.editor.cursor_row(),
            offset: self.scroll_y,
            height: self.height,
            can_scroll: total_rows > self.height,
        }
    }

    // ---------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------

    /// Handle one event.
    ///
    /// Key and paste events are ignored while unfocused. Unbound keys that
    /// type a character insert it.
    pub fn update(&mut self, event: &Event) -> Outcome {
        if event.is_input() && !self.focused {
            return Outcome::Unchanged;
        }
        match event {
            Event::Key(key) => {
                if let Some(action) = self.keymap.action_for(key) {
                    let action = action.clone();
                    return self.apply(action);
                }
                match key.typed_char() {
                    Some(c) => self.apply(Action::InsertChar(c)),
                    None => Outcome::Unchanged,
                }
            }
            Event::Paste(paste) => self.apply(Action::Insert(paste.content.clone())),
            Event::Resize(resize) => {
                self.set_width(usize::from(resize.width));
                self.set_height(usize::from(resize.height));
                Outcome::Unchanged
            }
            Event::FocusGained => {
                self.focus();
                Outcome::Unchanged
            }
            Event::FocusLost => {
                self.blur();
                Outcome::Unchanged
            }
        }
    }

    /// Run one action regardless of focus and keep the cursor in view.
    pub fn apply(&mut self, action: Action) -> Outcome {
        let revision = self.editor.buffer().revision();
        let cursor = self.editor.cursor();

        let result = self.run(action);
        let outcome = match result {
            Ok(()) if self.editor.buffer().revision() != revision => Outcome::Edited,
            Ok(()) if self.editor.cursor() != cursor => Outcome::Moved,
            Ok(()) => Outcome::Unchanged,
            Err(Error::Rejected(reason)) => {
                emit_event("textarea.rejected", &reason.to_string());
                Outcome::Rejected(reason)
            }
            Err(err) => {
                emit_log(LogLevel::Warn, &format!("textarea {}: {err}", self.id));
                Outcome::Unchanged
            }
        };
        self.reposition_view();
        outcome
    }

    fn run(&mut self, action: Action) -> Result<()> {
        let ed = &mut self.editor;
        match action {
            Action::InsertChar(c) => ed.insert_char(c),
            Action::Insert(text) => ed.insert_str(&text),
            Action::Newline if self.options.allow_newlines => ed.insert_newline(),
            Action::Newline => Ok(()),
            Action::DeleteBackward => ed.delete_backward(),
            Action::DeleteForward => ed.delete_forward(),
            Action::DeleteWordBackward => ed.delete_word_backward(),
            Action::DeleteWordForward => ed.delete_word_forward(),
            Action::DeleteBeforeCursor => ed.delete_before_cursor(),
            Action::DeleteAfterCursor => ed.delete_after_cursor(),
            Action::UppercaseWordForward => ed.uppercase_word_forward(),
            Action::LowercaseWordForward => ed.lowercase_word_forward(),
            Action::CapitalizeWordForward => ed.capitalize_word_forward(),
            Action::TransposeBackward => ed.transpose_backward(),
            Action::MoveLeft => {
                ed.move_left();
                Ok(())
            }
            Action::MoveRight => {
                ed.move_right();
                Ok(())
            }
            Action::MoveUp => {
                ed.move_up();
                Ok(())
            }
            Action::MoveDown => {
                ed.move_down();
                Ok(())
            }
            Action::WordLeft => {
                ed.move_word_left();
                Ok(())
            }
            Action::WordRight => {
                ed.move_word_right();
                Ok(())
            }
            Action::LineStart => {
                ed.move_to_line_start();
                Ok(())
            }
            Action::LineEnd => {
                ed.move_to_line_end();
                Ok(())
            }
            Action::InputBegin => {
                ed.move_to_begin();
                Ok(())
            }
            Action::InputEnd => {
                ed.move_to_end();
                Ok(())
            }
        }
    }

    fn prompt_width(&self) -> usize {
        clustered_width(&self.options.prompt, self.editor.buffer().width_method())
    }

    fn max_scroll(&self) -> usize {
        self.editor.layout().total_rows().saturating_sub(self.height)
    }

    /// Clamp the scroll offset and bring the cursor row into view.
    fn reposition_view(&mut self) {
        let row = self.editor.cursor_row();
        self.scroll_y = self.scroll_y.min(self.max_scroll());
        if row < self.scroll_y {
            self.scroll_y = row;
        } else if row >= self.scroll_y + self.height {
            self.scroll_y = row + 1 - self.height;
        }
    }
}
