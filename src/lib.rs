//! `textarea_core` - the model behind a terminal multi-line text input
//!
//! Holds the value as lines of runes, soft-wraps them to a column width
//! using Unicode display widths, tracks a cursor that moves over wrapped
//! rows, and enforces limits on every edit. Rendering is plain text; the
//! host owns the terminal.
//!
//! # Examples
//!
//! ```
//! use textarea_core::{EditBuffer, WidthMethod};
//!
//! let mut editor = EditBuffer::with_text("foo bar baz");
//! editor.set_width_method(WidthMethod::WcWidth);
//! editor.set_wrap_width(5);
//! assert_eq!(editor.layout().total_rows(), 3);
//!
//! editor.move_to_begin();
//! editor.move_down();
//! assert_eq!(editor.line_info().row_offset, 1);
//! ```

// Crate-level lint configuration
#![allow(dead_code)] // Public API functions not yet used internally
#![allow(clippy::cast_possible_truncation)] // Intentional size casts
#![allow(clippy::module_name_repetitions)] // Allow text::TextBuffer etc
#![allow(clippy::struct_excessive_bools)] // Options need multiple flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::branches_sharing_code)] // Code clarity over DRY in branching
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod error;
pub mod event;
pub mod input;
pub mod text;
pub mod textarea;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Rejection, Result};
pub use event::{
    LogLevel, clear_event_callback, clear_log_callback, emit_event, emit_log, set_event_callback,
    set_log_callback,
};

// Re-export input types
pub use input::{Event, KeyCode, KeyEvent, KeyModifiers, PasteEvent, ResizeEvent};

// Re-export commonly used types
pub use text::{Cursor, EditBuffer, EditPolicy, Layout, LineInfo, TextBuffer, WrapSegment};
pub use textarea::{Action, KeyMap, Outcome, ScrollInfo, Textarea, TextareaOptions, VisibleRow};
pub use unicode::{Sanitizer, WidthMethod, set_width_method};
