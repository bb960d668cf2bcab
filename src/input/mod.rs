//! Input events consumed by the textarea.
//!
//! The host decodes terminal input into these types; the textarea only
//! interprets them.

mod event;
mod keyboard;

pub use event::{Event, PasteEvent, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
