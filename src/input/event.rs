//! Events a host delivers to the textarea.

use crate::input::keyboard::KeyEvent;

/// An input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Bracketed paste; inserted as one edit.
    Paste(PasteEvent),
    /// The host gave the textarea a new outer size.
    Resize(ResizeEvent),
    FocusGained,
    FocusLost,
}

impl Event {
    /// Whether this event carries text input, which a blurred textarea ignores.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Key(_) | Self::Paste(_))
    }
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<PasteEvent> for Event {
    fn from(e: PasteEvent) -> Self {
        Self::Paste(e)
    }
}

impl From<ResizeEvent> for Event {
    fn from(e: ResizeEvent) -> Self {
        Self::Resize(e)
    }
}

/// New outer size of the textarea, in terminal cells.
///
/// The width includes the prompt and line-number gutter; the textarea
/// subtracts them to get the wrap width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    pub width: u16,
    pub height: u16,
}

impl ResizeEvent {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Text pasted in one piece. Line breaks in it split lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasteEvent {
    pub content: String,
}

impl PasteEvent {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
