//! Keyboard event types.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
        /// Super/Meta/Windows key (not widely supported).
        const SUPER = 0b0000_1000;
    }
}

/// A key the textarea can react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    Delete,
    /// A character key, space included.
    Char(char),
    Esc,
}

impl KeyCode {
    /// The character of a character key.
    #[must_use]
    pub fn char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backspace => f.write_str("backspace"),
            Self::Enter => f.write_str("enter"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Home => f.write_str("home"),
            Self::End => f.write_str("end"),
            Self::PageUp => f.write_str("pgup"),
            Self::PageDown => f.write_str("pgdown"),
            Self::Tab => f.write_str("tab"),
            Self::Delete => f.write_str("delete"),
            Self::Char(' ') => f.write_str("space"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Esc => f.write_str("esc"),
        }
    }
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys held.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a new key event.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key event with no modifiers.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a character key event.
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Create a Ctrl+key event.
    #[must_use]
    pub const fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    /// Create an Alt+key event.
    #[must_use]
    pub const fn with_alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    fn has(&self, modifier: KeyModifiers) -> bool {
        self.modifiers.contains(modifier)
    }

    /// The character this key types, if it types one.
    ///
    /// Shift is allowed (it is already folded into the character); Ctrl,
    /// Alt and Super are not.
    #[must_use]
    pub fn typed_char(&self) -> Option<char> {
        let chord = KeyModifiers::CTRL | KeyModifiers::ALT | KeyModifiers::SUPER;
        if self.modifiers.intersects(chord) {
            return None;
        }
        self.code.char().filter(|c| !c.is_control())
    }

    /// This event with Shift dropped from character keys.
    ///
    /// Terminals report `Shift+a` as `A`, sometimes with the flag and
    /// sometimes without; bindings are looked up without it.
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.code.char().is_some() {
            Self::new(self.code, self.modifiers - KeyModifiers::SHIFT)
        } else {
            *self
        }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefixes = [
            (KeyModifiers::CTRL, "ctrl+"),
            (KeyModifiers::ALT, "alt+"),
            (KeyModifiers::SUPER, "super+"),
            (KeyModifiers::SHIFT, "shift+"),
        ];
        for (modifier, prefix) in prefixes {
            if self.has(modifier) {
                f.write_str(prefix)?;
            }
        }
        write!(f, "{}", self.code)
    }
}
