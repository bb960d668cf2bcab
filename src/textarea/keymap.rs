//! Actions and the key bindings that trigger them.

use std::collections::HashMap;

use crate::input::{KeyCode, KeyEvent};

/// One textarea operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Insert one character at the cursor.
    InsertChar(char),
    /// Insert text at the cursor; line breaks split lines.
    Insert(String),
    /// Break the line at the cursor.
    Newline,
    DeleteBackward,
    DeleteForward,
    DeleteWordBackward,
    DeleteWordForward,
    /// Delete from the line start to the cursor.
    DeleteBeforeCursor,
    /// Delete from the cursor to the line end.
    DeleteAfterCursor,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    /// Jump to the start of the document.
    InputBegin,
    /// Jump to the end of the document.
    InputEnd,
    UppercaseWordForward,
    LowercaseWordForward,
    CapitalizeWordForward,
    /// Swap the clusters around the cursor.
    TransposeBackward,
}

impl Action {
    /// Short help text.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::InsertChar(_) | Self::Insert(_) => "insert",
            Self::Newline => "insert newline",
            Self::DeleteBackward => "delete character backward",
            Self::DeleteForward => "delete character forward",
            Self::DeleteWordBackward => "delete word backward",
            Self::DeleteWordForward => "delete word forward",
            Self::DeleteBeforeCursor => "delete before cursor",
            Self::DeleteAfterCursor => "delete after cursor",
            Self::MoveLeft => "character backward",
            Self::MoveRight => "character forward",
            Self::MoveUp => "previous line",
            Self::MoveDown => "next line",
            Self::WordLeft => "word backward",
            Self::WordRight => "word forward",
            Self::LineStart => "line start",
            Self::LineEnd => "line end",
            Self::InputBegin => "input begin",
            Self::InputEnd => "input end",
            Self::UppercaseWordForward => "uppercase word forward",
            Self::LowercaseWordForward => "lowercase word forward",
            Self::CapitalizeWordForward => "capitalize word forward",
            Self::TransposeBackward => "transpose character backward",
        }
    }

    /// Whether this action only moves the cursor.
    #[must_use]
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Self::MoveLeft
                | Self::MoveRight
                | Self::MoveUp
                | Self::MoveDown
                | Self::WordLeft
                | Self::WordRight
                | Self::LineStart
                | Self::LineEnd
                | Self::InputBegin
                | Self::InputEnd
        )
    }
}

/// Maps key events to actions.
///
/// Lookups ignore Shift on character keys, so `alt+<` matches whether or
/// not the terminal reports the Shift needed to type `<`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    bindings: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let ctrl = KeyEvent::with_ctrl;
        let alt = KeyEvent::with_alt;
        let key = KeyEvent::key;
        let ch = KeyCode::Char;

        let defaults = [
            (key(KeyCode::Right), Action::MoveRight),
            (ctrl(ch('f')), Action::MoveRight),
            (key(KeyCode::Left), Action::MoveLeft),
            (ctrl(ch('b')), Action::MoveLeft),
            (alt(KeyCode::Right), Action::WordRight),
            (alt(ch('f')), Action::WordRight),
            (alt(KeyCode::Left), Action::WordLeft),
            (alt(ch('b')), Action::WordLeft),
            (key(KeyCode::Down), Action::MoveDown),
            (ctrl(ch('n')), Action::MoveDown),
            (key(KeyCode::Up), Action::MoveUp),
            (ctrl(ch('p')), Action::MoveUp),
            (alt(KeyCode::Backspace), Action::DeleteWordBackward),
            (ctrl(ch('w')), Action::DeleteWordBackward),
            (alt(KeyCode::Delete), Action::DeleteWordForward),
            (alt(ch('d')), Action::DeleteWordForward),
            (ctrl(ch('k')), Action::DeleteAfterCursor),
            (ctrl(ch('u')), Action::DeleteBeforeCursor),
            (key(KeyCode::Enter), Action::Newline),
            (ctrl(ch('m')), Action::Newline),
            (key(KeyCode::Backspace), Action::DeleteBackward),
            (ctrl(ch('h')), Action::DeleteBackward),
            (key(KeyCode::Delete), Action::DeleteForward),
            (ctrl(ch('d')), Action::DeleteForward),
            (key(KeyCode::Home), Action::LineStart),
            (ctrl(ch('a')), Action::LineStart),
            (key(KeyCode::End), Action::LineEnd),
            (ctrl(ch('e')), Action::LineEnd),
            (alt(ch('<')), Action::InputBegin),
            (ctrl(KeyCode::Home), Action::InputBegin),
            (alt(ch('>')), Action::InputEnd),
            (ctrl(KeyCode::End), Action::InputEnd),
            (alt(ch('c')), Action::CapitalizeWordForward),
            (alt(ch('l')), Action::LowercaseWordForward),
            (alt(ch('u')), Action::UppercaseWordForward),
            (ctrl(ch('t')), Action::TransposeBackward),
            (key(KeyCode::Tab), Action::Insert("\t".to_string())),
        ];

        Self {
            bindings: defaults.into_iter().collect(),
        }
    }
}

impl KeyMap {
    /// A key map with no bindings; only typed characters insert.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyEvent, action: Action) {
        self.bindings.insert(key.normalized(), action);
    }

    /// Remove the binding for `key`.
    pub fn unbind(&mut self, key: KeyEvent) -> Option<Action> {
        self.bindings.remove(&key.normalized())
    }

    /// Action bound to `key`, if any.
    #[must_use]
    pub fn action_for(&self, key: &KeyEvent) -> Option<&Action> {
        self.bindings.get(&key.normalized())
    }

    /// Keys bound to `action`, sorted by their display name.
    #[must_use]
    pub fn keys_for(&self, action: &Action) -> Vec<KeyEvent> {
        let mut keys: Vec<KeyEvent> = self
            .bindings
            .iter()
            .filter(|(_, a)| *a == action)
            .map(|(k, _)| *k)
            .collect();
        keys.sort_by_key(ToString::to_string);
        keys
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Help lines of the form `"ctrl+k: delete after cursor"`.
    #[must_use]
    pub fn help(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|(key, action)| format!("{key}: {}", action.description()))
            .collect();
        lines.sort();
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyModifiers;

    #[test]
    fn test_default_bindings() {
        let map = KeyMap::default();
        assert_eq!(
            map.action_for(&KeyEvent::key(KeyCode::Right)),
            Some(&Action::MoveRight)
        );
        assert_eq!(
            map.action_for(&KeyEvent::with_ctrl(KeyCode::Char('k'))),
            Some(&Action::DeleteAfterCursor)
        );
        assert_eq!(
            map.action_for(&KeyEvent::with_alt(KeyCode::Backspace)),
            Some(&Action::DeleteWordBackward)
        );
        assert_eq!(map.action_for(&KeyEvent::char('a')), None);
    }

    #[test]
    fn test_shift_ignored_for_char_bindings() {
        let map = KeyMap::default();
        let shifted = KeyEvent::new(KeyCode::Char('>'), KeyModifiers::ALT | KeyModifiers::SHIFT);
        assert_eq!(map.action_for(&shifted), Some(&Action::InputEnd));
    }

    #[test]
    fn test_bind_and_unbind() {
        let mut map = KeyMap::empty();
        assert!(map.is_empty());
        let key = KeyEvent::with_ctrl(KeyCode::Char('j'));
        map.bind(key, Action::Newline);
        assert_eq!(map.action_for(&key), Some(&Action::Newline));
        assert_eq!(map.unbind(key), Some(Action::Newline));
        assert_eq!(map.action_for(&key), None);
    }

    #[test]
    fn test_keys_for_and_help() {
        let map = KeyMap::default();
        let keys = map.keys_for(&Action::MoveUp);
        assert_eq!(
            keys,
            vec![KeyEvent::with_ctrl(KeyCode::Char('p')), KeyEvent::key(KeyCode::Up)]
        );
        assert!(map.help().contains(&"ctrl+t: transpose character backward".to_string()));
    }
}
