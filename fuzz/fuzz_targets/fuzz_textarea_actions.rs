//! Fuzz target for textarea editing.
//!
//! Replays arbitrary sequences of actions and resizes against a textarea
//! with small limits and checks that the buffer invariants survive.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textarea_core::{Action, Event, Outcome, ResizeEvent, Textarea, TextareaOptions, WidthMethod};

#[derive(Arbitrary, Debug)]
struct Session {
    width: u8,
    row_budget: Option<u8>,
    char_limit: Option<u8>,
    steps: Vec<Step>,
}

#[derive(Arbitrary, Debug)]
enum Step {
    Char(char),
    Insert(String),
    Newline,
    DeleteBackward,
    DeleteForward,
    DeleteWordBackward,
    DeleteWordForward,
    DeleteBeforeCursor,
    DeleteAfterCursor,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    WordLeft,
    WordRight,
    InputBegin,
    InputEnd,
    Uppercase,
    Capitalize,
    Transpose,
    Resize { width: u8, height: u8 },
}

impl Step {
    fn into_action(self) -> Result<Action, ResizeEvent> {
        Ok(match self {
            Self::Char(c) => Action::InsertChar(c),
            Self::Insert(s) => Action::Insert(s),
            Self::Newline => Action::Newline,
            Self::DeleteBackward => Action::DeleteBackward,
            Self::DeleteForward => Action::DeleteForward,
            Self::DeleteWordBackward => Action::DeleteWordBackward,
            Self::DeleteWordForward => Action::DeleteWordForward,
            Self::DeleteBeforeCursor => Action::DeleteBeforeCursor,
            Self::DeleteAfterCursor => Action::DeleteAfterCursor,
            Self::MoveLeft => Action::MoveLeft,
            Self::MoveRight => Action::MoveRight,
            Self::MoveUp => Action::MoveUp,
            Self::MoveDown => Action::MoveDown,
            Self::WordLeft => Action::WordLeft,
            Self::WordRight => Action::WordRight,
            Self::InputBegin => Action::InputBegin,
            Self::InputEnd => Action::InputEnd,
            Self::Uppercase => Action::UppercaseWordForward,
            Self::Capitalize => Action::CapitalizeWordForward,
            Self::Transpose => Action::TransposeBackward,
            Self::Resize { width, height } => {
                return Err(ResizeEvent::new(u16::from(width), u16::from(height)));
            }
        })
    }
}

fuzz_target!(|session: Session| {
    let mut textarea = Textarea::new(TextareaOptions {
        width: usize::from(session.width),
        row_budget: session.row_budget.map(usize::from),
        char_limit: session.char_limit.map(usize::from),
        width_method: Some(WidthMethod::WcWidth),
        ..TextareaOptions::default()
    });
    textarea.focus();

    for step in session.steps.into_iter().take(256) {
        let before = textarea.value();
        let outcome = match step.into_action() {
            Ok(action) => textarea.apply(action),
            Err(resize) => textarea.update(&Event::Resize(resize)),
        };

        if matches!(outcome, Outcome::Rejected(_)) {
            assert_eq!(textarea.value(), before, "rejected edit changed the value");
        }
        if let Some(limit) = session.char_limit {
            if outcome.is_edit() && textarea.length() > before.chars().count() {
                assert!(textarea.length() <= usize::from(limit));
            }
        }

        let cursor = textarea.cursor();
        assert!(cursor.line < textarea.line_count());
        let _ = textarea.view();
        let _ = textarea.cursor_position();
    }
});
