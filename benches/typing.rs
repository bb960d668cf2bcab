//! Edit buffer and textarea interaction benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use textarea_core::{
    EditBuffer, EditPolicy, Event, KeyCode, KeyEvent, Textarea, TextareaOptions,
};

fn edit_buffer_insertion(c: &mut Criterion) {
    c.bench_function("editbuffer_insert_char", |b| {
        let mut editor = EditBuffer::new().with_policy(EditPolicy::unrestricted());
        b.iter(|| {
            let _ = editor.insert_char(black_box('x'));
        });
    });

    c.bench_function("editbuffer_insert_word_with_budget", |b| {
        let policy = EditPolicy {
            row_budget: Some(1_000_000),
            ..EditPolicy::unrestricted()
        };
        let mut editor = EditBuffer::new().with_policy(policy);
        b.iter(|| {
            let _ = editor.insert_str(black_box("hello "));
        });
    });
}

fn edit_buffer_cursor_movement(c: &mut Criterion) {
    let text = (0..100)
        .map(|i| format!("Line number {i} with some content that wraps"))
        .collect::<Vec<_>>()
        .join("\n");
    let mut editor = EditBuffer::with_text(&text);
    editor.set_wrap_width(20);

    c.bench_function("editbuffer_move_left_right", |b| {
        b.iter(|| {
            editor.move_left();
            editor.move_right();
        });
    });

    c.bench_function("editbuffer_move_up_down", |b| {
        b.iter(|| {
            editor.move_up();
            editor.move_down();
        });
    });

    c.bench_function("editbuffer_line_info", |b| {
        b.iter(|| black_box(editor.line_info()));
    });
}

fn textarea_typing(c: &mut Criterion) {
    c.bench_function("textarea_type_and_view", |b| {
        let mut textarea = Textarea::new(TextareaOptions {
            char_limit: None,
            row_budget: Some(usize::MAX),
            ..TextareaOptions::default()
        });
        textarea.focus();
        let key = Event::Key(KeyEvent::char('a'));
        let space = Event::Key(KeyEvent::key(KeyCode::Char(' ')));
        b.iter(|| {
            textarea.update(black_box(&key));
            textarea.update(black_box(&space));
            black_box(textarea.view());
        });
    });
}

criterion_group!(
    benches,
    edit_buffer_insertion,
    edit_buffer_cursor_movement,
    textarea_typing
);
criterion_main!(benches);
