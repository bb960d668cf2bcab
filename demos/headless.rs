//! Headless textarea walkthrough
//!
//! Drives a textarea with scripted key events and prints the view after
//! each step:
//! 1. Type a sentence that soft-wraps
//! 2. Move up and down across wrapped rows
//! 3. Hit the character limit
//! 4. Resize and watch the text re-wrap
//!
//! Run with `RUST_LOG=textarea_core=debug` to see the edit log.

use textarea_core::{
    Event, KeyCode, KeyEvent, Outcome, ResizeEvent, Textarea, TextareaOptions, set_event_callback,
};

fn show(title: &str, textarea: &Textarea) {
    println!("-- {title}");
    println!("{}", textarea.view());
    if let Some((x, y)) = textarea.cursor_position() {
        println!("   cursor at column {x}, row {y}");
    }
    println!();
}

fn type_str(textarea: &mut Textarea, s: &str) -> Outcome {
    let mut last = Outcome::Unchanged;
    for c in s.chars() {
        last = textarea.update(&Event::Key(KeyEvent::char(c)));
    }
    last
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .init();

    set_event_callback(|name, data| println!("   event {name}: {data}"));

    let mut textarea = Textarea::new(TextareaOptions {
        width: 30,
        height: 5,
        char_limit: Some(80),
        placeholder: "Tell me a story...".to_string(),
        ..TextareaOptions::default()
    });
    textarea.focus();
    show("empty", &textarea);

    type_str(
        &mut textarea,
        "The quick brown fox jumps over the lazy dog.",
    );
    textarea.update(&Event::Key(KeyEvent::key(KeyCode::Enter)));
    type_str(&mut textarea, "你好, 世界 🧋");
    show("typed", &textarea);

    for _ in 0..2 {
        textarea.update(&Event::Key(KeyEvent::key(KeyCode::Up)));
    }
    show("two rows up", &textarea);

    textarea.update(&Event::Key(KeyEvent::with_ctrl(KeyCode::End)));
    let outcome = type_str(
        &mut textarea,
        " and then it kept going far past the limit",
    );
    println!("-- last keystroke: {outcome:?}\n");
    show("at the limit", &textarea);

    textarea.update(&Event::Resize(ResizeEvent::new(18, 8)));
    show("resized to 18x8", &textarea);

    println!("value: {:?}", textarea.value());
    println!("\nkey bindings:");
    for line in textarea.keymap().help() {
        println!("  {line}");
    }
}
