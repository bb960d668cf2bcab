//! Event and log callback system.
//!
//! Hosts can register callbacks to observe what the textarea does without
//! installing a `tracing` subscriber. Every log record is also forwarded to
//! `tracing` under the `textarea_core` target.

use std::sync::{Mutex, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = event_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global event callback.
pub fn clear_event_callback() {
    if let Ok(mut guard) = event_callback().lock() {
        *guard = None;
    }
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    tracing::trace!(target: "textarea_core", event = name, data);
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(name, data);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global log callback.
pub fn clear_log_callback() {
    if let Ok(mut guard) = log_callback().lock() {
        *guard = None;
    }
}

/// Emit a log event.
pub fn emit_log(level: LogLevel, message: &str) {
    match level {
        LogLevel::Trace => tracing::trace!(target: "textarea_core", "{message}"),
        LogLevel::Debug => tracing::debug!(target: "textarea_core", "{message}"),
        LogLevel::Info => tracing::info!(target: "textarea_core", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "textarea_core", "{message}"),
        LogLevel::Error => tracing::error!(target: "textarea_core", "{message}"),
    }
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_event_callback() {
        let called = Arc::new(AtomicBool::new(false));
        let called_clone = Arc::clone(&called);
        set_event_callback(move |name, _data| {
            if name == "event.test" {
                called_clone.store(true, Ordering::SeqCst);
            }
        });
        emit_event("event.test", "{}");
        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_log_callback() {
        let seen = Arc::new(AtomicBool::new(false));
        let seen_clone = Arc::clone(&seen);
        set_log_callback(move |level, msg| {
            if msg == "log.test" {
                assert_eq!(level, LogLevel::Info);
                seen_clone.store(true, Ordering::SeqCst);
            }
        });
        emit_log(LogLevel::Info, "log.test");
        assert!(seen.load(Ordering::SeqCst));
    }
}
