//! Log and document-event callback system.
//!
//! The library never writes to stdout/stderr on its own. Hosts register a log
//! callback to receive diagnostics (collaborator failures, skipped imports) and
//! an event callback to observe document mutations.

use std::fmt;
use std::sync::{Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Something that happened to the current document or its stored copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentEvent {
    /// A new document replaced the current one.
    Loaded { lines: usize },
    /// A hide rewrote a line's segments.
    Hidden { line: u64, segments: usize },
    /// A single segment flipped its hidden flag.
    Toggled { segment: u64, hidden: bool },
    /// Every hidden segment was revealed.
    RevealedAll { count: usize },
    /// The current document was written to the store.
    Saved { file_id: String },
    /// A stored file was removed.
    Deleted { file_id: String },
    /// Files were copied into the active namespace.
    Imported { count: usize },
}

impl DocumentEvent {
    /// Short stable name for the event kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loaded { .. } => "loaded",
            Self::Hidden { .. } => "hidden",
            Self::Toggled { .. } => "toggled",
            Self::RevealedAll { .. } => "revealed_all",
            Self::Saved { .. } => "saved",
            Self::Deleted { .. } => "deleted",
            Self::Imported { .. } => "imported",
        }
    }
}

type EventCallback = Box<dyn Fn(&DocumentEvent) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global document-event callback, replacing any previous one.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&DocumentEvent) + Send + Sync + 'static,
{
    if let Ok(mut guard) = event_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Emit a document event to the registered callback.
pub fn emit_event(event: &DocumentEvent) {
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(event);
        }
    }
}

/// Set the global log callback, replacing any previous one.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}
