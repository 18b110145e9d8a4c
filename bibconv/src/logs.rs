//! Progress logging on stderr.
//!
//! Standard output carries the converted data (SQL, author lines, feed
//! records), so every diagnostic goes through this module and lands on
//! stderr. A global [`LOGGER`] backs the `log_*` helpers; `--quiet`
//! silences everything except errors.

use once_cell::sync::Lazy;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Nesting depth, rendered as three spaces per level
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Render the entry as a single stderr line.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, prefix, self.message)
    }
}

/// Where log entries end up.
enum Sink {
    Stderr,
    Memory(Mutex<Vec<LogEntry>>),
}

/// Global logger used by the `log_*` helpers.
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

pub struct Logger {
    quiet: AtomicBool,
    sink: Sink,
}

impl Logger {
    /// Logger writing to stderr.
    pub fn new() -> Self {
        Self { quiet: AtomicBool::new(false), sink: Sink::Stderr }
    }

    /// Logger keeping entries in memory, see [`Logger::entries`].
    pub fn capturing() -> Self {
        Self { quiet: AtomicBool::new(false), sink: Sink::Memory(Mutex::new(Vec::new())) }
    }

    /// Suppress everything below [`LogLevel::Error`].
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    pub fn log(&self, entry: LogEntry) {
        if self.is_quiet() && entry.level != LogLevel::Error {
            return;
        }

        match &self.sink {
            Sink::Stderr => {
                // Nothing useful to do if stderr itself is gone
                let _ = writeln!(std::io::stderr().lock(), "{}", entry.render());
            }
            Sink::Memory(entries) => {
                if let Ok(mut entries) = entries.lock() {
                    entries.push(entry);
                }
            }
        }
    }

    /// Entries recorded by a capturing logger (empty for stderr loggers).
    pub fn entries(&self) -> Vec<LogEntry> {
        match &self.sink {
            Sink::Stderr => Vec::new(),
            Sink::Memory(entries) => entries.lock().map(|e| e.clone()).unwrap_or_default(),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::info(msg).with_indent(indent));
}
