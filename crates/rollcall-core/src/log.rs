//! Logging and file-writing capabilities.
//!
//! The collector never touches the filesystem directly: it is handed a
//! [`Logger`] for its audit trail and a [`FileWriter`] for vote documents.
//! `rollcall-store` provides the on-disk implementations.

use std::fmt;
use std::io;
use std::path::Path;

use chrono::NaiveDateTime;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Level::Info => write!(f, "Info"),
            Level::Warning => write!(f, "Warning"),
            Level::Error => write!(f, "Error"),
        }
    }
}

/// One line of the collection log.
///
/// Rendered as `{timestamp}|{mode}|{message}` where `mode` is the emitting
/// component followed by the level, e.g. `rollcall.fetch.ping_url.Warning`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    pub level: Level,
    pub mode: String,
    pub message: String,
}

impl LogRecord {
    /// Build a record stamped with the current local time.
    pub fn now(component: &str, level: Level, message: impl Into<String>) -> Self {
        Self::at(chrono::Local::now().naive_local(), component, level, message)
    }

    pub fn at(
        timestamp: NaiveDateTime,
        component: &str,
        level: Level,
        message: impl Into<String>,
    ) -> Self {
        // One record, one line.
        let message = message.into().replace(['\r', '\n'], " ");
        Self {
            timestamp,
            level,
            mode: format!("{component}.{level}"),
            message,
        }
    }

    /// Mirror the record to `tracing` at the matching level.
    pub fn trace(&self) {
        match self.level {
            Level::Info => tracing::info!(mode = %self.mode, "{}", self.message),
            Level::Warning => tracing::warn!(mode = %self.mode, "{}", self.message),
            Level::Error => tracing::error!(mode = %self.mode, "{}", self.message),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.mode,
            self.message
        )
    }
}

/// Append-only sink for [`LogRecord`]s.
pub trait Logger: Send + Sync {
    fn write_record(&self, record: &LogRecord) -> io::Result<()>;

    fn info(&self, component: &str, message: &str) -> io::Result<()> {
        self.write_record(&LogRecord::now(component, Level::Info, message))
    }

    fn warn(&self, component: &str, message: &str) -> io::Result<()> {
        self.write_record(&LogRecord::now(component, Level::Warning, message))
    }

    fn error(&self, component: &str, message: &str) -> io::Result<()> {
        self.write_record(&LogRecord::now(component, Level::Error, message))
    }
}

/// Logger that only forwards to `tracing`. Used for dry runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn write_record(&self, record: &LogRecord) -> io::Result<()> {
        record.trace();
        Ok(())
    }
}

/// Writes whole text files, replacing any previous content.
pub trait FileWriter: Send + Sync {
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;
}
