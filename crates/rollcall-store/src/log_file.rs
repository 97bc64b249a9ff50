//! Append-only collection log.
//!
//! One `{timestamp}|{mode}|{message}` line per event. The file is opened,
//! appended to and closed on every write, so nothing is held open across a
//! long sweep. Not safe for concurrent writers in separate processes.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rollcall_core::{LogRecord, Logger};

use crate::StoreError;

pub const DEFAULT_LOG_FILE: &str = "rollcall.log";

/// [`Logger`] backed by a plain text file.
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `rollcall.log` in the process working directory.
    pub fn in_current_dir() -> Result<Self, StoreError> {
        Ok(Self::new(std::env::current_dir()?.join(DEFAULT_LOG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Logger for FileLogger {
    fn write_record(&self, record: &LogRecord) -> io::Result<()> {
        record.trace();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{record}")
    }
}
