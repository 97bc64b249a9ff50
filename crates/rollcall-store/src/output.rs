//! Output directory for downloaded vote documents.

use std::io;
use std::path::{Path, PathBuf};

use rollcall_core::FileWriter;

use crate::StoreError;

/// An existing directory that vote files are written into.
///
/// The directory is never created here; pointing a run at a missing path is
/// a configuration mistake and fails up front.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Err(StoreError::OutputDirNotFound(path));
        }
        if !path.is_dir() {
            return Err(StoreError::NotADirectory(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// [`FileWriter`] that writes UTF-8 text, truncating existing files.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFileWriter;

impl FileWriter for TextFileWriter {
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
        Ok(())
    }
}
