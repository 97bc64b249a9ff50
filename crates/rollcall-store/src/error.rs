use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("output directory not found: {0}")]
    OutputDirNotFound(std::path::PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
