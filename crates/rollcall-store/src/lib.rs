//! Storage layer: the append-only collection log and the output directory
//! that downloaded vote documents are written into.

mod error;
pub use error::StoreError;

mod log_file;
pub use log_file::{DEFAULT_LOG_FILE, FileLogger};

mod output;
pub use output::{OutputDir, TextFileWriter};
