//! Core types for rollcall: URL templates, chamber sweeps, and the logging
//! and file-writing capabilities the collector is built on.

pub mod error;
pub mod log;
pub mod sweep;
pub mod template;

pub use error::CollectError;
pub use log::{FileWriter, Level, LogRecord, Logger, TracingLogger};
pub use sweep::{Axis, Sweep, Target, Targets};
pub use template::{TemplateError, UrlTemplate};
