use thiserror::Error;

use crate::template::TemplateError;

/// Failures that abort a collection run.
///
/// Network problems never show up here: the fetcher absorbs them and reports
/// "no content" instead.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
