use thiserror::Error;

/// A single transport attempt failed. Always recoverable: the fetcher logs
/// it and moves on.
#[derive(Debug, Error)]
pub enum TransportError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}")]
    Status { status: u16 },

    #[error("response is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}
