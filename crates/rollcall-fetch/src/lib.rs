//! Fetch layer: pluggable HTTP transports, the reachability probe and
//! fallback downloader, and the rate-limited collection driver.

mod collect;
mod error;
mod fetcher;
mod transport;

pub use collect::{CollectStats, Collector, DEFAULT_RATE_LIMIT};
pub use error::TransportError;
pub use fetcher::{ContentSource, Fetcher};
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
