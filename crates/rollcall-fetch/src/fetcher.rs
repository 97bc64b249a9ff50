//! Reachability probe and fallback downloader.
//!
//! Network failures are expected here: most URLs in a sweep do not exist. The
//! fetcher logs every failure and reports it as `false` / empty content. The
//! only errors it returns are failures to write the collection log itself.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use rollcall_core::Logger;

use crate::transport::Transport;

const PROBE: &str = "rollcall.fetch.ping_url";
const DOWNLOAD: &str = "rollcall.fetch.download_content";

/// Anything that can turn a URL into document text.
///
/// Empty text means "nothing usable at this URL".
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> io::Result<String>;
}

/// Probe-then-download over a primary and a fallback [`Transport`].
///
/// The probe runs over the fallback transport, the more permissive of the
/// two, so a primary-only failure still reaches the fallback download.
pub struct Fetcher {
    primary: Box<dyn Transport>,
    fallback: Box<dyn Transport>,
    logger: Arc<dyn Logger>,
}

impl Fetcher {
    pub fn new(
        primary: Box<dyn Transport>,
        fallback: Box<dyn Transport>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            primary,
            fallback,
            logger,
        }
    }

    /// Standard reqwest client as primary, HTTP/1.1-only client as fallback.
    #[cfg(feature = "http")]
    pub fn reqwest(logger: Arc<dyn Logger>) -> Result<Self, crate::TransportError> {
        use crate::transport::ReqwestTransport;

        Ok(Self::new(
            Box::new(ReqwestTransport::standard()?),
            Box::new(ReqwestTransport::http1()?),
            logger,
        ))
    }

    /// True iff a GET on `url` answers exactly 200.
    pub async fn ping_url(&self, url: &str) -> io::Result<bool> {
        match self.fallback.status(url).await {
            Ok(status) => Ok(status == 200),
            Err(e) => {
                self.logger
                    .warn(PROBE, &format!("Failed to connect to {url}, Error: {e}"))?;
                Ok(false)
            }
        }
    }

    /// Download `url` as text, or return an empty string if it is unreachable
    /// or both transports fail.
    pub async fn download_content(&self, url: &str) -> io::Result<String> {
        if !self.ping_url(url).await? {
            self.logger
                .warn(DOWNLOAD, &format!("{url} did not return status 200"))?;
            return Ok(String::new());
        }

        let primary_err = match self.primary.text(url).await {
            Ok(content) => return Ok(content),
            Err(e) => e,
        };
        self.logger.warn(
            DOWNLOAD,
            &format!(
                "Failed to download content via {}, Message:{primary_err}",
                self.primary.name()
            ),
        )?;

        match self.fallback.text(url).await {
            Ok(content) => Ok(content),
            Err(e) => {
                self.logger.error(
                    DOWNLOAD,
                    &format!(
                        "Failed to download content via {}, Message:{e}",
                        self.fallback.name()
                    ),
                )?;
                Ok(String::new())
            }
        }
    }
}

#[async_trait]
impl ContentSource for Fetcher {
    async fn fetch(&self, url: &str) -> io::Result<String> {
        self.download_content(url).await
    }
}
