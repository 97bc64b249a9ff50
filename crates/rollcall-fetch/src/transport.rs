//! HTTP transports.
//!
//! The fetcher talks to the network through the [`Transport`] trait so that
//! two independent client stacks can back each other up, and so tests can
//! script responses without a server.

use async_trait::async_trait;

use crate::TransportError;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Short label used in log messages.
    fn name(&self) -> &str;

    /// GET `url` and return the response status code.
    async fn status(&self, url: &str) -> Result<u16, TransportError>;

    /// GET `url` and return the body decoded as UTF-8.
    async fn text(&self, url: &str) -> Result<String, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    name: &'static str,
    client: reqwest::Client,
    /// Treat non-2xx bodies as failures in [`Transport::text`].
    strict: bool,
}

#[cfg(feature = "http")]
impl ReqwestTransport {
    /// Default client (HTTP/2 negotiated where offered). `text()` fails on any
    /// non-success status.
    pub fn standard() -> Result<Self, TransportError> {
        Ok(Self {
            name: "standard",
            client: reqwest::Client::builder().build()?,
            strict: true,
        })
    }

    /// HTTP/1.1-only client. `text()` returns whatever body the server sent.
    pub fn http1() -> Result<Self, TransportError> {
        Ok(Self {
            name: "http1",
            client: reqwest::Client::builder().http1_only().build()?,
            strict: false,
        })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for ReqwestTransport {
    fn name(&self) -> &str {
        self.name
    }

    async fn status(&self, url: &str) -> Result<u16, TransportError> {
        let resp = self.client.get(url).send().await?;
        Ok(resp.status().as_u16())
    }

    async fn text(&self, url: &str) -> Result<String, TransportError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if self.strict && !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await?;
        tracing::debug!(url, transport = self.name, bytes = bytes.len(), "fetched body");
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}
