//! HTTP transport seam for upstream calls.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::GatewayError;

/// Status and body of an upstream HTTP response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

/// Performs a single HTTP GET against the upstream provider.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// Issue a GET to `url` with the given query parameters.
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<UpstreamResponse, GatewayError>;
}

/// `reqwest`-backed transport with a per-request timeout.
///
/// The client keeps a connection pool; dropping an in-flight future returns
/// its connection to the pool or closes it.
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::request(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    fn map_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            GatewayError::request(err.to_string())
        }
    }
}

#[async_trait]
impl UpstreamTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<UpstreamResponse, GatewayError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;
        debug!(status, bytes = body.len(), "Upstream response received");

        Ok(UpstreamResponse { status, body })
    }
}
