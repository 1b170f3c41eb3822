//! reqwest-backed fetcher.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::ACCEPT;
use reqwest::Client;

use poolscope_core::error::{ExporterError, Result};

use super::UpstreamFetcher;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExporterError::Startup(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        tracing::debug!(%url, "sending scrape request");
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(%url, error = %e, "failed to scrape target");
                ExporterError::Transport(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%url, %status, "upstream returned non-success status");
        }

        resp.bytes().await.map_err(|e| {
            tracing::debug!(%url, error = %e, "failed to read data from target");
            ExporterError::Transport(e.to_string())
        })
    }
}
