//! Upstream fetching.
//!
//! The pipeline only sees the `UpstreamFetcher` trait, so tests can swap in a
//! recording stub without a network.

pub mod http;

use async_trait::async_trait;
use bytes::Bytes;

use poolscope_core::error::Result;

pub use http::HttpFetcher;

/// One GET against an upstream URL, returning the raw body.
///
/// Non-2xx responses are not errors at this layer: the body is handed to the
/// validator, which decides. Only network/IO failures map to `Transport`.
#[async_trait]
pub trait UpstreamFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}
