//! Shared application state for the exporter.
//!
//! Everything here is read-only after startup; each request builds its own
//! metric registry.

use std::sync::Arc;

use poolscope_core::error::Result;
use poolscope_core::TargetCatalog;

use crate::config::ExporterConfig;
use crate::scrape::{HttpFetcher, UpstreamFetcher};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    catalog: TargetCatalog,
    fetcher: Arc<dyn UpstreamFetcher>,
}

impl AppState {
    /// Build application state with the reqwest fetcher.
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(cfg.exporter.upstream_timeout())?;
        Self::with_fetcher(cfg, Arc::new(fetcher))
    }

    /// Build application state around any fetcher implementation.
    pub fn with_fetcher(cfg: ExporterConfig, fetcher: Arc<dyn UpstreamFetcher>) -> Result<Self> {
        let catalog = cfg.catalog()?;
        tracing::info!(pools = catalog.len(), "target catalog loaded");
        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                catalog,
                fetcher,
            }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn catalog(&self) -> &TargetCatalog {
        &self.inner.catalog
    }

    pub fn fetcher(&self) -> &dyn UpstreamFetcher {
        self.inner.fetcher.as_ref()
    }

    pub fn namespace(&self) -> &str {
        &self.inner.cfg.exporter.namespace
    }
}
