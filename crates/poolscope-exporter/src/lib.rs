//! poolscope exporter library entry.
//!
//! This crate wires configuration, the upstream fetcher, the scrape pipeline,
//! and metric assembly into an axum service. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod assemble;
pub mod config;
pub mod ops;
pub mod pipeline;
pub mod router;
pub mod scrape;
pub mod transport;

/// Exporter name shown on the index page.
pub const NAME: &str = "poolscope-exporter";
/// Running version, exposed through the `exporter_info` metric.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
