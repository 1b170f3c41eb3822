//! Shared error type across poolscope crates.

use thiserror::Error;

/// Coarse failure classes (stable API, used in logs and tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing/invalid request parameter or unknown target.
    ClientInput,
    /// Network or IO failure reaching the provider.
    UpstreamTransport,
    /// Provider answered with a non-OK status or an unexpected shape.
    UpstreamLogical,
    /// Provider knows the request shape but has no records for the target.
    UpstreamNoData,
    /// Metric construction violated a registry invariant.
    Assembly,
    /// Configuration or startup failure.
    Internal,
}

impl ErrorClass {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorClass::ClientInput => "CLIENT_INPUT",
            ErrorClass::UpstreamTransport => "UPSTREAM_TRANSPORT",
            ErrorClass::UpstreamLogical => "UPSTREAM_LOGICAL",
            ErrorClass::UpstreamNoData => "UPSTREAM_NO_DATA",
            ErrorClass::Assembly => "ASSEMBLY",
            ErrorClass::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ExporterError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// A required query parameter is absent or empty. Holds the display name.
    #[error("missing {0}")]
    MissingParam(&'static str),
    #[error("invalid pool: {0}")]
    InvalidTarget(String),
    #[error("pool not found: {0}")]
    TargetNotFound(String),
    #[error("failed to scrape target: {0}")]
    Transport(String),
    #[error("failed to parse scraped data: {0}")]
    Malformed(String),
    #[error("API data not OK (status {0:?})")]
    NotOk(String),
    #[error("API data not found")]
    NoData,
    #[error("failed to assemble metrics: {0}")]
    Assembly(String),
    /// Configuration or process startup failure.
    #[error("startup: {0}")]
    Startup(String),
}

impl ExporterError {
    /// Map an error to its failure class.
    pub fn class(&self) -> ErrorClass {
        match self {
            ExporterError::MissingParam(_)
            | ExporterError::InvalidTarget(_)
            | ExporterError::TargetNotFound(_) => ErrorClass::ClientInput,
            ExporterError::Transport(_) => ErrorClass::UpstreamTransport,
            ExporterError::Malformed(_) | ExporterError::NotOk(_) => ErrorClass::UpstreamLogical,
            ExporterError::NoData => ErrorClass::UpstreamNoData,
            ExporterError::Assembly(_) => ErrorClass::Assembly,
            ExporterError::Startup(_) => ErrorClass::Internal,
        }
    }
}
