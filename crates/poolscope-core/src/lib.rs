//! poolscope core: upstream payload contracts, validation, and target metadata.
//!
//! This crate turns raw upstream bytes into typed pool/miner snapshots and
//! holds the read-only target catalog. It carries no transport or runtime
//! dependencies so the pipeline stages can be tested in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed upstream
//! data always surfaces as `ExporterError`, never as a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod reduce;
pub mod target;
pub mod upstream;

/// Shared result type.
pub use error::{ErrorClass, ExporterError, Result};
pub use target::{Currency, Target, TargetCatalog};
