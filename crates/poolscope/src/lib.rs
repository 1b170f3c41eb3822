//! Top-level facade crate for poolscope.
//!
//! Re-exports the core types and the exporter library so users can depend on a single crate.

pub mod core {
    pub use poolscope_core::*;
}

pub mod exporter {
    pub use poolscope_exporter::*;
}
