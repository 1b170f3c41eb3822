//! Metric assembly: validated upstream data -> request-scoped registry.
//!
//! Metric names follow `{namespace}_{subsystem}_{field}`. Assembly only fails
//! when two metrics collide on the same identity.

pub mod miner;
pub mod pool;
pub mod registry;

pub use miner::build_miner_registry;
pub use pool::build_pool_registry;
pub use registry::{MetricDescriptor, ScrapeRegistry};
