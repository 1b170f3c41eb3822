//! Exporter config loader (strict parsing).

pub mod schema;

use std::fs;

use poolscope_core::error::{ExporterError, Result};

pub use schema::{CurrencyConfig, ExporterConfig, ExporterSection, PoolConfig};

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ExporterError::Startup(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let mut cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| ExporterError::Startup(format!("invalid yaml: {e}")))?;
    cfg.normalize();
    cfg.validate()?;
    Ok(cfg)
}
