//! Layered envelope validation.
//!
//! Decoding order:
//! 1. status probe: must decode, and `status` must be "OK"
//! 2. sentinel probe: `data == "NO DATA"` means no records (probe failure is ignored)
//! 3. full decode into the caller's payload type

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ExporterError, Result};

/// Status value marking a usable payload.
pub const STATUS_OK: &str = "OK";
/// Sentinel `data` value for "valid target, no records yet".
pub const NO_DATA: &str = "NO DATA";

/// Generic scrape-result wrapper.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: T,
}

#[derive(Debug, Deserialize)]
struct StatusProbe {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SentinelProbe {
    data: String,
}

/// Validate raw upstream bytes and return the typed payload.
pub fn validate<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    let probe: StatusProbe =
        serde_json::from_slice(raw).map_err(|e| ExporterError::Malformed(e.to_string()))?;
    match probe.status {
        Some(ref s) if s == STATUS_OK => {}
        other => {
            let status = other.unwrap_or_default();
            tracing::debug!(%status, "upstream status not OK");
            return Err(ExporterError::NotOk(status));
        }
    }

    if let Ok(sentinel) = serde_json::from_slice::<SentinelProbe>(raw) {
        if sentinel.data == NO_DATA {
            return Err(ExporterError::NoData);
        }
    }

    let env: Envelope<T> =
        serde_json::from_slice(raw).map_err(|e| ExporterError::Malformed(e.to_string()))?;
    Ok(env.data)
}
