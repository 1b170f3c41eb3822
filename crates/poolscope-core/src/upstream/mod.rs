//! Upstream REST contracts.
//!
//! Every endpoint answers with the same `{status, data}` envelope, but `data`
//! may be an object, an array, or the literal string "NO DATA". The envelope
//! module resolves that ambiguity; the pool/miner modules hold the payloads
//! with their wire field names preserved verbatim.

pub mod envelope;
pub mod miner;
pub mod pool;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer};

/// Path suffix for pool statistics.
pub const POOL_STATS_PATH: &str = "/poolStats";
/// Path suffix for per-server hash rate history.
pub const POOL_SERVERS_PATH: &str = "/servers/history";

/// Path suffix for a miner's current statistics.
pub fn miner_stats_path(miner: &str) -> String {
    format!("/miner/{}/currentStats", encode_segment(miner))
}

/// Path suffix for a miner's workers.
pub fn miner_workers_path(miner: &str) -> String {
    format!("/miner/{}/workers", encode_segment(miner))
}

/// Everything outside the unreserved set, so a miner address can never
/// escape its path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT).to_string()
}

/// Upstream sends `null` for values it does not have; treat it as the zero value.
pub(crate) fn nullable<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
