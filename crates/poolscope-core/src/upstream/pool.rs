//! Pool-level payloads (`/poolStats`, `/servers/history`).

use serde::Deserialize;

use super::nullable;

/// `data` of `/poolStats`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PoolSnapshot {
    #[serde(rename = "poolStats")]
    pub stats: PoolStats,
    pub price: PoolPrice,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PoolStats {
    #[serde(rename = "hashRate", deserialize_with = "nullable")]
    pub hash_rate: f64,
    #[serde(rename = "miners", deserialize_with = "nullable")]
    pub miner_count: f64,
    #[serde(rename = "workers", deserialize_with = "nullable")]
    pub worker_count: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PoolPrice {
    #[serde(deserialize_with = "nullable")]
    pub usd: f64,
    #[serde(deserialize_with = "nullable")]
    pub btc: f64,
}

/// One element of `/servers/history`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSample {
    #[serde(deserialize_with = "nullable")]
    pub server: String,
    /// Unix seconds.
    #[serde(deserialize_with = "nullable")]
    pub time: i64,
    #[serde(rename = "hashrate", deserialize_with = "nullable")]
    pub hash_rate: f64,
}
