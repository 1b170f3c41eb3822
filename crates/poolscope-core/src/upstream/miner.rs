//! Miner-level payloads (`/miner/<addr>/currentStats`, `/miner/<addr>/workers`).

use serde::Deserialize;

use super::nullable;

/// `data` of `/miner/<addr>/currentStats`.
///
/// Balances are in upstream base units; income rates are per minute and
/// already in whole coins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MinerSnapshot {
    #[serde(deserialize_with = "nullable")]
    pub time: f64,
    #[serde(deserialize_with = "nullable")]
    pub last_seen: f64,
    #[serde(deserialize_with = "nullable")]
    pub reported_hashrate: f64,
    #[serde(deserialize_with = "nullable")]
    pub current_hashrate: f64,
    #[serde(deserialize_with = "nullable")]
    pub average_hashrate: f64,
    #[serde(deserialize_with = "nullable")]
    pub valid_shares: f64,
    #[serde(deserialize_with = "nullable")]
    pub invalid_shares: f64,
    #[serde(deserialize_with = "nullable")]
    pub stale_shares: f64,
    #[serde(deserialize_with = "nullable")]
    pub active_workers: f64,
    #[serde(rename = "unpaid", deserialize_with = "nullable")]
    pub unpaid_base_units: f64,
    #[serde(rename = "unconfirmed", deserialize_with = "nullable")]
    pub unconfirmed_base_units: f64,
    #[serde(rename = "coinsPerMin", deserialize_with = "nullable")]
    pub coins_per_minute: f64,
    #[serde(rename = "usdPerMin", deserialize_with = "nullable")]
    pub usd_per_minute: f64,
    #[serde(rename = "btcPerMin", deserialize_with = "nullable")]
    pub btc_per_minute: f64,
}

impl MinerSnapshot {
    /// Seconds between the statistics entry and the last time any worker was seen.
    pub fn last_seen_delta(&self) -> f64 {
        self.time - self.last_seen
    }
}

/// One element of `/miner/<addr>/workers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkerSample {
    #[serde(rename = "worker", deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub time: f64,
    #[serde(deserialize_with = "nullable")]
    pub last_seen: f64,
    #[serde(deserialize_with = "nullable")]
    pub reported_hashrate: f64,
    #[serde(deserialize_with = "nullable")]
    pub current_hashrate: f64,
    #[serde(deserialize_with = "nullable")]
    pub valid_shares: f64,
    #[serde(deserialize_with = "nullable")]
    pub invalid_shares: f64,
    #[serde(deserialize_with = "nullable")]
    pub stale_shares: f64,
}

impl WorkerSample {
    pub fn last_seen_delta(&self) -> f64 {
        self.time - self.last_seen
    }
}
