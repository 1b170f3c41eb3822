use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use poolscope_core::error::{ExporterError, Result};
use poolscope_core::{Currency, Target, TargetCatalog};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default = "default_currencies")]
    pub currencies: Vec<CurrencyConfig>,

    #[serde(default = "default_pools")]
    pub pools: Vec<PoolConfig>,
}

impl Default for ExporterConfig {
    /// Built-in pool table, used when no config file is given.
    fn default() -> Self {
        Self {
            version: 1,
            exporter: ExporterSection::default(),
            currencies: default_currencies(),
            pools: default_pools(),
        }
    }
}

impl ExporterConfig {
    /// Trim trailing slashes so suffixes can be appended verbatim.
    pub fn normalize(&mut self) {
        for p in &mut self.pools {
            while p.api_url.ends_with('/') {
                p.api_url.pop();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ExporterError::Startup(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        if self.pools.is_empty() {
            return Err(ExporterError::Startup("pools must not be empty".into()));
        }

        self.exporter.validate()?;

        let mut symbols = HashSet::new();
        for c in &self.currencies {
            if c.symbol.is_empty() {
                return Err(ExporterError::Startup("currency symbol must not be empty".into()));
            }
            if !(c.base_units_per_unit.is_finite() && c.base_units_per_unit > 0.0) {
                return Err(ExporterError::Startup(format!(
                    "currency {}: base_units_per_unit must be a positive number",
                    c.symbol
                )));
            }
            if !symbols.insert(c.symbol.as_str()) {
                return Err(ExporterError::Startup(format!("duplicate currency: {}", c.symbol)));
            }
        }

        for p in &self.pools {
            if p.id.is_empty() {
                return Err(ExporterError::Startup("pool id must not be empty".into()));
            }
            if !symbols.contains(p.currency.as_str()) {
                return Err(ExporterError::Startup(format!(
                    "pool {}: unknown currency {}",
                    p.id, p.currency
                )));
            }
            if !(p.api_url.starts_with("http://") || p.api_url.starts_with("https://")) {
                return Err(ExporterError::Startup(format!(
                    "pool {}: api_url must be an http(s) URL",
                    p.id
                )));
            }
        }

        Ok(())
    }

    /// Build the read-only target catalog. Duplicate pool ids fail here.
    pub fn catalog(&self) -> Result<TargetCatalog> {
        let targets = self
            .pools
            .iter()
            .map(|p| {
                let currency = self
                    .currencies
                    .iter()
                    .find(|c| c.symbol == p.currency)
                    .map(|c| Currency::new(c.symbol.clone(), c.base_units_per_unit))
                    .ok_or_else(|| {
                        ExporterError::Startup(format!("pool {}: unknown currency {}", p.id, p.currency))
                    })?;
                Ok(Target {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    api_url: p.api_url.clone(),
                    currency,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        TargetCatalog::new(targets)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Metric name prefix.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,

    /// Issue the upstream calls of one request concurrently.
    #[serde(default = "default_concurrent_fetch")]
    pub concurrent_fetch: bool,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            namespace: default_namespace(),
            upstream_timeout_ms: default_upstream_timeout_ms(),
            concurrent_fetch: default_concurrent_fetch(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !is_metric_name(&self.namespace) {
            return Err(ExporterError::Startup(format!(
                "exporter.namespace is not a valid metric name prefix: {:?}",
                self.namespace
            )));
        }
        if !(100..=120000).contains(&self.upstream_timeout_ms) {
            return Err(ExporterError::Startup(
                "exporter.upstream_timeout_ms must be between 100 and 120000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ExporterError::Startup(format!("exporter.listen must be a valid SocketAddr: {e}"))
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

fn is_metric_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_namespace() -> String {
    "ethermine".into()
}
fn default_upstream_timeout_ms() -> u64 {
    10000
}
fn default_concurrent_fetch() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurrencyConfig {
    pub symbol: String,
    pub base_units_per_unit: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoolConfig {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub api_url: String,
}

fn currency(symbol: &str, base_units_per_unit: f64) -> CurrencyConfig {
    CurrencyConfig {
        symbol: symbol.into(),
        base_units_per_unit,
    }
}

fn pool(id: &str, name: &str, currency: &str, api_url: &str) -> PoolConfig {
    PoolConfig {
        id: id.into(),
        name: name.into(),
        currency: currency.into(),
        api_url: api_url.into(),
    }
}

fn default_currencies() -> Vec<CurrencyConfig> {
    vec![
        currency("ETH", 1e18),
        currency("ETC", 1e18),
        currency("ZEC", 1.0),
        currency("RVN", 1.0),
        currency("BEAM", 1.0),
    ]
}

fn default_pools() -> Vec<PoolConfig> {
    vec![
        pool("ethermine", "Ethermine", "ETH", "https://api.ethermine.org"),
        pool("ethermine-etc", "ETC Ethermine", "ETC", "https://api-etc.ethermine.org"),
        pool("ethpool", "Ethpool", "ETH", "https://api.ethpool.org"),
        pool("flypool-zcash", "Zcash Flypool", "ZEC", "https://api-zcash.flypool.org"),
        pool("flypool-ravencoin", "Ravencoin Flypool", "RVN", "https://api-ravencoin.flypool.org"),
        pool("flypool-beam", "Flypool BEAM", "BEAM", "https://api-beam.flypool.org"),
    ]
}
