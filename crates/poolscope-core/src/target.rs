//! Target metadata: pools, their currencies, and the read-only catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{ExporterError, Result};

/// Currency scale metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    /// Ticker symbol, e.g. "ETH".
    pub symbol: String,
    /// Number of upstream base units in one whole unit (e.g. wei per ether).
    pub base_units_per_unit: f64,
}

impl Currency {
    pub fn new(symbol: impl Into<String>, base_units_per_unit: f64) -> Self {
        Self {
            symbol: symbol.into(),
            base_units_per_unit,
        }
    }

    /// Convert an upstream base-unit amount into whole units.
    pub fn to_display_units(&self, raw: f64) -> f64 {
        raw / self.base_units_per_unit
    }
}

/// A configured upstream pool.
#[derive(Debug, Clone)]
pub struct Target {
    /// Short id used in request query strings.
    pub id: String,
    /// Human-readable pool name.
    pub name: String,
    /// API root, without trailing slash.
    pub api_url: String,
    pub currency: Currency,
}

impl Target {
    /// Join a path suffix onto the API root.
    pub fn endpoint(&self, suffix: &str) -> String {
        format!("{}{}", self.api_url, suffix)
    }
}

/// Immutable id -> target lookup table, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct TargetCatalog {
    targets: BTreeMap<String, Arc<Target>>,
}

impl TargetCatalog {
    /// Build a catalog. Duplicate ids are rejected.
    pub fn new(targets: impl IntoIterator<Item = Target>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for t in targets {
            let id = t.id.clone();
            if map.insert(id.clone(), Arc::new(t)).is_some() {
                return Err(ExporterError::Startup(format!("duplicate pool id: {id}")));
            }
        }
        Ok(Self { targets: map })
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, id: &str) -> Result<Arc<Target>> {
        self.targets
            .get(id)
            .cloned()
            .ok_or_else(|| ExporterError::InvalidTarget(id.to_string()))
    }

    /// Configured ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
