use std::collections::BTreeMap;

use poolscope_core::error::Result;
use poolscope_core::upstream::pool::{PoolSnapshot, ServerSample};
use poolscope_core::Target;

use super::registry::{MetricDescriptor, ScrapeRegistry};

/// Build the registry for `/pool`. `servers` must already be reduced to the
/// latest sample per server.
pub fn build_pool_registry(
    namespace: &str,
    target: &Target,
    snapshot: &PoolSnapshot,
    servers: &BTreeMap<String, ServerSample>,
) -> Result<ScrapeRegistry> {
    let mut reg = ScrapeRegistry::new(
        namespace,
        &[("pool", target.id.as_str()), ("pool_name", target.name.as_str())],
    );

    reg.exporter_info(crate::VERSION)?;
    reg.gauge(
        MetricDescriptor::new("pool", "info", "Metadata about the pool.")
            .label("currency", target.currency.symbol.as_str()),
    )?
    .set(1.0);

    let scalars = [
        ("hashrate_hps", "Current total hash rate of the pool (H/s).", snapshot.stats.hash_rate),
        ("miner_count", "Current total number of miners in the pool.", snapshot.stats.miner_count),
        ("worker_count", "Current total number of workers in the pool.", snapshot.stats.worker_count),
        ("price_usd", "Current price (USD).", snapshot.price.usd),
        ("price_btc", "Current price (BTC).", snapshot.price.btc),
    ];
    for (name, help, value) in scalars {
        reg.gauge(MetricDescriptor::new("pool", name, help))?.set(value);
    }

    let server_hashrate = reg.gauge_vec(
        MetricDescriptor::new(
            "pool",
            "server_hashrate_hps",
            "Current hash rate per server (H/s).",
        )
        .variable(&["server"]),
    )?;
    for (server, sample) in servers {
        server_hashrate
            .with_label_values(&[server.as_str()])
            .set(sample.hash_rate);
    }

    Ok(reg)
}
