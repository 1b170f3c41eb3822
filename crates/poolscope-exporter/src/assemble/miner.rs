use poolscope_core::error::Result;
use poolscope_core::upstream::miner::{MinerSnapshot, WorkerSample};
use poolscope_core::Target;

use super::registry::{MetricDescriptor, ScrapeRegistry};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Build the registry for `/miner`.
///
/// Balances arrive in base units and are scaled by the pool currency. Income
/// arrives per minute in whole coins; both per-second and the deprecated
/// per-minute views are exposed.
pub fn build_miner_registry(
    namespace: &str,
    target: &Target,
    miner: &str,
    stats: &MinerSnapshot,
    workers: &[WorkerSample],
) -> Result<ScrapeRegistry> {
    let mut reg = ScrapeRegistry::new(namespace, &[("pool", target.id.as_str()), ("miner", miner)]);
    let currency = target.currency.symbol.as_str();

    reg.exporter_info(crate::VERSION)?;
    reg.gauge(
        MetricDescriptor::new("miner", "info", "Metadata about the miner.")
            .label("pool_name", target.name.as_str())
            .label("pool_currency", currency),
    )?
    .set(1.0);

    let scalars = [
        (
            "last_seen_seconds",
            "Delta between time of last statistics entry and when any workers from the miner was last seen (s).",
            stats.last_seen_delta(),
        ),
        ("hashrate_reported_hps", "Total hash rate for a miner as reported by the miner (H/s).", stats.reported_hashrate),
        ("hashrate_current_hps", "Total current hash rate for a miner (H/s).", stats.current_hashrate),
        ("hashrate_average_hps", "Total average hash rate for a miner (H/s).", stats.average_hashrate),
        ("shares_valid", "Total number of valid shares for a miner.", stats.valid_shares),
        ("shares_invalid", "Total number of invalid shares for a miner.", stats.invalid_shares),
        ("shares_stale", "Total number of stale shares for a miner.", stats.stale_shares),
        ("workers_active", "Number of active workers.", stats.active_workers),
        ("income_usd", "Mined coins per second (converted to USD).", stats.usd_per_minute / SECONDS_PER_MINUTE),
        ("income_btc", "Mined coins per second (converted to BTC).", stats.btc_per_minute / SECONDS_PER_MINUTE),
        ("income_minute_usd", "(Deprecated) Mined coins per minute (converted to USD).", stats.usd_per_minute),
        ("income_minute_btc", "(Deprecated) Mined coins per minute (converted to BTC).", stats.btc_per_minute),
    ];
    for (name, help, value) in scalars {
        reg.gauge(MetricDescriptor::new("miner", name, help))?.set(value);
    }

    let coins = [
        (
            "balance_unpaid_coins",
            "Unpaid balance for a miner.",
            target.currency.to_display_units(stats.unpaid_base_units),
        ),
        (
            "balance_unconfirmed_coins",
            "Unconfirmed balance for a miner.",
            target.currency.to_display_units(stats.unconfirmed_base_units),
        ),
        ("income_coins", "Mined coins per second.", stats.coins_per_minute / SECONDS_PER_MINUTE),
        ("income_minute_coins", "(Deprecated) Mined coins per minute.", stats.coins_per_minute),
    ];
    for (name, help, value) in coins {
        reg.gauge(MetricDescriptor::new("miner", name, help).label("currency", currency))?
            .set(value);
    }

    let worker = |name: &'static str, help: &'static str| {
        MetricDescriptor::new("worker", name, help).variable(&["worker"])
    };
    let last_seen = reg.gauge_vec(worker(
        "last_seen_seconds",
        "Delta between time of last statistics entry and when the worker was last seen (s).",
    ))?;
    let reported = reg.gauge_vec(worker(
        "hashrate_reported_hps",
        "Current hash rate for a worker as reported from the worker (H/s).",
    ))?;
    let current = reg.gauge_vec(worker("hashrate_current_hps", "Current hash rate for a worker (H/s)."))?;
    let valid = reg.gauge_vec(worker("shares_valid", "Number of valid shares for a worker."))?;
    let invalid = reg.gauge_vec(worker("shares_invalid", "Number of invalid shares for a worker."))?;
    let stale = reg.gauge_vec(worker("shares_stale", "Number of stale shares for a worker."))?;

    for w in workers {
        let labels = [w.name.as_str()];
        last_seen.with_label_values(&labels).set(w.last_seen_delta());
        reported.with_label_values(&labels).set(w.reported_hashrate);
        current.with_label_values(&labels).set(w.current_hashrate);
        valid.with_label_values(&labels).set(w.valid_shares);
        invalid.with_label_values(&labels).set(w.invalid_shares);
        stale.with_label_values(&labels).set(w.stale_shares);
    }

    Ok(reg)
}
