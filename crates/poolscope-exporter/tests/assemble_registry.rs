#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::BTreeMap;

use prometheus::proto::MetricFamily;

use poolscope_core::reduce::reduce_latest;
use poolscope_core::upstream::miner::MinerSnapshot;
use poolscope_core::upstream::pool::{PoolSnapshot, ServerSample};
use poolscope_core::{Currency, ErrorClass, Target};
use poolscope_exporter::assemble::{
    build_miner_registry, build_pool_registry, MetricDescriptor, ScrapeRegistry,
};

fn ethermine() -> Target {
    Target {
        id: "ethermine".into(),
        name: "Ethermine".into(),
        api_url: "https://api.ethermine.org".into(),
        currency: Currency::new("ETH", 1e18),
    }
}

fn family<'a>(families: &'a [MetricFamily], name: &str) -> Option<&'a MetricFamily> {
    families.iter().find(|f| f.get_name() == name)
}

fn label<'a>(m: &'a prometheus::proto::Metric, name: &str) -> Option<&'a str> {
    m.get_label()
        .iter()
        .find(|l| l.get_name() == name)
        .map(|l| l.get_value())
}

#[test]
fn duplicate_metric_is_assembly_error() {
    let mut reg = ScrapeRegistry::new("ethermine", &[("pool", "ethermine")]);
    reg.gauge(MetricDescriptor::new("pool", "hashrate_hps", "Hash rate."))
        .unwrap();
    let err = reg
        .gauge(MetricDescriptor::new("pool", "hashrate_hps", "Hash rate."))
        .expect_err("second registration must fail");
    assert_eq!(err.class(), ErrorClass::Assembly);
    assert_eq!(reg.families(), ["ethermine_pool_hashrate_hps".to_string()]);
}

#[test]
fn registry_labels_apply_to_every_metric() {
    let mut reg = ScrapeRegistry::new("ns", &[("pool", "p1")]);
    reg.exporter_info("9.9.9").unwrap();
    reg.gauge_vec(MetricDescriptor::new("pool", "server_hashrate_hps", "x").variable(&["server"]))
        .unwrap()
        .with_label_values(&["eu1"])
        .set(3.0);

    let families = reg.gather();
    let info = family(&families, "ns_exporter_info").unwrap();
    assert_eq!(label(&info.get_metric()[0], "version"), Some("9.9.9"));
    assert_eq!(label(&info.get_metric()[0], "pool"), Some("p1"));

    let servers = family(&families, "ns_pool_server_hashrate_hps").unwrap();
    let m = &servers.get_metric()[0];
    assert_eq!(label(m, "server"), Some("eu1"));
    assert_eq!(label(m, "pool"), Some("p1"));
    assert_eq!(m.get_gauge().get_value(), 3.0);
}

#[test]
fn pool_registry_keeps_one_sample_per_server() {
    let snapshot: PoolSnapshot = serde_json::from_str(
        r#"{"poolStats":{"hashRate":1000,"miners":5,"workers":7},"price":{"usd":2.5,"btc":0.0001}}"#,
    )
    .unwrap();
    let history = vec![
        ServerSample { server: "eu1".into(), time: 100, hash_rate: 10.0 },
        ServerSample { server: "eu1".into(), time: 200, hash_rate: 20.0 },
    ];
    let reg = build_pool_registry("ethermine", &ethermine(), &snapshot, &reduce_latest(&history))
        .unwrap();

    let families = reg.gather();
    let servers = family(&families, "ethermine_pool_server_hashrate_hps").unwrap();
    assert_eq!(servers.get_metric().len(), 1);
    assert_eq!(servers.get_metric()[0].get_gauge().get_value(), 20.0);

    let hashrate = family(&families, "ethermine_pool_hashrate_hps").unwrap();
    assert_eq!(hashrate.get_metric()[0].get_gauge().get_value(), 1000.0);
    assert_eq!(label(&hashrate.get_metric()[0], "pool_name"), Some("Ethermine"));
}

#[test]
fn empty_collections_still_register_families() {
    let reg = build_pool_registry(
        "ethermine",
        &ethermine(),
        &PoolSnapshot::default(),
        &BTreeMap::new(),
    )
    .unwrap();
    assert!(reg
        .families()
        .contains(&"ethermine_pool_server_hashrate_hps".to_string()));
    assert!(family(&reg.gather(), "ethermine_pool_server_hashrate_hps").is_none());

    let reg = build_miner_registry(
        "ethermine",
        &ethermine(),
        "0xabc",
        &MinerSnapshot::default(),
        &[],
    )
    .unwrap();
    let worker_families: Vec<&String> = reg
        .families()
        .iter()
        .filter(|n| n.starts_with("ethermine_worker_"))
        .collect();
    assert_eq!(worker_families.len(), 6);
    assert!(reg
        .gather()
        .iter()
        .all(|f| !f.get_name().starts_with("ethermine_worker_")));
}

#[test]
fn miner_registry_converts_base_units() {
    let stats = MinerSnapshot {
        unpaid_base_units: 1.5e18,
        unconfirmed_base_units: 5e17,
        coins_per_minute: 0.6,
        ..Default::default()
    };
    let reg = build_miner_registry("ethermine", &ethermine(), "0xabc", &stats, &[]).unwrap();
    let families = reg.gather();

    let unpaid = family(&families, "ethermine_miner_balance_unpaid_coins").unwrap();
    let m = &unpaid.get_metric()[0];
    assert!((m.get_gauge().get_value() - 1.5).abs() < 1e-12);
    assert_eq!(label(m, "currency"), Some("ETH"));
    assert_eq!(label(m, "miner"), Some("0xabc"));

    let unconfirmed = family(&families, "ethermine_miner_balance_unconfirmed_coins").unwrap();
    assert!((unconfirmed.get_metric()[0].get_gauge().get_value() - 0.5).abs() < 1e-12);

    let per_second = family(&families, "ethermine_miner_income_coins").unwrap();
    assert!((per_second.get_metric()[0].get_gauge().get_value() - 0.01).abs() < 1e-12);
    let per_minute = family(&families, "ethermine_miner_income_minute_coins").unwrap();
    assert_eq!(per_minute.get_metric()[0].get_gauge().get_value(), 0.6);
}
