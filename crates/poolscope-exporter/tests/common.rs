//! Shared fixtures for exporter integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use tower::ServiceExt;

use poolscope_core::error::{ExporterError, Result};
use poolscope_exporter::{app_state::AppState, config, router, scrape::UpstreamFetcher};

pub const API: &str = "http://upstream.test";

/// Canned upstream: URL -> body. Unknown URLs fail like a refused connection.
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, String>,
    delay: Option<Duration>,
    path_delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, body: &str) -> Self {
        self.responses.insert(format!("{API}{path}"), body.to_string());
        self
    }

    /// Like `respond`, but this path answers only after `delay`.
    pub fn respond_after(mut self, path: &str, body: &str, delay: Duration) -> Self {
        self.path_delays.insert(format!("{API}{path}"), delay);
        self.respond(path, body)
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(d) = self.path_delays.get(url).copied().or(self.delay) {
            tokio::time::sleep(d).await;
        }
        self.responses
            .get(url)
            .map(|b| Bytes::from(b.clone()))
            .ok_or_else(|| ExporterError::Transport("connection refused".into()))
    }
}

pub fn test_config(extra_exporter: &str) -> config::ExporterConfig {
    let yaml = format!(
        r#"
version: 1
exporter:
  upstream_timeout_ms: 500
{extra_exporter}
currencies:
  - {{ symbol: "ETH", base_units_per_unit: 1.0e18 }}
  - {{ symbol: "ZEC", base_units_per_unit: 1 }}
pools:
  - {{ id: "ethermine", name: "Ethermine", currency: "ETH", api_url: "{API}" }}
  - {{ id: "flypool-zcash", name: "Zcash Flypool", currency: "ZEC", api_url: "{API}/zcash" }}
"#
    );
    config::load_from_str(&yaml).unwrap()
}

pub struct Harness {
    pub fetcher: Arc<StubFetcher>,
    pub state: AppState,
}

impl Harness {
    pub fn new(fetcher: StubFetcher) -> Self {
        Self::with_config(fetcher, test_config(""))
    }

    pub fn with_config(fetcher: StubFetcher, cfg: config::ExporterConfig) -> Self {
        let fetcher = Arc::new(fetcher);
        let state = AppState::with_fetcher(cfg, fetcher.clone()).unwrap();
        Self { fetcher, state }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let app = router::build_router(self.state.clone());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}

/// Exposition lines of `name` whose label set contains every `(k, v)`.
pub fn samples<'a>(body: &'a str, name: &str, labels: &[(&str, &str)]) -> Vec<&'a str> {
    body.lines()
        .filter(|l| !l.starts_with('#'))
        .filter(|l| l.starts_with(&format!("{name}{{")) || l.starts_with(&format!("{name} ")))
        .filter(|l| labels.iter().all(|(k, v)| l.contains(&format!("{k}=\"{v}\""))))
        .collect()
}

/// Value of the single sample matching `name` and `labels`.
pub fn value(body: &str, name: &str, labels: &[(&str, &str)]) -> f64 {
    let found = samples(body, name, labels);
    assert_eq!(found.len(), 1, "expected one sample of {name} {labels:?}, got {found:?}");
    found[0].rsplit(' ').next().unwrap().parse().unwrap()
}

pub const POOL_STATS: &str = r#"{"status":"OK","data":{"poolStats":{"hashRate":1000,"miners":5,"workers":7},"price":{"usd":2.5,"btc":0.0001}}}"#;

pub const SERVER_HISTORY: &str = r#"{"status":"OK","data":[
    {"time":100,"hashrate":10,"server":"eu1"},
    {"time":200,"hashrate":20,"server":"eu1"},
    {"time":150,"hashrate":42,"server":"us1"}
]}"#;

pub const MINER_STATS: &str = r#"{"status":"OK","data":{
    "time":1600000600,"lastSeen":1600000540,
    "reportedHashrate":100000000,"currentHashrate":95000000,"averageHashrate":90000000,
    "validShares":120,"invalidShares":1,"staleShares":3,"activeWorkers":2,
    "unpaid":250000000000000000,"unconfirmed":null,
    "coinsPerMin":0.00006,"usdPerMin":0.12,"btcPerMin":0.0000036
}}"#;

pub const WORKERS: &str = r#"{"status":"OK","data":[
    {"worker":"rig1","time":1600000600,"lastSeen":1600000590,"reportedHashrate":60000000,"currentHashrate":58000000,"validShares":70,"invalidShares":0,"staleShares":2},
    {"worker":"rig2","time":1600000600,"lastSeen":1600000500,"reportedHashrate":40000000,"currentHashrate":37000000,"validShares":50,"invalidShares":1,"staleShares":1}
]}"#;
