//! Per-request scrape pipeline.
//!
//! `ResolveTarget -> Scrape -> Validate -> (Reduce) -> Assemble`. The first
//! failure ends the request; nothing is retried.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;

use poolscope_core::error::{ErrorClass, ExporterError, Result};
use poolscope_core::reduce::reduce_latest;
use poolscope_core::upstream::envelope::validate;
use poolscope_core::upstream::miner::{MinerSnapshot, WorkerSample};
use poolscope_core::upstream::pool::{PoolSnapshot, ServerSample};
use poolscope_core::upstream::{
    miner_stats_path, miner_workers_path, POOL_SERVERS_PATH, POOL_STATS_PATH,
};

use crate::app_state::AppState;
use crate::assemble::{build_miner_registry, build_pool_registry, ScrapeRegistry};
use crate::scrape::UpstreamFetcher;

/// Treat an absent or empty query parameter as missing.
pub fn required<'a>(value: Option<&'a str>, what: &'static str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ExporterError::MissingParam(what)),
    }
}

/// Fetch one upstream URL and validate it into `T`.
pub async fn scrape<T: DeserializeOwned>(fetcher: &dyn UpstreamFetcher, url: &str) -> Result<T> {
    let raw = fetcher.fetch(url).await?;
    validate::<T>(&raw).map_err(|e| {
        if e.class() == ErrorClass::UpstreamLogical {
            tracing::debug!(
                %url,
                error = %e,
                raw = %String::from_utf8_lossy(&raw),
                "failed to validate upstream data"
            );
        }
        e
    })
}

/// Run two upstream calls under one deadline, concurrently or in order.
///
/// Both modes report the first call's error when both fail, so the response
/// does not depend on which upstream answered faster.
async fn join_upstream<A, B, FA, FB>(
    concurrent: bool,
    deadline: Duration,
    a: FA,
    b: FB,
) -> Result<(A, B)>
where
    FA: Future<Output = Result<A>>,
    FB: Future<Output = Result<B>>,
{
    let work = async move {
        if concurrent {
            let (a, b) = tokio::join!(a, b);
            Ok::<_, ExporterError>((a?, b?))
        } else {
            let a = a.await?;
            let b = b.await?;
            Ok::<_, ExporterError>((a, b))
        }
    };
    tokio::time::timeout(deadline, work).await.map_err(|_| {
        ExporterError::Transport(format!("upstream deadline of {}ms exceeded", deadline.as_millis()))
    })?
}

/// `/pool?pool=<id>`
pub async fn pool_snapshot(app: &AppState, pool: Option<&str>) -> Result<ScrapeRegistry> {
    let pool_id = required(pool, "pool")?;
    let target = app.catalog().resolve(pool_id)?;

    let fetcher = app.fetcher();
    let stats_url = target.endpoint(POOL_STATS_PATH);
    let servers_url = target.endpoint(POOL_SERVERS_PATH);
    let (stats, servers) = join_upstream(
        app.cfg().exporter.concurrent_fetch,
        app.cfg().exporter.upstream_timeout(),
        scrape::<PoolSnapshot>(fetcher, &stats_url),
        scrape::<Vec<ServerSample>>(fetcher, &servers_url),
    )
    .await?;

    let latest = reduce_latest(&servers);
    tracing::debug!(pool = %target.id, samples = servers.len(), servers = latest.len(), "reduced server history");

    build_pool_registry(app.namespace(), &target, &stats, &latest)
}

/// `/miner?pool=<id>&target=<address>`
pub async fn miner_snapshot(
    app: &AppState,
    pool: Option<&str>,
    miner: Option<&str>,
) -> Result<ScrapeRegistry> {
    let pool_id = required(pool, "pool")?;
    let target = app.catalog().resolve(pool_id).map_err(|e| match e {
        ExporterError::InvalidTarget(id) => ExporterError::TargetNotFound(id),
        other => other,
    })?;
    let miner = required(miner, "miner address")?;

    let fetcher = app.fetcher();
    let stats_url = target.endpoint(&miner_stats_path(miner));
    let workers_url = target.endpoint(&miner_workers_path(miner));
    let (stats, workers) = join_upstream(
        app.cfg().exporter.concurrent_fetch,
        app.cfg().exporter.upstream_timeout(),
        scrape::<MinerSnapshot>(fetcher, &stats_url),
        scrape::<Vec<WorkerSample>>(fetcher, &workers_url),
    )
    .await?;

    build_miner_registry(app.namespace(), &target, miner, &stats, &workers)
}
