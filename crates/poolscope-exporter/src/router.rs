//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::index))
        .route("/healthz", get(ops::healthz))
        .route("/pool", get(transport::http::pool_metrics))
        .route("/miner", get(transport::http::miner_metrics))
        .fallback(ops::not_found)
        .with_state(state)
}
