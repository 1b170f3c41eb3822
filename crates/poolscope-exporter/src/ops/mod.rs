//! Operational HTTP endpoints.
//!
//! - `/`        : exporter banner, configured pools, usage
//! - `/healthz` : liveness
//! - fallback   : plain 404

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::app_state::AppState;

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let pools: String = state
        .catalog()
        .ids()
        .into_iter()
        .map(|id| format!("- {id}\n"))
        .collect();
    let body = format!(
        "{name} version {version}.\n\nPool IDs:\n{pools}\nMetrics paths:\n\
         - Pool: /pool?pool=<pool>\n\
         - Miner: /miner?pool=<pool>&target=<miner-address>\n",
        name = crate::NAME,
        version = crate::VERSION,
    );
    (StatusCode::OK, body)
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 - Page not found.\n")
}
