//! Scrape endpoint handlers.
//!
//! Each request either renders a complete registry or a single plain-text
//! error; partial metric output is never written.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, TextEncoder};
use serde::Deserialize;

use poolscope_core::error::{ErrorClass, ExporterError};

use crate::app_state::AppState;
use crate::assemble::ScrapeRegistry;
use crate::pipeline;

/// Raw query pairs in request order. Repeated keys are kept; lookups take
/// the first occurrence.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ScrapeQuery(Vec<(String, String)>);

impl ScrapeQuery {
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// HTTP view of an `ExporterError`.
#[derive(Debug)]
pub struct ApiError(pub ExporterError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ExporterError::MissingParam(_) | ExporterError::InvalidTarget(_) => {
                StatusCode::BAD_REQUEST
            }
            ExporterError::TargetNotFound(_) | ExporterError::NoData => StatusCode::NOT_FOUND,
            ExporterError::Transport(_)
            | ExporterError::Malformed(_)
            | ExporterError::NotOk(_)
            | ExporterError::Assembly(_)
            | ExporterError::Startup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            ExporterError::MissingParam(what) => format!("Missing {what}."),
            ExporterError::InvalidTarget(_) => "Invalid pool.".into(),
            ExporterError::TargetNotFound(_) => "Pool not found.".into(),
            ExporterError::Transport(cause) => format!("Failed to scrape target: {cause}"),
            ExporterError::Malformed(_) => "Failed to parse scraped data.".into(),
            ExporterError::NotOk(_) => "API data not OK.".into(),
            ExporterError::NoData => "API data not found.".into(),
            ExporterError::Assembly(_) | ExporterError::Startup(_) => {
                "Failed to build metrics.".into()
            }
        }
    }
}

impl From<ExporterError> for ApiError {
    fn from(e: ExporterError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let class = self.0.class();
        if class == ErrorClass::ClientInput {
            tracing::debug!(error = %self.0, class = class.as_str(), "rejected scrape request");
        } else {
            tracing::warn!(error = %self.0, class = class.as_str(), "scrape failed");
        }
        let body = format!("{} - {}\n", status.as_u16(), self.message());
        (status, body).into_response()
    }
}

/// Encode a finished registry in the Prometheus text format.
pub fn render(registry: &ScrapeRegistry) -> Response {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    match encoder.encode(&registry.gather(), &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            buffer,
        )
            .into_response(),
        Err(e) => ApiError(ExporterError::Assembly(format!("encoding failed: {e}"))).into_response(),
    }
}

pub async fn pool_metrics(State(app): State<AppState>, Query(q): Query<ScrapeQuery>) -> Response {
    let pool = q.first("pool");
    tracing::debug!(endpoint = "pool", ?pool, "scrape request");
    match pipeline::pool_snapshot(&app, pool).await {
        Ok(registry) => render(&registry),
        Err(e) => ApiError(e).into_response(),
    }
}

pub async fn miner_metrics(State(app): State<AppState>, Query(q): Query<ScrapeQuery>) -> Response {
    let (pool, miner) = (q.first("pool"), q.first("target"));
    tracing::debug!(endpoint = "miner", ?pool, ?miner, "scrape request");
    match pipeline::miner_snapshot(&app, pool, miner).await {
        Ok(registry) => render(&registry),
        Err(e) => ApiError(e).into_response(),
    }
}
