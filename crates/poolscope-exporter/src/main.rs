//! poolscope exporter
//!
//! - Pool metrics:  /pool?pool=<pool>
//! - Miner metrics: /miner?pool=<pool>&target=<miner-address>

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use poolscope_core::error::{ExporterError, Result};
use poolscope_exporter::{app_state, config, router};

#[derive(Debug, Parser)]
#[command(name = "poolscope-exporter", version, about = "Prometheus exporter for mining pool APIs")]
struct Args {
    /// Show debug messages.
    #[arg(long)]
    debug: bool,

    /// The address-port endpoint to bind to (overrides exporter.listen).
    #[arg(long)]
    endpoint: Option<String>,

    /// YAML config file. The built-in pool table is used when omitted.
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    fmt().with_env_filter(filter).init();

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "exporter stopped");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    tracing::info!("{} version {}", poolscope_exporter::NAME, poolscope_exporter::VERSION);
    tracing::debug!("debug mode enabled");

    let mut cfg = match args.config.as_deref() {
        Some(path) => config::load_from_file(path)?,
        None => config::ExporterConfig::default(),
    };
    if let Some(endpoint) = args.endpoint {
        cfg.exporter.listen = endpoint;
    }
    let listen: SocketAddr = cfg.exporter.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "listening");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ExporterError::Startup(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::Startup(format!("error while running HTTP server: {e}")))
}
