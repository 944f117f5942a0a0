//! booster service
//!
//! A small HTTP service demonstrating runtime configuration reload and
//! orchestrator health probes.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!                 │                   booster                     │
//!                 │                                               │
//!  ConfigSource   │  ┌──────────┐  publish  ┌──────────────┐      │
//!  (file/http) ───┼─▶│ reloader │──────────▶│ SharedConfig │──┐   │
//!                 │  └────┬─────┘           └──────────────┘  │   │
//!                 │       │ log level                         ▼   │
//!                 │       ▼                           ┌──────────┐│
//!                 │  ┌──────────┐                     │  router  ││◀── HTTP
//!                 │  │ logging  │   ┌─────────────┐   │ greeting ││
//!                 │  └──────────┘   │ HealthState │──▶│ probes   ││
//!                 │                 └─────▲───────┘   │ products ││
//!                 │    bind → online ─────┤           └────┬─────┘│
//!                 │    killme → offline ──┴────────────────┘      │
//!                 └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use booster::config::{load_config, validation::validate_config, ConfigError, ServiceConfig};
use booster::lifecycle::{signals, Application, Shutdown};
use booster::observability::{self, metrics};
use booster::reload::build_source;

#[derive(Parser)]
#[command(name = "booster")]
#[command(about = "Greeting service with live configuration reload", long_about = None)]
struct Args {
    /// Service configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Override the dynamic configuration file path.
    #[arg(long)]
    source_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(path) = args.source_path {
        config.source.path = Some(path);
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    let settings = observability::init_logging(&config.observability)?;

    tracing::info!("booster v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        source = ?config.source.kind,
        reload_interval_ms = config.reload.interval_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let source = build_source(&config.source);
    let app = Application::build(&config, source, Arc::new(settings)).await?;
    tracing::info!(address = %app.local_addr(), "Listening for connections");

    let shutdown = Shutdown::new();
    signals::forward_signals(shutdown.clone());
    app.run(shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
