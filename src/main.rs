//! Price service (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!   GET /?ticker=BTC
//!   ──────────────▶ ┌──────────┐   ┌────────────┐   ┌──────────────┐   ┌─────────────────────┐   ┌─────────────┐
//!                   │ listener │──▶│ dispatcher │──▶│ PriceHandler │──▶│ InstrumentedFetcher │──▶│ MockFetcher │
//!   ◀────────────── │  (axum)  │◀──│ (envelope) │◀──│              │◀──│  (FetchRecord log)  │◀──│  (table)    │
//!   200 {"ticker","price"} / 500 {"error"}
//!                   └──────────┘   └────────────┘   └──────────────┘   └─────────────────────┘   └─────────────┘
//! ```

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use price_service::config::{load_config, validate_config, ConfigError, ServiceConfig};
use price_service::http::{self, PriceServer};
use price_service::lifecycle::Shutdown;
use price_service::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "price-service")]
#[command(about = "Serves JSON price quotes over HTTP", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The listen address of the server (overrides the config file)
    #[arg(short, long, alias = "listenAddr")]
    listen_addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(addr) = args.listen_addr {
        config.listener.bind_address = addr;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability);
    tracing::info!("price-service v{} starting", env!("CARGO_PKG_VERSION"));

    let bind_address = config.listener.resolved_address();
    tracing::info!(
        bind_address = %bind_address,
        path = %config.server.path,
        request_timeout_ms = config.server.request_timeout_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = match http::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = PriceServer::from_config(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
