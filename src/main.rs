//! Header gate proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────┐
//!     ────────────────────┼─▶ trace ─▶ timeout ─▶ header gate ─┐          │
//!                         │                       │ match     │ no match │
//!     ◀── 403 ────────────┼───────────────────────┘           ▼          │
//!                         │                               forward ───────┼──▶ Upstream
//!     ◀── upstream resp ──┼───────────────────────────────────◀──────────┼───
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use header_gate::config::{load_config, ProxyConfig};
use header_gate::lifecycle::signals::shutdown_on_signal;
use header_gate::observability::init_logging;
use header_gate::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "header-gate")]
#[command(about = "Block requests by header regex in front of an upstream", long_about = None)]
struct Cli {
    /// Configuration file (TOML, or JSON with a .json extension).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load the configuration, compile every rule, then exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        rules = config.gate.rules.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Rules compile here; a bad pattern stops startup before anything is bound.
    let server = HttpServer::new(config)?;

    if cli.check {
        tracing::info!("Configuration OK");
        return Ok(());
    }

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown_on_signal(&shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
