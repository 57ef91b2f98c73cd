//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Compile the header gate before anything is bound
//! - Create the Axum router with the forwarding handler
//! - Wire up middleware (tracing, timeout, header gate)
//! - Serve until shutdown is signalled

use std::time::Duration;

use axum::{http::uri::InvalidUri, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::gate::{BlockHeaderLayer, CompilationError};
use crate::http::upstream::{forward_handler, Upstream};

/// Reasons the server could not be built.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Gate(#[from] CompilationError),

    #[error("invalid upstream address: {0}")]
    Upstream(#[from] InvalidUri),
}

/// HTTP server hosting the header gate in front of one upstream.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server. Fails if any gate rule does not compile.
    pub fn new(config: ProxyConfig) -> Result<Self, StartupError> {
        let gate = BlockHeaderLayer::from_config(&config.gate)?;
        let upstream = Upstream::new(&config.upstream.address)?;

        let router = Self::build_router(&config, gate, upstream);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost first: trace, timeout, gate, then forwarding.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, gate: BlockHeaderLayer, upstream: Upstream) -> Router {
        Router::new()
            .fallback(forward_handler)
            .with_state(upstream)
            .layer(gate)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            gate = %self.config.gate.name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// The assembled router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
