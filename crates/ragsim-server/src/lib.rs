//! HTTP server for the ragsim resource allocation graph simulator.
//!
//! # Architecture
//!
//! The server consists of:
//! - **Routes**: one JSON endpoint per engine operation
//! - **Protocol**: the request/response body types
//! - **Error**: engine failures mapped to HTTP statuses
//!
//! One [`ragsim_core::AllocationGraph`] lives behind a `tokio` `RwLock` in
//! [`AppState`]; each request runs as a single lock hold, so concurrent
//! calls are linearizable and never observe a half-applied transition.

pub mod error;
pub mod protocol;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

pub use error::{ApiError, ApiResult};
pub use routes::{AppState, create_router};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Start the ragsim server with a fresh graph.
pub async fn serve(config: ServerConfig) -> ApiResult<()> {
    let state = Arc::new(AppState::new());
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| ApiError::Address(format!("{}:{}", config.host, config.port)))?;

    tracing::info!("Starting ragsim server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Handle Ctrl+C for graceful shutdown
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.await;
    });

    server.await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
