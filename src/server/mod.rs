pub mod error;
pub mod routes;

use anyhow::{Context, Result};
use log::info;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::trivia::TriviaOrchestrator;

pub use error::ApiError;
pub use routes::{router, AppState};

/// Binds and serves until ctrl-c.
pub async fn serve(config: &ServerConfig, orchestrator: TriviaOrchestrator) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server starting on {addr}");
    axum::serve(listener, router(orchestrator))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
