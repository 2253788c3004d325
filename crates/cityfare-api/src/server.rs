//! Listener lifecycle: bind, signal readiness, serve until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::handlers::AppState;
use crate::routes::routes;

/// Bind the API listener and serve until a shutdown signal arrives.
///
/// `on_ready` is invoked exactly once with the bound address after the
/// listener binds; startup notifications to external systems hook in here.
///
/// # Errors
/// Returns an error if the listener cannot bind.
pub async fn serve(
    state: AppState,
    addr: SocketAddr,
    on_ready: impl FnOnce(SocketAddr),
) -> Result<()> {
    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, shutdown_signal())
        .context("Failed to bind API listener")?;

    on_ready(bound);
    server.await;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            // Keep serving if the signal handler cannot be installed
            tracing::error!("Failed to install shutdown handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
