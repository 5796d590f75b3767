//! HTTP server assembly and lifecycle.

mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;

use crate::config::ServiceConfig;
use crate::warehouse::adbc::AdbcConnector;
use crate::warehouse::{ConnectionManager, QueryExecutor};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the gateway until shutdown is requested.
///
/// Validates the warehouse bundle up front; the session itself is only
/// opened when the first query arrives.
pub async fn serve(config: ServiceConfig) -> Result<()> {
    config
        .warehouse
        .validate()
        .context("warehouse configuration")?;

    let connector = AdbcConnector::new(config.warehouse.clone());
    let manager = ConnectionManager::new(
        connector,
        &config.warehouse.warehouse,
        &config.warehouse.schema,
    );
    let executor = QueryExecutor::new(Arc::new(manager));
    let state = AppState::new(Arc::new(executor));

    let addr = config.server.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            tracing::warn!("failed to listen for shutdown signal: {}", e);
            // Without a signal handler there is nothing to wait for; park so
            // the server keeps serving instead of shutting down immediately.
            std::future::pending::<()>().await;
        }
    }
}
