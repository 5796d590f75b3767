//! Revgate binary.
//!
//! Entry point for the revgate service: a read-only gateway that aggregates
//! CRM opportunity facts from the data warehouse and serves them as JSON to
//! the dashboard.

use clap::Parser;
use revgate_core::config::{Args, ServiceConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,revgate_core=debug")),
        )
        .with_target(true)
        .init();

    info!("revgate starting up");

    let args = Args::parse();
    let config = ServiceConfig::load(&args)?;
    revgate_core::server::serve(config).await
}
