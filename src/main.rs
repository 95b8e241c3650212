#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod logging;

use clap::Parser;
use spa_serve::SpaServer;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::Config, logging::init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Keep guard alive so file logger flushes correctly
    let _log_guards = init_logging(&config);

    tracing::info!("=== Configuration ===");
    tracing::info!("Asset directory: {}", config.dir.display());
    tracing::info!("Bind address: {}", config.bind);
    tracing::info!("Base path: {}", config.base_path);
    tracing::info!("Entry document: {}", config.entry);
    tracing::info!(
        "Log file: {}",
        config
            .log_file
            .as_deref()
            .map_or_else(|| "<stdout only>".to_string(), |p| p.display().to_string())
    );
    tracing::info!("====================");

    if !config.dir.is_dir() {
        tracing::warn!(
            "Asset directory {} does not exist yet; requests will fail until it appears",
            config.dir.display()
        );
    }

    let spa = SpaServer::from_dir(&config.dir)
        .with_base_path(&config.base_path)
        .with_entry_file(&config.entry);

    let app = spa.into_router().layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("Listening on http://{}", config.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
