//! Gateway config sync service.
//!
//! # Architecture Overview
//!
//! ```text
//!   backing store ──change──▶ ChangeDispatcher ──refresh──▶ SnapshotCache
//!        │                          │                            │
//!        │                          └──hook──▶ transport         │
//!        │                                                       │
//!        └──────list──────▶ SnapshotFetcher ◀──fingerprint───────┘
//!                                  │
//!   gateway node ◀──/configs/fetch─┘
//! ```
//!
//! Startup order: config → logging/metrics → record store → bootstrap →
//! re-sync task → HTTP listener.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;

use config_sync::config::{load_config, SyncConfig};
use config_sync::http::{AppState, HttpServer};
use config_sync::lifecycle::{bootstrap, signals::shutdown_signal, Shutdown};
use config_sync::observability::{logging, metrics};
use config_sync::source::{MemoryStore, Sources};
use config_sync::sync::{ChangeDispatcher, LoggingHook, ResyncTask};
use config_sync::SnapshotCache;

#[derive(Parser)]
#[command(name = "config-sync")]
#[command(about = "Config snapshot cache and sync service for gateway nodes", long_about = None)]
struct Cli {
    /// Path to the TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SyncConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("config-sync v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = match &config.store.seed_path {
        Some(path) => MemoryStore::load_from_file(Path::new(path))?,
        None => MemoryStore::new(),
    };

    let cache = Arc::new(SnapshotCache::new());
    let dispatcher = Arc::new(ChangeDispatcher::new(
        cache,
        Sources::from_store(Arc::new(store)),
        Arc::new(LoggingHook),
    ));

    let report = bootstrap(&dispatcher).await;
    if !report.is_complete() {
        tracing::warn!(failed = ?report.failed, "Some groups are not ready yet");
    }

    let shutdown = Shutdown::new();

    let resync = ResyncTask::new(dispatcher.clone(), config.resync.clone());
    let resync_shutdown = shutdown.subscribe();
    let resync_handle = tokio::spawn(async move {
        resync.run(resync_shutdown).await;
    });

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for pull requests");

    let server = HttpServer::new(AppState::new(dispatcher, config.admin.clone()));
    let server_shutdown = shutdown.subscribe();
    let server_handle = tokio::spawn(server.run(listener, server_shutdown));

    shutdown_signal().await;
    shutdown.trigger();

    if let Err(e) = server_handle.await? {
        tracing::error!(error = %e, "HTTP server exited with error");
    }
    if let Err(e) = resync_handle.await {
        tracing::error!(error = %e, "Re-sync task exited abnormally");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
