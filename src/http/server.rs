//! HTTP server setup.
//!
//! # Responsibilities
//! - Create Axum Router with the pull and admin handlers
//! - Wire up middleware (tracing)
//! - Serve until the shutdown broadcast fires

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::admin::setup_admin_router;
use crate::config::AdminConfig;
use crate::http::handlers::fetch_configs;
use crate::sync::{ChangeDispatcher, SnapshotFetcher};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: SnapshotFetcher,
    pub dispatcher: Arc<ChangeDispatcher>,
    pub admin: AdminConfig,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(dispatcher: Arc<ChangeDispatcher>, admin: AdminConfig) -> Self {
        let fetcher = SnapshotFetcher::new(dispatcher.cache().clone(), dispatcher.sources().clone());
        Self {
            fetcher,
            dispatcher,
            admin,
            started_at: Instant::now(),
        }
    }
}

/// HTTP server for the pull surface.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        let mut router = Router::new()
            .route("/configs/fetch", get(fetch_configs))
            .with_state(state.clone());

        if state.admin.enabled {
            router = router.merge(setup_admin_router(state));
        }

        router.layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
