//! Admin endpoints: service status, cached snapshots, forced re-sync.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/snapshots", get(get_snapshots))
        .route("/admin/sync", post(post_sync))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}
