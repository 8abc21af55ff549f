use axum::{extract::State, Json};
use serde::Serialize;

use crate::cache::ConfigSnapshot;
use crate::http::server::AppState;
use crate::model::ConfigGroup;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub ready: bool,
    pub cached_groups: usize,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct GroupSyncResult {
    pub group: ConfigGroup,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<ConfigSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let cache = state.dispatcher.cache();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        ready: cache.is_ready(),
        cached_groups: cache.len(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

pub async fn get_snapshots(State(state): State<AppState>) -> Json<Vec<ConfigSnapshot>> {
    Json(state.dispatcher.cache().snapshots())
}

/// Refresh every group now. Failures are reported per group.
pub async fn post_sync(State(state): State<AppState>) -> Json<Vec<GroupSyncResult>> {
    tracing::info!("Manual re-sync requested");
    let results = state
        .dispatcher
        .refresh_all()
        .await
        .into_iter()
        .map(|(group, result)| match result {
            Ok(snapshot) => GroupSyncResult {
                group,
                snapshot: Some(snapshot),
                error: None,
            },
            Err(e) => GroupSyncResult {
                group,
                snapshot: None,
                error: Some(e.to_string()),
            },
        })
        .collect();
    Json(results)
}
