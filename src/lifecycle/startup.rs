//! Startup bootstrap of the snapshot cache.
//!
//! # Responsibilities
//! - Refresh every group once, as if each had changed
//! - Log each group's failure on its own; keep loading the rest
//! - Mark the cache ready so pulls are answered
//!
//! # Design Decisions
//! - Groups load concurrently; there is no ordering dependency between them
//! - The hook is not invoked; there are no subscribers to tell yet

use serde::Serialize;

use crate::model::ConfigGroup;
use crate::sync::dispatcher::ChangeDispatcher;

/// Which groups loaded during bootstrap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub loaded: Vec<ConfigGroup>,
    pub failed: Vec<ConfigGroup>,
}

impl BootstrapReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Initial fill of the cache. Always marks the cache ready, even when some
/// groups failed; those groups answer "not ready" until a later refresh.
pub async fn bootstrap(dispatcher: &ChangeDispatcher) -> BootstrapReport {
    let mut report = BootstrapReport::default();

    for (group, result) in dispatcher.refresh_all().await {
        match result {
            Ok(snapshot) => {
                tracing::info!(
                    group = %group,
                    fingerprint = %snapshot.fingerprint,
                    "Group snapshot loaded"
                );
                report.loaded.push(group);
            }
            Err(e) => {
                tracing::warn!(group = %group, error = %e, "Failed to load group snapshot");
                report.failed.push(group);
            }
        }
    }

    dispatcher.cache().mark_ready();
    tracing::info!(
        loaded = report.loaded.len(),
        failed = report.failed.len(),
        "Snapshot cache bootstrap complete"
    );
    report
}
