//! Per-group change dispatch.
//!
//! # States
//! ```text
//! Idle → Idle:         notification with no changed records (skip)
//! Idle → Refreshing:   notification with changed records
//! Refreshing → Idle:   listing or serialization failed, snapshot kept
//! Refreshing → Dispatching: new snapshot stored
//! Dispatching → Idle:  hook invoked with the original changes
//! ```
//!
//! Each group runs its own machine. Refreshes of one group are serialized by
//! a per-group lock; different groups never wait on each other.

use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::cache::{ConfigSnapshot, PutOutcome, SnapshotCache};
use crate::error::{SyncError, SyncResult};
use crate::model::{
    AppAuthData, ChangeNotification, ConfigGroup, ConfigRecord, PluginData, RuleData,
    SelectorData,
};
use crate::observability::metrics;
use crate::source::Sources;
use crate::sync::fingerprint::fingerprint;
use crate::sync::hooks::ChangeHook;

/// How a notification was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No changed records; nothing refreshed, hook not called.
    Skipped,
    /// Snapshot refreshed and hook invoked.
    Dispatched,
    /// Refresh failed; previous snapshot kept, hook not called.
    RefreshFailed,
}

/// Refreshes group snapshots on change and hands changes to the transport hook.
pub struct ChangeDispatcher {
    cache: Arc<SnapshotCache>,
    sources: Sources,
    hook: Arc<dyn ChangeHook>,
    locks: [Mutex<()>; 4],
}

impl ChangeDispatcher {
    pub fn new(cache: Arc<SnapshotCache>, sources: Sources, hook: Arc<dyn ChangeHook>) -> Self {
        Self {
            cache,
            sources,
            hook,
            locks: Default::default(),
        }
    }

    pub fn cache(&self) -> &Arc<SnapshotCache> {
        &self.cache
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    /// Handle one change notification.
    ///
    /// Refresh failures are logged and reported through the outcome; they
    /// never reach the caller as errors.
    pub async fn notify(&self, notification: ChangeNotification) -> DispatchOutcome {
        let group = notification.group();
        if notification.is_empty() {
            tracing::debug!(group = %group, event = %notification.event_type, "Empty change, skipping");
            return DispatchOutcome::Skipped;
        }

        if let Err(e) = self.refresh(group).await {
            tracing::warn!(
                group = %group,
                error = %e,
                "Refresh failed, keeping previous snapshot"
            );
            return DispatchOutcome::RefreshFailed;
        }

        metrics::record_dispatch(group, notification.event_type);
        if let Err(e) = self.hook.on_changed(&notification).await {
            tracing::warn!(group = %group, error = %e, "Change hook failed");
        }
        DispatchOutcome::Dispatched
    }

    /// Recompute and store the snapshot for `group`.
    ///
    /// On error the cached snapshot is left as it was.
    pub async fn refresh(&self, group: ConfigGroup) -> SyncResult<ConfigSnapshot> {
        let _guard = self.locks[group.index()].lock().await;

        let result = match group {
            ConfigGroup::AppAuth => self.digest::<AppAuthData>().await,
            ConfigGroup::Plugin => self.digest::<PluginData>().await,
            ConfigGroup::Rule => self.digest::<RuleData>().await,
            ConfigGroup::Selector => self.digest::<SelectorData>().await,
        };

        let fingerprint = match result {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                metrics::record_refresh(group, "failure");
                return Err(e);
            }
        };

        let snapshot = ConfigSnapshot {
            group,
            fingerprint,
            last_modified: self.cache.next_timestamp(),
        };
        if self.cache.put(snapshot.clone()) == PutOutcome::Stale {
            // Only reachable if something outside this dispatcher wrote a newer
            // snapshot; the cached one stays authoritative.
            metrics::record_refresh(group, "stale");
            tracing::warn!(
                group = %group,
                last_modified = snapshot.last_modified,
                "Refreshed snapshot older than cached one, keeping cached"
            );
            return Ok(self.cache.get(group).unwrap_or(snapshot));
        }

        metrics::record_refresh(group, "success");
        tracing::debug!(
            group = %group,
            fingerprint = %snapshot.fingerprint,
            last_modified = snapshot.last_modified,
            "Snapshot refreshed"
        );
        Ok(snapshot)
    }

    /// Refresh every group concurrently. One group's failure does not affect
    /// the others.
    pub async fn refresh_all(&self) -> Vec<(ConfigGroup, SyncResult<ConfigSnapshot>)> {
        let results = join_all(ConfigGroup::ALL.iter().map(|g| self.refresh(*g))).await;
        ConfigGroup::ALL.into_iter().zip(results).collect()
    }

    async fn digest<T: ConfigRecord>(&self) -> SyncResult<String> {
        let records = T::lister(&self.sources)
            .list_all()
            .await
            .map_err(|source| SyncError::Source {
                group: T::GROUP,
                source,
            })?;
        fingerprint(&records)
    }
}
