//! Transport hooks invoked after a successful refresh.
//!
//! The concrete transport to gateway nodes (long-poll release, message bus,
//! watch store, direct push) lives behind `ChangeHook`; this module ships
//! two small implementations.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::error::HookError;
use crate::model::{ChangeNotification, ConfigGroup, DataEventType};

/// Propagates a group change to subscribers.
///
/// Receives the records from the original notification, not the refreshed
/// full list. Failures are the hook's own concern; the dispatcher logs them
/// and moves on.
#[async_trait]
pub trait ChangeHook: Send + Sync {
    async fn on_changed(&self, notification: &ChangeNotification) -> Result<(), HookError>;
}

/// Writes one structured log line per change.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHook;

#[async_trait]
impl ChangeHook for LoggingHook {
    async fn on_changed(&self, notification: &ChangeNotification) -> Result<(), HookError> {
        tracing::info!(
            group = %notification.group(),
            event = %notification.event_type,
            records = notification.changed.len(),
            "Config group changed"
        );
        Ok(())
    }
}

/// Event published by `BroadcastHook`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChanged {
    pub group: ConfigGroup,
    pub event_type: DataEventType,
    pub records: usize,
}

/// Publishes a `GroupChanged` event to in-process subscribers, e.g. a
/// push transport that tells gateway nodes to re-pull.
#[derive(Debug, Clone)]
pub struct BroadcastHook {
    tx: broadcast::Sender<GroupChanged>,
}

impl BroadcastHook {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GroupChanged> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[async_trait]
impl ChangeHook for BroadcastHook {
    async fn on_changed(&self, notification: &ChangeNotification) -> Result<(), HookError> {
        let event = GroupChanged {
            group: notification.group(),
            event_type: notification.event_type,
            records: notification.changed.len(),
        };
        // No subscribers yet is fine; nodes pull on connect anyway.
        if self.tx.send(event).is_err() {
            tracing::debug!(group = %notification.group(), "No change subscribers");
        }
        Ok(())
    }
}
