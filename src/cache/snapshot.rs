//! Group snapshot storage.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::cache::clock::MonotonicClock;
use crate::model::ConfigGroup;
use crate::observability::metrics;

/// Last successfully observed state of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub group: ConfigGroup,
    pub fingerprint: String,
    pub last_modified: i64,
}

/// Result of writing a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// First snapshot for the group.
    Inserted,
    /// Replaced an older snapshot.
    Replaced,
    /// Rejected: the cached snapshot is at least as recent.
    Stale,
}

/// Concurrent map of group → latest snapshot.
///
/// Created once at startup and shared through `Arc` for the life of the
/// process. Entries are only ever inserted or replaced, never removed.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    entries: DashMap<ConfigGroup, ConfigSnapshot>,
    clock: MonotonicClock,
    ready: AtomicBool,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot for `group`, if one has been stored.
    pub fn get(&self, group: ConfigGroup) -> Option<ConfigSnapshot> {
        self.entries.get(&group).map(|r| r.value().clone())
    }

    /// Store `snapshot` unless the cached one is at least as recent.
    pub fn put(&self, snapshot: ConfigSnapshot) -> PutOutcome {
        let group = snapshot.group;
        let last_modified = snapshot.last_modified;
        let outcome = match self.entries.entry(group) {
            Entry::Vacant(slot) => {
                slot.insert(snapshot);
                PutOutcome::Inserted
            }
            Entry::Occupied(mut slot) => {
                if last_modified > slot.get().last_modified {
                    slot.insert(snapshot);
                    PutOutcome::Replaced
                } else {
                    PutOutcome::Stale
                }
            }
        };

        if outcome == PutOutcome::Stale {
            tracing::debug!(group = %group, last_modified, "Rejected stale snapshot");
        } else {
            metrics::record_snapshot_timestamp(group, last_modified);
        }
        outcome
    }

    /// Timestamp for a snapshot about to be written.
    pub fn next_timestamp(&self) -> i64 {
        self.clock.next()
    }

    /// All cached snapshots ordered by group.
    pub fn snapshots(&self) -> Vec<ConfigSnapshot> {
        let mut all: Vec<_> = self.entries.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|s| s.group);
        all
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Called once bootstrap has attempted every group.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn snapshot(group: ConfigGroup, fingerprint: &str, last_modified: i64) -> ConfigSnapshot {
        ConfigSnapshot {
            group,
            fingerprint: fingerprint.to_string(),
            last_modified,
        }
    }

    #[test]
    fn test_cache_operations() {
        let cache = SnapshotCache::new();
        assert!(cache.get(ConfigGroup::Plugin).is_none());
        assert!(!cache.is_ready());

        assert_eq!(cache.put(snapshot(ConfigGroup::Plugin, "a", 10)), PutOutcome::Inserted);
        assert_eq!(cache.put(snapshot(ConfigGroup::Plugin, "b", 20)), PutOutcome::Replaced);
        assert_eq!(cache.get(ConfigGroup::Plugin).unwrap().fingerprint, "b");
        assert_eq!(cache.len(), 1);

        cache.mark_ready();
        assert!(cache.is_ready());
    }

    #[test]
    fn test_older_write_rejected() {
        let cache = SnapshotCache::new();
        cache.put(snapshot(ConfigGroup::Rule, "new", 200));

        assert_eq!(cache.put(snapshot(ConfigGroup::Rule, "old", 100)), PutOutcome::Stale);
        assert_eq!(cache.put(snapshot(ConfigGroup::Rule, "same", 200)), PutOutcome::Stale);

        let current = cache.get(ConfigGroup::Rule).unwrap();
        assert_eq!(current.fingerprint, "new");
        assert_eq!(current.last_modified, 200);
    }

    #[test]
    fn test_groups_are_independent() {
        let cache = SnapshotCache::new();
        cache.put(snapshot(ConfigGroup::Selector, "s", 500));
        assert_eq!(cache.put(snapshot(ConfigGroup::AppAuth, "a", 1)), PutOutcome::Inserted);

        let all = cache.snapshots();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].group, ConfigGroup::AppAuth);
        assert_eq!(all[1].group, ConfigGroup::Selector);
    }

    #[test]
    fn test_concurrent_writers_keep_newest() {
        let cache = Arc::new(SnapshotCache::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let ts = cache.next_timestamp();
                        cache.put(snapshot(ConfigGroup::Plugin, &format!("{t}-{i}"), ts));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let last = cache.get(ConfigGroup::Plugin).unwrap();
        assert_eq!(last.last_modified, cache.clock.last());
    }
}
