//! Pull-side payload assembly.
//!
//! The cached fingerprint and timestamp are read first, then the record list
//! is queried separately. The list may therefore be slightly newer than the
//! fingerprint describes. That drift is accepted: the next refresh or re-sync
//! catches the cache up, and nodes re-pull when the fingerprint moves.

use std::sync::Arc;

use crate::cache::SnapshotCache;
use crate::error::{SyncError, SyncResult};
use crate::model::{
    AppAuthData, ConfigData, ConfigGroup, ConfigRecord, GroupConfigData, PluginData, RuleData,
    SelectorData,
};
use crate::observability::metrics;
use crate::source::Sources;

/// Builds `ConfigData` payloads from the cache and the record listers.
#[derive(Clone)]
pub struct SnapshotFetcher {
    cache: Arc<SnapshotCache>,
    sources: Sources,
}

impl SnapshotFetcher {
    pub fn new(cache: Arc<SnapshotCache>, sources: Sources) -> Self {
        Self { cache, sources }
    }

    /// Typed payload for `T`'s group.
    pub async fn fetch<T: ConfigRecord>(&self) -> SyncResult<ConfigData<T>> {
        let group = T::GROUP;
        let result = self.assemble::<T>().await;
        metrics::record_fetch(group, if result.is_ok() { "success" } else { "failure" });
        result
    }

    /// Payload for `group`.
    pub async fn fetch_group(&self, group: ConfigGroup) -> SyncResult<GroupConfigData> {
        Ok(match group {
            ConfigGroup::AppAuth => AppAuthData::into_group_data(self.fetch().await?),
            ConfigGroup::Plugin => PluginData::into_group_data(self.fetch().await?),
            ConfigGroup::Rule => RuleData::into_group_data(self.fetch().await?),
            ConfigGroup::Selector => SelectorData::into_group_data(self.fetch().await?),
        })
    }

    /// Payload for a wire group key. Unknown keys fail immediately.
    pub async fn fetch_by_key(&self, key: &str) -> SyncResult<GroupConfigData> {
        let group: ConfigGroup = key.parse()?;
        self.fetch_group(group).await
    }

    async fn assemble<T: ConfigRecord>(&self) -> SyncResult<ConfigData<T>> {
        let group = T::GROUP;
        if !self.cache.is_ready() {
            return Err(SyncError::NotReady(group));
        }
        let snapshot = self.cache.get(group).ok_or(SyncError::NotReady(group))?;

        let records = T::lister(&self.sources)
            .list_all()
            .await
            .map_err(|source| SyncError::Source { group, source })?;

        Ok(ConfigData::new(
            snapshot.fingerprint,
            snapshot.last_modified,
            records,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ConfigSnapshot;
    use crate::source::MemoryStore;

    fn rule(id: &str) -> RuleData {
        RuleData {
            id: id.into(),
            name: format!("rule-{id}"),
            plugin_name: "divide".into(),
            selector_id: "s1".into(),
            match_mode: 0,
            sort: 1,
            enabled: true,
            logged: true,
            handle: None,
            condition_data_list: Vec::new(),
        }
    }

    fn setup() -> (SnapshotFetcher, Arc<SnapshotCache>, Arc<MemoryStore>) {
        let cache = Arc::new(SnapshotCache::new());
        let store = Arc::new(MemoryStore::new());
        let fetcher = SnapshotFetcher::new(cache.clone(), Sources::from_store(store.clone()));
        (fetcher, cache, store)
    }

    #[tokio::test]
    async fn test_not_ready_before_bootstrap() {
        let (fetcher, cache, _) = setup();
        cache.put(ConfigSnapshot {
            group: ConfigGroup::Rule,
            fingerprint: "f".into(),
            last_modified: 1,
        });

        let err = fetcher.fetch::<RuleData>().await.unwrap_err();
        assert!(matches!(err, SyncError::NotReady(ConfigGroup::Rule)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_missing_group_not_ready() {
        let (fetcher, cache, _) = setup();
        cache.mark_ready();
        let err = fetcher.fetch_group(ConfigGroup::Selector).await.unwrap_err();
        assert!(matches!(err, SyncError::NotReady(ConfigGroup::Selector)));
    }

    #[tokio::test]
    async fn test_fetch_combines_snapshot_and_records() {
        let (fetcher, cache, store) = setup();
        store.upsert(vec![rule("2"), rule("1")]);
        cache.put(ConfigSnapshot {
            group: ConfigGroup::Rule,
            fingerprint: "0123abcd".into(),
            last_modified: 42,
        });
        cache.mark_ready();

        let data = fetcher.fetch::<RuleData>().await.unwrap();
        assert_eq!(data.fingerprint, "0123abcd");
        assert_eq!(data.last_modified, 42);
        assert_eq!(data.records.len(), 2);

        let by_key = fetcher.fetch_by_key("RULE").await.unwrap();
        assert_eq!(by_key.group(), ConfigGroup::Rule);
        assert_eq!(by_key.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_key_fails() {
        let (fetcher, cache, _) = setup();
        cache.mark_ready();
        let err = fetcher.fetch_by_key("META_DATA").await.unwrap_err();
        assert!(matches!(err, SyncError::UnknownGroup(_)));
        assert!(!err.is_retryable());
    }
}
