//! In-memory record store.
//!
//! Stands in for the database-backed services: it lists every group and
//! turns writes into the `ChangeNotification`s the dispatcher consumes.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::SourceError;
use crate::model::{
    AppAuthData, ChangeNotification, ConfigRecord, DataEventType, PluginData, RuleData,
    SelectorData,
};
use crate::source::RecordLister;

/// A record type with a table in `MemoryStore`.
pub trait StoreTable: ConfigRecord {
    fn table(store: &MemoryStore) -> &DashMap<String, Self>;
}

/// Seed file layout.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeedData {
    pub app_auth: Vec<AppAuthData>,
    pub plugins: Vec<PluginData>,
    pub rules: Vec<RuleData>,
    pub selectors: Vec<SelectorData>,
}

/// Thread-safe record tables, one per group, keyed by record id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    app_auth: DashMap<String, AppAuthData>,
    plugins: DashMap<String, PluginData>,
    rules: DashMap<String, RuleData>,
    selectors: DashMap<String, SelectorData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding `seed`.
    pub fn from_seed(seed: SeedData) -> Self {
        let store = Self::new();
        store.insert_all(seed.app_auth);
        store.insert_all(seed.plugins);
        store.insert_all(seed.rules);
        store.insert_all(seed.selectors);
        store
    }

    /// Load a JSON seed file.
    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let seed: SeedData = serde_json::from_reader(BufReader::new(file))?;
        let store = Self::from_seed(seed);
        tracing::info!(
            path = %path.display(),
            app_auth = store.app_auth.len(),
            plugins = store.plugins.len(),
            rules = store.rules.len(),
            selectors = store.selectors.len(),
            "Loaded seed records"
        );
        Ok(store)
    }

    /// Insert or replace records.
    ///
    /// The event is `Create` when none of the ids existed, `Update` otherwise.
    pub fn upsert<T: StoreTable>(&self, records: Vec<T>) -> ChangeNotification {
        let table = T::table(self);
        let mut existed = false;
        for record in &records {
            existed |= table
                .insert(record.record_id().to_string(), record.clone())
                .is_some();
        }
        let event_type = if existed {
            DataEventType::Update
        } else {
            DataEventType::Create
        };
        ChangeNotification::new(records, event_type)
    }

    /// Remove records by id. Ids that are not present are ignored, so the
    /// notification may be empty.
    pub fn remove<T: StoreTable>(&self, ids: &[&str]) -> ChangeNotification {
        let table = T::table(self);
        let removed: Vec<T> = ids
            .iter()
            .filter_map(|id| table.remove(*id).map(|(_, record)| record))
            .collect();
        ChangeNotification::new(removed, DataEventType::Delete)
    }

    /// Number of records held for `T`'s group.
    pub fn count<T: StoreTable>(&self) -> usize {
        T::table(self).len()
    }

    fn insert_all<T: StoreTable>(&self, records: Vec<T>) {
        let table = T::table(self);
        for record in records {
            table.insert(record.record_id().to_string(), record);
        }
    }
}

impl StoreTable for AppAuthData {
    fn table(store: &MemoryStore) -> &DashMap<String, Self> {
        &store.app_auth
    }
}

impl StoreTable for PluginData {
    fn table(store: &MemoryStore) -> &DashMap<String, Self> {
        &store.plugins
    }
}

impl StoreTable for RuleData {
    fn table(store: &MemoryStore) -> &DashMap<String, Self> {
        &store.rules
    }
}

impl StoreTable for SelectorData {
    fn table(store: &MemoryStore) -> &DashMap<String, Self> {
        &store.selectors
    }
}

#[async_trait]
impl<T: StoreTable> RecordLister<T> for MemoryStore {
    async fn list_all(&self) -> Result<Vec<T>, SourceError> {
        let mut records: Vec<T> = T::table(self).iter().map(|r| r.value().clone()).collect();
        records.sort_by(|a, b| a.record_id().cmp(b.record_id()));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConfigGroup;
    use std::io::Write;

    fn plugin(id: &str, name: &str) -> PluginData {
        PluginData {
            id: id.into(),
            name: name.into(),
            config: None,
            role: 0,
            enabled: true,
        }
    }

    #[tokio::test]
    async fn test_upsert_and_list() {
        let store = MemoryStore::new();
        let created = store.upsert(vec![plugin("2", "waf"), plugin("1", "divide")]);
        assert_eq!(created.event_type, DataEventType::Create);
        assert_eq!(created.group(), ConfigGroup::Plugin);

        let updated = store.upsert(vec![plugin("1", "divide-v2")]);
        assert_eq!(updated.event_type, DataEventType::Update);

        let listed = RecordLister::<PluginData>::list_all(&store).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "divide-v2");
        assert_eq!(listed[1].id, "2");
    }

    #[tokio::test]
    async fn test_remove_missing_is_empty() {
        let store = MemoryStore::new();
        store.upsert(vec![plugin("1", "divide")]);

        let removed = store.remove::<PluginData>(&["1", "404"]);
        assert_eq!(removed.event_type, DataEventType::Delete);
        assert_eq!(removed.changed.len(), 1);

        let again = store.remove::<PluginData>(&["1"]);
        assert!(again.is_empty());
        assert_eq!(store.count::<PluginData>(), 0);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"plugins": [{{"id": "1", "name": "divide", "enabled": true}}],
                "appAuth": [{{"appKey": "k", "appSecret": "s", "enabled": false}}]}}"#
        )
        .unwrap();

        let store = MemoryStore::load_from_file(file.path()).unwrap();
        assert_eq!(store.count::<PluginData>(), 1);
        assert_eq!(store.count::<AppAuthData>(), 1);
        assert_eq!(store.count::<RuleData>(), 0);

        let auth = RecordLister::<AppAuthData>::list_all(&store).await.unwrap();
        assert_eq!(auth[0].app_key, "k");
    }

    #[test]
    fn test_demo_seed_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demo/seed.json");
        let store = MemoryStore::load_from_file(&path).unwrap();
        assert_eq!(store.count::<PluginData>(), 3);
        assert_eq!(store.count::<SelectorData>(), 1);
        assert_eq!(store.count::<RuleData>(), 1);
        assert_eq!(store.count::<AppAuthData>(), 1);
    }
}
