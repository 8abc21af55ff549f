//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use config_sync::error::{HookError, SourceError};
use config_sync::model::{AppAuthData, ChangeNotification, PluginData, RuleData};
use config_sync::source::{MemoryStore, RecordLister, Sources};
use config_sync::sync::{ChangeDispatcher, ChangeHook};
use config_sync::SnapshotCache;

/// Lister wrapping the shared store that can be switched off, with an
/// optional delay to widen race windows.
pub struct SwitchableLister {
    pub store: Arc<MemoryStore>,
    pub down: AtomicBool,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl SwitchableLister {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            down: AtomicBool::new(false),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecordLister<PluginData> for SwitchableLister {
    async fn list_all(&self) -> Result<Vec<PluginData>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.down.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("plugin service down".into()));
        }
        RecordLister::<PluginData>::list_all(self.store.as_ref()).await
    }
}

/// Hook that keeps every notification it sees.
#[derive(Default)]
pub struct RecordingHook {
    pub seen: Mutex<Vec<ChangeNotification>>,
}

impl RecordingHook {
    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl ChangeHook for RecordingHook {
    async fn on_changed(&self, notification: &ChangeNotification) -> Result<(), HookError> {
        self.seen.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub plugins: Arc<SwitchableLister>,
    pub hook: Arc<RecordingHook>,
    pub cache: Arc<SnapshotCache>,
    pub dispatcher: Arc<ChangeDispatcher>,
}

/// Dispatcher over an in-memory store, with the plugin lister switchable.
pub fn harness() -> Harness {
    harness_with(|lister| lister)
}

pub fn harness_with(customize: impl FnOnce(SwitchableLister) -> SwitchableLister) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let plugins = Arc::new(customize(SwitchableLister::new(store.clone())));
    let hook = Arc::new(RecordingHook::default());
    let cache = Arc::new(SnapshotCache::new());

    let mut sources = Sources::from_store(store.clone());
    sources.plugin = plugins.clone();
    let dispatcher = Arc::new(ChangeDispatcher::new(cache.clone(), sources, hook.clone()));

    Harness {
        store,
        plugins,
        hook,
        cache,
        dispatcher,
    }
}

pub fn plugin(id: &str, name: &str) -> PluginData {
    PluginData {
        id: id.into(),
        name: name.into(),
        config: None,
        role: 0,
        enabled: true,
    }
}

pub fn app_auth(key: &str) -> AppAuthData {
    AppAuthData {
        app_key: key.into(),
        app_secret: format!("{key}-secret"),
        enabled: true,
        param_data_list: Vec::new(),
        path_data_list: Vec::new(),
    }
}

pub fn rule(id: &str) -> RuleData {
    RuleData {
        id: id.into(),
        name: format!("rule-{id}"),
        plugin_name: "divide".into(),
        selector_id: "s1".into(),
        match_mode: 0,
        sort: 1,
        enabled: true,
        logged: false,
        handle: None,
        condition_data_list: Vec::new(),
    }
}
