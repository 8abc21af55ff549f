//! Record-listing collaborators.
//!
//! # Responsibilities
//! - Define the `RecordLister` seam the core reads full group state through
//! - Map each group to its lister (`Sources`)
//! - Provide an in-memory store usable as the lister for every group
//!
//! # Ordering Contract
//! Listers may return records in any order. The fingerprint engine sorts the
//! canonical serialization itself, so two listings of the same set always
//! fingerprint equally.

pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::SourceError;
use crate::model::{AppAuthData, PluginData, RuleData, SelectorData};

pub use memory::MemoryStore;

/// Lists every current record of one group.
///
/// Called on every refresh and every fetch, so it should be cheap and must
/// return a complete view of the group.
#[async_trait]
pub trait RecordLister<T>: Send + Sync {
    async fn list_all(&self) -> Result<Vec<T>, SourceError>;
}

/// The lister bound to each configuration group.
#[derive(Clone)]
pub struct Sources {
    pub app_auth: Arc<dyn RecordLister<AppAuthData>>,
    pub plugin: Arc<dyn RecordLister<PluginData>>,
    pub rule: Arc<dyn RecordLister<RuleData>>,
    pub selector: Arc<dyn RecordLister<SelectorData>>,
}

impl Sources {
    /// Use one store that lists every group.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: RecordLister<AppAuthData>
            + RecordLister<PluginData>
            + RecordLister<RuleData>
            + RecordLister<SelectorData>
            + 'static,
    {
        Self {
            app_auth: store.clone(),
            plugin: store.clone(),
            rule: store.clone(),
            selector: store,
        }
    }
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources").finish_non_exhaustive()
    }
}
