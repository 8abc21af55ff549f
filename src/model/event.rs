//! Change notifications emitted by the backing store.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::group::ConfigGroup;
use crate::model::records::{AppAuthData, ConfigRecord, PluginData, RuleData, SelectorData};

/// Kind of change that produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataEventType {
    /// Records were added.
    Create,
    /// Records were modified.
    Update,
    /// Records were removed.
    Delete,
    /// The whole group was reloaded.
    Refresh,
    /// Change originated from this node.
    Myself,
}

impl DataEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataEventType::Create => "CREATE",
            DataEventType::Update => "UPDATE",
            DataEventType::Delete => "DELETE",
            DataEventType::Refresh => "REFRESH",
            DataEventType::Myself => "MYSELF",
        }
    }
}

impl fmt::Display for DataEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The records touched by one change, tagged with their group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChangedRecords {
    AppAuth(Vec<AppAuthData>),
    Plugin(Vec<PluginData>),
    Rule(Vec<RuleData>),
    Selector(Vec<SelectorData>),
}

impl ChangedRecords {
    pub fn group(&self) -> ConfigGroup {
        match self {
            ChangedRecords::AppAuth(_) => ConfigGroup::AppAuth,
            ChangedRecords::Plugin(_) => ConfigGroup::Plugin,
            ChangedRecords::Rule(_) => ConfigGroup::Rule,
            ChangedRecords::Selector(_) => ConfigGroup::Selector,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChangedRecords::AppAuth(r) => r.len(),
            ChangedRecords::Plugin(r) => r.len(),
            ChangedRecords::Rule(r) => r.len(),
            ChangedRecords::Selector(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A change reported for one group. Consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeNotification {
    pub changed: ChangedRecords,
    pub event_type: DataEventType,
}

impl ChangeNotification {
    pub fn new<T: ConfigRecord>(records: Vec<T>, event_type: DataEventType) -> Self {
        Self {
            changed: T::into_changes(records),
            event_type,
        }
    }

    pub fn group(&self) -> ConfigGroup {
        self.changed.group()
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugin(id: &str) -> PluginData {
        PluginData {
            id: id.into(),
            name: format!("plugin-{id}"),
            config: None,
            role: 0,
            enabled: true,
        }
    }

    #[test]
    fn test_group_derived_from_records() {
        let n = ChangeNotification::new(vec![plugin("1"), plugin("2")], DataEventType::Update);
        assert_eq!(n.group(), ConfigGroup::Plugin);
        assert_eq!(n.changed.len(), 2);
        assert!(!n.is_empty());
    }

    #[test]
    fn test_empty_notification() {
        let n = ChangeNotification::new(Vec::<RuleData>::new(), DataEventType::Delete);
        assert_eq!(n.group(), ConfigGroup::Rule);
        assert!(n.is_empty());
    }

    #[test]
    fn test_event_type_wire_name() {
        assert_eq!(serde_json::to_string(&DataEventType::Create).unwrap(), "\"CREATE\"");
        assert_eq!(DataEventType::Myself.to_string(), "MYSELF");
    }
}
