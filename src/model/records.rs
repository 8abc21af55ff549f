//! Configuration record payloads and the outbound `ConfigData` envelope.
//!
//! The core never reads these fields. They exist so serde can produce the
//! canonical bytes the fingerprint is computed over and the JSON gateway
//! nodes download.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::event::ChangedRecords;
use crate::model::group::ConfigGroup;
use crate::source::{RecordLister, Sources};

/// A record type bound to exactly one configuration group.
pub trait ConfigRecord: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The group this record type belongs to.
    const GROUP: ConfigGroup;

    /// Stable identifier within the group.
    fn record_id(&self) -> &str;

    /// The collaborator that lists every record of this type.
    fn lister(sources: &Sources) -> &dyn RecordLister<Self>;

    /// Wrap a typed payload for group-keyed responses.
    fn into_group_data(data: ConfigData<Self>) -> GroupConfigData;

    /// Wrap changed records for a notification.
    fn into_changes(records: Vec<Self>) -> ChangedRecords;
}

/// Application authentication credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAuthData {
    pub app_key: String,
    pub app_secret: String,
    pub enabled: bool,
    #[serde(default)]
    pub param_data_list: Vec<AuthParamData>,
    #[serde(default)]
    pub path_data_list: Vec<AuthPathData>,
}

/// Per-application parameter attached to an auth record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthParamData {
    pub app_name: String,
    pub app_param: String,
}

/// Path an application is allowed to call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPathData {
    pub app_name: String,
    pub path: String,
    pub enabled: bool,
}

/// Plugin definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub config: Option<String>,
    #[serde(default)]
    pub role: i32,
    pub enabled: bool,
}

/// Match condition shared by selectors and rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionData {
    pub param_type: String,
    pub operator: String,
    pub param_name: String,
    pub param_value: String,
}

/// Selector narrowing the traffic a plugin applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorData {
    pub id: String,
    pub plugin_id: String,
    pub plugin_name: String,
    pub name: String,
    pub match_mode: i32,
    #[serde(rename = "type")]
    pub selector_type: i32,
    pub sort: i32,
    pub enabled: bool,
    pub logged: bool,
    pub continued: bool,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub condition_list: Vec<ConditionData>,
}

/// Rule evaluated once its selector matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleData {
    pub id: String,
    pub name: String,
    pub plugin_name: String,
    pub selector_id: String,
    pub match_mode: i32,
    pub sort: i32,
    pub enabled: bool,
    pub logged: bool,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub condition_data_list: Vec<ConditionData>,
}

impl ConfigRecord for AppAuthData {
    const GROUP: ConfigGroup = ConfigGroup::AppAuth;

    fn record_id(&self) -> &str {
        &self.app_key
    }

    fn lister(sources: &Sources) -> &dyn RecordLister<Self> {
        sources.app_auth.as_ref()
    }

    fn into_group_data(data: ConfigData<Self>) -> GroupConfigData {
        GroupConfigData::AppAuth(data)
    }

    fn into_changes(records: Vec<Self>) -> ChangedRecords {
        ChangedRecords::AppAuth(records)
    }
}

impl ConfigRecord for PluginData {
    const GROUP: ConfigGroup = ConfigGroup::Plugin;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn lister(sources: &Sources) -> &dyn RecordLister<Self> {
        sources.plugin.as_ref()
    }

    fn into_group_data(data: ConfigData<Self>) -> GroupConfigData {
        GroupConfigData::Plugin(data)
    }

    fn into_changes(records: Vec<Self>) -> ChangedRecords {
        ChangedRecords::Plugin(records)
    }
}

impl ConfigRecord for RuleData {
    const GROUP: ConfigGroup = ConfigGroup::Rule;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn lister(sources: &Sources) -> &dyn RecordLister<Self> {
        sources.rule.as_ref()
    }

    fn into_group_data(data: ConfigData<Self>) -> GroupConfigData {
        GroupConfigData::Rule(data)
    }

    fn into_changes(records: Vec<Self>) -> ChangedRecords {
        ChangedRecords::Rule(records)
    }
}

impl ConfigRecord for SelectorData {
    const GROUP: ConfigGroup = ConfigGroup::Selector;

    fn record_id(&self) -> &str {
        &self.id
    }

    fn lister(sources: &Sources) -> &dyn RecordLister<Self> {
        sources.selector.as_ref()
    }

    fn into_group_data(data: ConfigData<Self>) -> GroupConfigData {
        GroupConfigData::Selector(data)
    }

    fn into_changes(records: Vec<Self>) -> ChangedRecords {
        ChangedRecords::Selector(records)
    }
}

/// Payload answering a pull request: cached fingerprint and timestamp plus
/// the current record list.
///
/// Field names on the wire are what gateway nodes compare byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigData<T> {
    #[serde(rename = "md5")]
    pub fingerprint: String,
    #[serde(rename = "lastModifyTime")]
    pub last_modified: i64,
    #[serde(rename = "data")]
    pub records: Vec<T>,
}

impl<T> ConfigData<T> {
    pub fn new(fingerprint: String, last_modified: i64, records: Vec<T>) -> Self {
        Self {
            fingerprint,
            last_modified,
            records,
        }
    }
}

/// `ConfigData` for any group, for group-keyed responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupConfigData {
    AppAuth(ConfigData<AppAuthData>),
    Plugin(ConfigData<PluginData>),
    Rule(ConfigData<RuleData>),
    Selector(ConfigData<SelectorData>),
}

impl GroupConfigData {
    pub fn group(&self) -> ConfigGroup {
        match self {
            GroupConfigData::AppAuth(_) => ConfigGroup::AppAuth,
            GroupConfigData::Plugin(_) => ConfigGroup::Plugin,
            GroupConfigData::Rule(_) => ConfigGroup::Rule,
            GroupConfigData::Selector(_) => ConfigGroup::Selector,
        }
    }

    pub fn fingerprint(&self) -> &str {
        match self {
            GroupConfigData::AppAuth(d) => &d.fingerprint,
            GroupConfigData::Plugin(d) => &d.fingerprint,
            GroupConfigData::Rule(d) => &d.fingerprint,
            GroupConfigData::Selector(d) => &d.fingerprint,
        }
    }

    pub fn last_modified(&self) -> i64 {
        match self {
            GroupConfigData::AppAuth(d) => d.last_modified,
            GroupConfigData::Plugin(d) => d.last_modified,
            GroupConfigData::Rule(d) => d.last_modified,
            GroupConfigData::Selector(d) => d.last_modified,
        }
    }

    /// Number of records carried.
    pub fn len(&self) -> usize {
        match self {
            GroupConfigData::AppAuth(d) => d.records.len(),
            GroupConfigData::Plugin(d) => d.records.len(),
            GroupConfigData::Rule(d) => d.records.len(),
            GroupConfigData::Selector(d) => d.records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_data_wire_names() {
        let data = ConfigData::new(
            "abc".to_string(),
            1_700_000_000_123,
            vec![PluginData {
                id: "1".into(),
                name: "divide".into(),
                config: None,
                role: 0,
                enabled: true,
            }],
        );
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["md5"], "abc");
        assert_eq!(json["lastModifyTime"], 1_700_000_000_123i64);
        assert_eq!(json["data"][0]["name"], "divide");
    }

    #[test]
    fn test_selector_type_field_renamed() {
        let json = r#"{
            "id": "s1", "pluginId": "p1", "pluginName": "divide", "name": "all",
            "matchMode": 0, "type": 1, "sort": 1, "enabled": true,
            "logged": false, "continued": true
        }"#;
        let selector: SelectorData = serde_json::from_str(json).unwrap();
        assert_eq!(selector.selector_type, 1);
        assert!(selector.condition_list.is_empty());
        assert_eq!(selector.record_id(), "s1");
    }

    #[test]
    fn test_group_data_accessors() {
        let data = GroupConfigData::Rule(ConfigData::new("f".into(), 7, Vec::new()));
        assert_eq!(data.group(), ConfigGroup::Rule);
        assert_eq!(data.fingerprint(), "f");
        assert_eq!(data.last_modified(), 7);
        assert!(data.is_empty());
    }
}
