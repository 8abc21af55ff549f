//! Configuration group enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SyncError;

/// One of the configuration categories synchronized to gateway nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigGroup {
    /// Application key/secret authentication rules.
    AppAuth,
    /// Plugin definitions.
    Plugin,
    /// Routing rules attached to selectors.
    Rule,
    /// Traffic selectors attached to plugins.
    Selector,
}

impl ConfigGroup {
    /// Every group, in bootstrap order.
    pub const ALL: [ConfigGroup; 4] = [
        ConfigGroup::AppAuth,
        ConfigGroup::Plugin,
        ConfigGroup::Rule,
        ConfigGroup::Selector,
    ];

    /// Wire key used by gateway nodes (`APP_AUTH`, `PLUGIN`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigGroup::AppAuth => "APP_AUTH",
            ConfigGroup::Plugin => "PLUGIN",
            ConfigGroup::Rule => "RULE",
            ConfigGroup::Selector => "SELECTOR",
        }
    }

    /// Dense index, used for per-group lock tables.
    pub(crate) fn index(&self) -> usize {
        match self {
            ConfigGroup::AppAuth => 0,
            ConfigGroup::Plugin => 1,
            ConfigGroup::Rule => 2,
            ConfigGroup::Selector => 3,
        }
    }
}

impl fmt::Display for ConfigGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigGroup {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "APP_AUTH" => Ok(ConfigGroup::AppAuth),
            "PLUGIN" => Ok(ConfigGroup::Plugin),
            "RULE" => Ok(ConfigGroup::Rule),
            "SELECTOR" => Ok(ConfigGroup::Selector),
            other => Err(SyncError::UnknownGroup(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keys_round_trip() {
        for group in ConfigGroup::ALL {
            assert_eq!(group.as_str().parse::<ConfigGroup>().unwrap(), group);
        }
        assert_eq!(
            serde_json::to_string(&ConfigGroup::AppAuth).unwrap(),
            "\"APP_AUTH\""
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = "META_DATA".parse::<ConfigGroup>().unwrap_err();
        assert!(matches!(err, SyncError::UnknownGroup(ref key) if key == "META_DATA"));
        assert!("plugin".parse::<ConfigGroup>().is_err());
    }

    #[test]
    fn test_indices_are_dense() {
        let mut seen: Vec<usize> = ConfigGroup::ALL.iter().map(|g| g.index()).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
