//! Configuration data model.
//!
//! # Data Flow
//! ```text
//! backing store (external)
//!     → records.rs (AppAuthData, PluginData, RuleData, SelectorData)
//!     → event.rs (ChangeNotification: changed records + event type)
//!     → dispatcher refreshes the group named by group.rs
//!     → ConfigData<T> answers pull requests
//! ```
//!
//! # Design Decisions
//! - The group set is closed; adding a group means extending `ConfigGroup`
//!   and every match over it
//! - Records are opaque payloads to the core; only serde touches their fields
//! - The group of a notification is derived from its records, never passed twice

pub mod event;
pub mod group;
pub mod records;

pub use event::{ChangeNotification, ChangedRecords, DataEventType};
pub use group::ConfigGroup;
pub use records::{
    AppAuthData, AuthParamData, AuthPathData, ConditionData, ConfigData, ConfigRecord,
    GroupConfigData, PluginData, RuleData, SelectorData,
};
