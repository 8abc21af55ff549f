//! Error types shared by the sync core.

use thiserror::Error;

use crate::model::ConfigGroup;

/// Errors raised by a record-listing collaborator.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backing store could not be reached.
    #[error("record source unavailable: {0}")]
    Unavailable(String),

    /// The query itself failed.
    #[error("record query failed: {0}")]
    Query(String),
}

/// Errors raised by a transport hook. Logged by the dispatcher, never retried.
#[derive(Debug, Error)]
#[error("transport hook failed: {0}")]
pub struct HookError(pub String);

/// Errors surfaced by the snapshot cache, dispatcher and fetcher.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A group key outside the known set was requested.
    #[error("unexpected group key: {0}")]
    UnknownGroup(String),

    /// No snapshot is available yet for the group.
    #[error("config group {0} is not ready, retry later")]
    NotReady(ConfigGroup),

    /// Records could not be serialized for fingerprinting.
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The listing collaborator failed.
    #[error("failed to list {group} records: {source}")]
    Source {
        group: ConfigGroup,
        #[source]
        source: SourceError,
    },
}

impl SyncError {
    /// Whether a caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::NotReady(_))
    }
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyncError::UnknownGroup("META".into());
        assert_eq!(err.to_string(), "unexpected group key: META");

        let err = SyncError::Source {
            group: ConfigGroup::Plugin,
            source: SourceError::Unavailable("db down".into()),
        };
        assert!(err.to_string().contains("PLUGIN"));
        assert!(err.to_string().contains("db down"));
    }

    #[test]
    fn test_only_not_ready_is_retryable() {
        assert!(SyncError::NotReady(ConfigGroup::Rule).is_retryable());
        assert!(!SyncError::UnknownGroup("x".into()).is_retryable());
        assert!(!SyncError::Source {
            group: ConfigGroup::Rule,
            source: SourceError::Query("bad".into()),
        }
        .is_retryable());
    }
}
