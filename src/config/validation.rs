//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SyncConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::SyncConfig;

/// One semantic problem found in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &SyncConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "server.bind_address",
            message: format!("invalid socket address '{}'", config.server.bind_address),
        });
    }

    if config.resync.enabled && config.resync.interval_secs == 0 {
        errors.push(ValidationError {
            field: "resync.interval_secs",
            message: "must be greater than 0".to_string(),
        });
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError {
            field: "admin.api_key",
            message: "must not be empty when admin is enabled".to_string(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "invalid socket address '{}'",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
