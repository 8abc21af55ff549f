//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the sync service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SyncConfig {
    /// Pull endpoint listener.
    pub server: ServerConfig,

    /// Admin endpoints.
    pub admin: AdminConfig,

    /// Periodic re-sync of the snapshot cache.
    pub resync: ResyncConfig,

    /// Record store seed.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:9095").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9095".to_string(),
        }
    }
}

/// Admin endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount `/admin/*` routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Periodic re-sync configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResyncConfig {
    /// Enable periodic re-sync.
    pub enabled: bool,

    /// Seconds between passes.
    pub interval_secs: u64,
}

impl Default for ResyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 300,
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file the in-memory store is seeded from. Empty store when unset.
    pub seed_path: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: SyncConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:9095");
        assert!(config.resync.enabled);
        assert_eq!(config.resync.interval_secs, 300);
        assert!(config.store.seed_path.is_none());
        assert!(!config.admin.enabled);
    }

    #[test]
    fn test_partial_section_override() {
        let config: SyncConfig = toml::from_str(
            r#"
            [resync]
            interval_secs = 60

            [store]
            seed_path = "seed.json"
            "#,
        )
        .unwrap();
        assert!(config.resync.enabled);
        assert_eq!(config.resync.interval_secs, 60);
        assert_eq!(config.store.seed_path.as_deref(), Some("seed.json"));
    }
}
