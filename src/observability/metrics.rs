//! Metrics collection and exposition.
//!
//! # Metrics
//! - `config_sync_refresh_total` (counter): refreshes by group, outcome
//! - `config_sync_dispatch_total` (counter): hook dispatches by group, event
//! - `config_sync_fetch_total` (counter): pull requests by group, outcome
//! - `config_sync_snapshot_timestamp` (gauge): last stored snapshot time, ms

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

use crate::model::{ConfigGroup, DataEventType};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_refresh(group: ConfigGroup, outcome: &'static str) {
    counter!(
        "config_sync_refresh_total",
        "group" => group.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_dispatch(group: ConfigGroup, event: DataEventType) {
    counter!(
        "config_sync_dispatch_total",
        "group" => group.as_str(),
        "event" => event.as_str()
    )
    .increment(1);
}

pub fn record_fetch(group: ConfigGroup, outcome: &'static str) {
    counter!(
        "config_sync_fetch_total",
        "group" => group.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_snapshot_timestamp(group: ConfigGroup, last_modified: i64) {
    gauge!("config_sync_snapshot_timestamp", "group" => group.as_str()).set(last_modified as f64);
}
