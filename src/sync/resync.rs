//! Periodic re-sync of every group.
//!
//! # Responsibilities
//! - Re-run the refresh step for all groups on a fixed interval
//! - Correct drift between the cache and the backing store
//!
//! Refreshes only; the transport hook is not invoked. Nodes notice a moved
//! fingerprint on their next pull.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::config::ResyncConfig;
use crate::sync::dispatcher::ChangeDispatcher;

pub struct ResyncTask {
    dispatcher: Arc<ChangeDispatcher>,
    config: ResyncConfig,
}

impl ResyncTask {
    pub fn new(dispatcher: Arc<ChangeDispatcher>, config: ResyncConfig) -> Self {
        Self { dispatcher, config }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if !self.config.enabled {
            tracing::info!("Periodic re-sync disabled");
            return;
        }

        if self.config.interval_secs == 0 {
            tracing::warn!("Re-sync interval is 0, periodic re-sync not started");
            return;
        }

        tracing::info!(interval_secs = self.config.interval_secs, "Re-sync task starting");

        let period = Duration::from_secs(self.config.interval_secs);
        // First tick fires one period from now; bootstrap already loaded everything.
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.resync_once().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Re-sync task received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Refresh every group once, returning how many succeeded.
    pub async fn resync_once(&self) -> usize {
        let mut refreshed = 0;
        for (group, result) in self.dispatcher.refresh_all().await {
            match result {
                Ok(_) => refreshed += 1,
                Err(e) => tracing::warn!(group = %group, error = %e, "Re-sync failed for group"),
            }
        }
        tracing::debug!(refreshed, "Re-sync pass complete");
        refreshed
    }
}
