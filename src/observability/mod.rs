//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (refresh, dispatch, fetch counters; snapshot gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Group and outcome travel as structured fields and labels
//! - Metrics are cheap (no-ops until an exporter is installed)

pub mod logging;
pub mod metrics;
