//! Snapshot cache subsystem.
//!
//! # Data Flow
//! ```text
//! bootstrap / dispatcher / re-sync
//!     → clock.rs stamps a strictly increasing timestamp
//!     → snapshot.rs upserts {fingerprint, timestamp} for the group
//!     → fetcher and admin handlers read it
//! ```
//!
//! # Design Decisions
//! - One entry per group, never deleted
//! - Upsert is atomic per group; older timestamps never replace newer ones
//! - Readiness is explicit; reads before bootstrap are "not ready", not empty

pub mod clock;
pub mod snapshot;

pub use clock::MonotonicClock;
pub use snapshot::{ConfigSnapshot, PutOutcome, SnapshotCache};
