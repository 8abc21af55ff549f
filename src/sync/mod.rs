//! Change detection and propagation subsystem.
//!
//! # Data Flow
//! ```text
//! ChangeNotification
//!     → dispatcher.rs (skip empty, else refresh the group)
//!         → source listers (full current record list)
//!         → fingerprint.rs (canonical hash)
//!         → cache (atomic upsert with a fresh timestamp)
//!     → hooks.rs (transport-specific propagation)
//!
//! Pull request from a gateway node:
//!     → fetcher.rs (cached fingerprint + current record list)
//!
//! Timer:
//!     → resync.rs (refresh every group, no hook)
//! ```
//!
//! # Design Decisions
//! - Stale-but-available: a failed refresh keeps the previous snapshot
//! - Failures are isolated per group and never reach the notifier
//! - One generic refresh path keyed by group, no per-group copies

pub mod dispatcher;
pub mod fetcher;
pub mod fingerprint;
pub mod hooks;
pub mod resync;

pub use dispatcher::{ChangeDispatcher, DispatchOutcome};
pub use fetcher::SnapshotFetcher;
pub use fingerprint::fingerprint;
pub use hooks::{BroadcastHook, ChangeHook, GroupChanged, LoggingHook};
pub use resync::ResyncTask;
