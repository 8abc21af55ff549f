//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Refresh every group (failures isolated) → mark cache ready
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast to background tasks → server drains → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Bootstrap never aborts startup; a group that failed to load stays
//!   "not ready" until a later refresh succeeds
//! - Listeners start after bootstrap (pulls only once snapshots exist)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{bootstrap, BootstrapReport};
