//! Config snapshot cache and change propagation for gateway nodes.

pub mod admin;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod source;
pub mod sync;

pub use cache::{ConfigSnapshot, SnapshotCache};
pub use config::SyncConfig;
pub use error::{SourceError, SyncError};
pub use http::HttpServer;
pub use lifecycle::{bootstrap, Shutdown};
pub use model::{ChangeNotification, ConfigData, ConfigGroup, DataEventType};
pub use sync::{ChangeDispatcher, ChangeHook, SnapshotFetcher};
