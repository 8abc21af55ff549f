//! HTTP pull surface.
//!
//! # Data Flow
//! ```text
//! gateway node
//!     → server.rs (Axum router, trace layer)
//!     → handlers.rs (parse group keys, call the fetcher)
//!     → response.rs (result envelope, error → status mapping)
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
