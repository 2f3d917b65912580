//! Jukebox Analytics Server Library
//!
//! Playback logging, price updates and top-track statistics over pluggable
//! storage, exposed through HTTP, gRPC and in-process calls.

pub mod analytics;
pub mod analytics_store;
pub mod config;
pub mod rpc;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use analytics::{AnalyticsError, AnalyticsService};
pub use analytics_store::{AnalyticsStore, InMemoryAnalyticsStore, SqliteAnalyticsStore};
pub use server::{run_server, RequestsLoggingLevel};
