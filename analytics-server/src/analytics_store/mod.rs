//! Storage for tracks and playback logs.
//!
//! `AnalyticsStore` is the seam between the service and the storage engine.
//! Two interchangeable backends are provided: `InMemoryAnalyticsStore` and
//! `SqliteAnalyticsStore`. Both must rank top tracks identically.

mod error;
mod in_memory_store;
mod models;
pub mod ranking;
mod schema;
mod sqlite_store;
mod trait_def;

pub use error::{StoreError, StoreResult};
pub use in_memory_store::InMemoryAnalyticsStore;
pub use models::*;
pub use schema::ANALYTICS_VERSIONED_SCHEMAS;
pub use sqlite_store::SqliteAnalyticsStore;
pub use trait_def::AnalyticsStore;

#[cfg(any(test, feature = "mock"))]
pub use trait_def::MockAnalyticsStore;
