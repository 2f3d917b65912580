//! Business rules on top of an `AnalyticsStore`.

mod error;
mod service;

pub use error::AnalyticsError;
pub use service::{AnalyticsService, TOP_TRACKS_LIMIT};
