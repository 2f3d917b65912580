use thiserror::Error;

/// Errors reported to callers of `AnalyticsService`.
///
/// Storage details never leak through this type, they are logged instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    #[error("track not found")]
    TrackNotFound,

    #[error("price must be greater than 0")]
    InvalidPrice,

    #[error("failed to create log")]
    LogPersistenceFailure,

    #[error("failed to get stats")]
    StatsQueryFailure,
}
