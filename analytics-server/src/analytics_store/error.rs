use super::models::TrackId;
use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Raw outcome of a storage operation, before the service maps it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Track {0} not found")]
    TrackNotFound(TrackId),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::LockPoisoned
    }
}
