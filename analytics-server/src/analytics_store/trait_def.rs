//! AnalyticsStore trait definition.

use super::error::StoreResult;
use super::models::{LogId, NewPlaybackLog, PlaybackLog, TopTrackStat, Track, TrackId};

/// Trait for analytics storage backends.
///
/// Implementations report raw storage outcomes only. Business rules, such as
/// rejecting non-positive prices or checking that a log references an
/// existing track, belong to `AnalyticsService`.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait AnalyticsStore: Send + Sync {
    // =========================================================================
    // Tracks
    // =========================================================================

    /// Get a track by ID.
    /// Fails with `StoreError::TrackNotFound` if no such track exists.
    fn get_track_by_id(&self, id: TrackId) -> StoreResult<Track>;

    /// Overwrite the price of an existing track.
    /// The price is stored as given, it is not validated here.
    fn update_track_price(&self, id: TrackId, new_price: f64) -> StoreResult<()>;

    // =========================================================================
    // Playback logs
    // =========================================================================

    /// Append a playback record and return its storage-assigned ID.
    /// The caller is trusted to have checked that the track exists.
    fn create_log(&self, log: NewPlaybackLog) -> StoreResult<LogId>;

    /// Get every playback record ever stored.
    fn get_all_logs(&self) -> StoreResult<Vec<PlaybackLog>>;

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Get the `limit` most played tracks, by play count descending and then
    /// by track ID ascending. Logs referencing unknown tracks are ignored.
    fn get_top_tracks(&self, limit: usize) -> StoreResult<Vec<TopTrackStat>>;
}
