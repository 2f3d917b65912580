use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::analytics_store::{AnalyticsStore, NewPlaybackLog, StoreError, TopTrackStat, Track, TrackId};

use super::error::AnalyticsError;

/// Number of entries returned by `get_top_tracks`.
pub const TOP_TRACKS_LIMIT: usize = 3;

/// Validates requests and maps storage outcomes to `AnalyticsError`.
///
/// Every transport (HTTP, gRPC, the demo binary) goes through this type.
pub struct AnalyticsService {
    store: Arc<dyn AnalyticsStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self { store }
    }

    /// Records that `track_id` was played, charging `amount_paid`.
    ///
    /// The amount is stored as given and may differ from the track's price.
    pub fn create_log(&self, track_id: TrackId, amount_paid: f64) -> Result<(), AnalyticsError> {
        if let Err(err) = self.store.get_track_by_id(track_id) {
            Self::log_lookup_failure(track_id, &err);
            return Err(AnalyticsError::TrackNotFound);
        }

        let log_id = self
            .store
            .create_log(NewPlaybackLog::now(track_id, amount_paid))
            .map_err(|err| {
                error!("Failed to persist playback of track {}: {}", track_id, err);
                AnalyticsError::LogPersistenceFailure
            })?;

        debug!("Logged playback {} of track {}", log_id, track_id);
        Ok(())
    }

    pub fn update_price(&self, track_id: TrackId, new_price: f64) -> Result<(), AnalyticsError> {
        // Also rejects NaN.
        if !(new_price > 0.0) {
            return Err(AnalyticsError::InvalidPrice);
        }

        self.store
            .update_track_price(track_id, new_price)
            .map_err(|err| {
                Self::log_lookup_failure(track_id, &err);
                AnalyticsError::TrackNotFound
            })
    }

    /// The `TOP_TRACKS_LIMIT` most played tracks.
    pub fn get_top_tracks(&self) -> Result<Vec<TopTrackStat>, AnalyticsError> {
        self.store.get_top_tracks(TOP_TRACKS_LIMIT).map_err(|err| {
            error!("Failed to compute top tracks: {}", err);
            AnalyticsError::StatsQueryFailure
        })
    }

    pub fn get_track(&self, track_id: TrackId) -> Result<Track, AnalyticsError> {
        self.store.get_track_by_id(track_id).map_err(|err| {
            Self::log_lookup_failure(track_id, &err);
            AnalyticsError::TrackNotFound
        })
    }

    fn log_lookup_failure(track_id: TrackId, err: &StoreError) {
        match err {
            StoreError::TrackNotFound(_) => warn!("Track {} not found", track_id),
            other => error!("Storage failure while accessing track {}: {}", track_id, other),
        }
    }
}
