//! In-memory analytics store.
//!
//! All state lives behind a single mutex, so concurrent price updates and
//! log appends are serialized for the whole store.

use super::error::{StoreError, StoreResult};
use super::models::{seed_tracks, LogId, NewPlaybackLog, PlaybackLog, TopTrackStat, Track, TrackId};
use super::ranking::rank_top_tracks;
use super::trait_def::AnalyticsStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct InMemoryState {
    tracks: HashMap<TrackId, Track>,
    logs: Vec<PlaybackLog>,
    next_log_id: LogId,
}

#[derive(Clone)]
pub struct InMemoryAnalyticsStore {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryAnalyticsStore {
    /// Creates a store holding the seed tracks and no logs.
    pub fn new() -> Self {
        Self::with_tracks(seed_tracks())
    }

    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        let state = InMemoryState {
            tracks: tracks.into_iter().map(|t| (t.id, t)).collect(),
            logs: Vec::new(),
            next_log_id: 1,
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }
}

impl Default for InMemoryAnalyticsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsStore for InMemoryAnalyticsStore {
    fn get_track_by_id(&self, id: TrackId) -> StoreResult<Track> {
        let state = self.state.lock()?;
        state
            .tracks
            .get(&id)
            .cloned()
            .ok_or(StoreError::TrackNotFound(id))
    }

    fn update_track_price(&self, id: TrackId, new_price: f64) -> StoreResult<()> {
        let mut state = self.state.lock()?;
        let track = state
            .tracks
            .get_mut(&id)
            .ok_or(StoreError::TrackNotFound(id))?;
        track.price = new_price;
        Ok(())
    }

    fn create_log(&self, log: NewPlaybackLog) -> StoreResult<LogId> {
        let mut state = self.state.lock()?;
        let id = state.next_log_id;
        state.next_log_id += 1;
        state.logs.push(log.into_log(id));
        Ok(id)
    }

    fn get_all_logs(&self) -> StoreResult<Vec<PlaybackLog>> {
        Ok(self.state.lock()?.logs.clone())
    }

    fn get_top_tracks(&self, limit: usize) -> StoreResult<Vec<TopTrackStat>> {
        let state = self.state.lock()?;
        Ok(rank_top_tracks(
            &state.logs,
            |track_id| state.tracks.get(&track_id).map(|t| t.title.clone()),
            limit,
        ))
    }
}
