//! Data models for tracks and playback history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TrackId = i64;
pub type LogId = i64;

/// A catalogued piece of music with its current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub price: f64,
}

/// An immutable record that a track was played.
///
/// `amount_paid` is what was charged at the time of the play and may differ
/// from the track's current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackLog {
    pub id: LogId,
    pub track_id: TrackId,
    pub played_at: DateTime<Utc>,
    pub amount_paid: f64,
}

/// A playback log that has not been stored yet, the storage assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlaybackLog {
    pub track_id: TrackId,
    pub played_at: DateTime<Utc>,
    pub amount_paid: f64,
}

impl NewPlaybackLog {
    pub fn now(track_id: TrackId, amount_paid: f64) -> Self {
        Self {
            track_id,
            played_at: Utc::now(),
            amount_paid,
        }
    }

    pub(super) fn into_log(self, id: LogId) -> PlaybackLog {
        PlaybackLog {
            id,
            track_id: self.track_id,
            played_at: self.played_at,
            amount_paid: self.amount_paid,
        }
    }
}

/// Play count of a single track, computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTrackStat {
    pub title: String,
    pub count: u64,
}

/// Tracks every store starts with.
pub fn seed_tracks() -> Vec<Track> {
    [
        (1, "Dirty Diana", "Michael Jackson", 1.25),
        (2, "Comfortably Numb", "Pink Floyd", 1.50),
        (3, "Space Oddity", "David Bowie", 1.00),
    ]
    .into_iter()
    .map(|(id, title, artist, price)| Track {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
        price,
    })
    .collect()
}
