//! Top-N ranking computed in application code.
//!
//! Used by backends that cannot delegate grouping to a query engine. The
//! order must match the SQL in `SqliteAnalyticsStore::get_top_tracks`: play
//! count descending, then track ID ascending.

use super::models::{PlaybackLog, TopTrackStat, TrackId};
use std::collections::BTreeMap;

/// Counts plays per track, keyed (and therefore ordered) by track ID.
pub fn count_plays<'a, I>(logs: I) -> BTreeMap<TrackId, u64>
where
    I: IntoIterator<Item = &'a PlaybackLog>,
{
    let mut counts = BTreeMap::new();
    for log in logs {
        *counts.entry(log.track_id).or_insert(0) += 1;
    }
    counts
}

/// Ranks tracks by play count.
///
/// `resolve_title` maps a track ID to its title; IDs it cannot resolve are
/// dropped from the result instead of failing the whole ranking.
pub fn rank_top_tracks<'a, I, F>(logs: I, resolve_title: F, limit: usize) -> Vec<TopTrackStat>
where
    I: IntoIterator<Item = &'a PlaybackLog>,
    F: Fn(TrackId) -> Option<String>,
{
    let mut ranked: Vec<(TrackId, String, u64)> = count_plays(logs)
        .into_iter()
        .filter_map(|(track_id, count)| {
            resolve_title(track_id).map(|title| (track_id, title, count))
        })
        .collect();

    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(_, title, count)| TopTrackStat { title, count })
        .collect()
}
