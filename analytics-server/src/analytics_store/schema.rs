//! SQLite schema definitions for the analytics database.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, ForeignKey, SqlType, Table, VersionedSchema};

// =============================================================================
// Version 1 - Tracks and playback logs
// =============================================================================

const TRACKS_TABLE_V1: Table = Table {
    name: "tracks",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("artist", &SqlType::Text, non_null = true),
        sqlite_column!("price", &SqlType::Real, non_null = true),
    ],
    indices: &[],
};

/// Playback history, one row per play. `played_at` is RFC 3339 text.
const PLAYBACK_LOGS_TABLE_V1: Table = Table {
    name: "playback_logs",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true), // AUTOINCREMENT
        sqlite_column!(
            "track_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "tracks",
                foreign_column: "id",
            })
        ),
        sqlite_column!("played_at", &SqlType::Text, non_null = true),
        sqlite_column!("amount_paid", &SqlType::Real, non_null = true),
    ],
    indices: &[("idx_playback_logs_track_id", "track_id")],
};

pub const ANALYTICS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[TRACKS_TABLE_V1, PLAYBACK_LOGS_TABLE_V1],
}];
