use super::error::{StoreError, StoreResult};
use super::models::{seed_tracks, LogId, NewPlaybackLog, PlaybackLog, TopTrackStat, Track, TrackId};
use super::schema::ANALYTICS_VERSIONED_SCHEMAS;
use super::trait_def::AnalyticsStore;
use crate::sqlite_persistence::{read_schema_version, VersionedSchema};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Ties are broken by track id so the order matches `ranking::rank_top_tracks`.
const TOP_TRACKS_QUERY: &str = "SELECT t.title, COUNT(l.id) AS play_count
     FROM playback_logs l
     JOIN tracks t ON l.track_id = t.id
     GROUP BY t.id
     ORDER BY play_count DESC, t.id ASC
     LIMIT ?1";

pub struct SqliteAnalyticsStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAnalyticsStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        let is_new_db = !path.exists();

        let conn = Connection::open(path).context("Failed to open analytics database")?;
        if is_new_db {
            info!("Creating new analytics database at {:?}", path);
        }
        Self::bootstrap(conn, is_new_db)
    }

    /// Opens a private in-memory database, created and seeded from scratch.
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to open in-memory analytics database")?;
        Self::bootstrap(conn, true)
    }

    fn bootstrap(conn: Connection, is_new_db: bool) -> Result<Self> {
        let latest = Self::latest_schema()?;
        let recorded_version = read_schema_version(&conn)?;

        if is_new_db || (recorded_version.is_none() && Self::is_empty(&conn)?) {
            latest.create(&conn)?;
            Self::insert_seed_tracks(&conn)?;
        } else {
            let db_version = recorded_version
                .context("Analytics database has no schema version, refusing to use it")?;
            let schema = ANALYTICS_VERSIONED_SCHEMAS
                .iter()
                .find(|s| s.version == db_version)
                .with_context(|| format!("Unknown analytics database version {}", db_version))?;
            schema.validate(&conn).with_context(|| {
                format!(
                    "Analytics database schema validation failed for version {}",
                    db_version
                )
            })?;
            info!("Opened analytics database at version {}", db_version);
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn latest_schema() -> Result<&'static VersionedSchema> {
        ANALYTICS_VERSIONED_SCHEMAS
            .last()
            .context("No analytics schema defined")
    }

    fn is_empty(conn: &Connection) -> Result<bool> {
        let objects: i64 =
            conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get(0))?;
        Ok(objects == 0)
    }

    fn insert_seed_tracks(conn: &Connection) -> Result<()> {
        let mut stmt =
            conn.prepare("INSERT INTO tracks (id, title, artist, price) VALUES (?1, ?2, ?3, ?4)")?;
        for track in seed_tracks() {
            stmt.execute(params![track.id, track.title, track.artist, track.price])
                .with_context(|| format!("Failed to seed track {}", track.id))?;
        }
        Ok(())
    }

    fn format_datetime(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339()
    }

    fn row_to_log(row: &rusqlite::Row) -> rusqlite::Result<PlaybackLog> {
        let played_at_str: String = row.get("played_at")?;
        let played_at = DateTime::parse_from_rfc3339(&played_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

        Ok(PlaybackLog {
            id: row.get("id")?,
            track_id: row.get("track_id")?,
            played_at,
            amount_paid: row.get("amount_paid")?,
        })
    }
}

impl AnalyticsStore for SqliteAnalyticsStore {
    fn get_track_by_id(&self, id: TrackId) -> StoreResult<Track> {
        let conn = self.conn.lock()?;
        conn.query_row(
            "SELECT id, title, artist, price FROM tracks WHERE id = ?1",
            params![id],
            |row| {
                Ok(Track {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    artist: row.get(2)?,
                    price: row.get(3)?,
                })
            },
        )
        .optional()?
        .ok_or(StoreError::TrackNotFound(id))
    }

    fn update_track_price(&self, id: TrackId, new_price: f64) -> StoreResult<()> {
        let conn = self.conn.lock()?;
        let rows = conn.execute(
            "UPDATE tracks SET price = ?1 WHERE id = ?2",
            params![new_price, id],
        )?;
        if rows == 0 {
            return Err(StoreError::TrackNotFound(id));
        }
        Ok(())
    }

    fn create_log(&self, log: NewPlaybackLog) -> StoreResult<LogId> {
        let conn = self.conn.lock()?;
        conn.execute(
            "INSERT INTO playback_logs (track_id, played_at, amount_paid) VALUES (?1, ?2, ?3)",
            params![
                log.track_id,
                Self::format_datetime(&log.played_at),
                log.amount_paid
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn get_all_logs(&self) -> StoreResult<Vec<PlaybackLog>> {
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, track_id, played_at, amount_paid FROM playback_logs ORDER BY id",
        )?;
        let logs = stmt
            .query_map([], Self::row_to_log)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    fn get_top_tracks(&self, limit: usize) -> StoreResult<Vec<TopTrackStat>> {
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare(TOP_TRACKS_QUERY)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let stats = stmt
            .query_map(params![limit], |row| {
                Ok(TopTrackStat {
                    title: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stats)
    }
}
