//! Persistence gateway for the two counter families (players, bots).
//!
//! Every operation opens its own connection and drops it on completion, so
//! no session state is shared across concurrent workers. Same-key upserts
//! are single conflict-update statements, atomic at the storage engine;
//! concurrent writers are serialized by SQLite itself (WAL journal plus a
//! busy timeout).

use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use rusqlite::params;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use tracing::debug;
use tracing::warn;

use crate::PlayerId;
use crate::Result;
use crate::StorageConfig;

#[derive(Debug, Clone)]
pub struct CounterStore {
    db_path: PathBuf,
    busy_timeout: Duration,
}

impl CounterStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            db_path: config.db_path.clone(),
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
        }
    }

    /// Open a fresh connection scope for one logical operation.
    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path).map_err(|e| {
            warn!(
                "Try to open counter DB at this location: {:?} and failed: {:?}",
                self.db_path, e
            );
            e
        })?;
        // WAL lets readers proceed while a writer holds the file; the busy
        // timeout serializes concurrent writers instead of failing them.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// Create both counter tables. Safe to invoke against a fresh or an
    /// already-initialized file.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.open()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS players (
                player_id    INTEGER PRIMARY KEY,
                display_name TEXT,
                kills        INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS bot_stats (
                id           INTEGER PRIMARY KEY,
                bot_name     TEXT NOT NULL,
                map_name     TEXT NOT NULL,
                kills        INTEGER NOT NULL,
                last_updated TEXT NOT NULL,
                UNIQUE (bot_name, map_name)
            );

            CREATE INDEX IF NOT EXISTS idx_bot_stats_map ON bot_stats(map_name);
            "#,
        )?;
        debug!("counter schema ensured at {:?}", self.db_path);
        Ok(())
    }

    /// Create-or-increment for a player kill. The display name is
    /// last-writer-wins. Returns the resulting count.
    pub fn upsert_player_kill(
        &self,
        player_id: PlayerId,
        display_name: &str,
    ) -> Result<u64> {
        let conn = self.open()?;
        let kills = conn.query_row(
            "INSERT INTO players (player_id, display_name, kills) VALUES (?1, ?2, 1)
             ON CONFLICT(player_id) DO UPDATE SET
                 kills = kills + 1,
                 display_name = excluded.display_name
             RETURNING kills",
            params![player_id as i64, display_name],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(kills as u64)
    }

    /// Create the player's row with a zero count if absent; no-op otherwise.
    /// Never touches an existing row, so a racing kill upsert cannot be
    /// double-initialized.
    pub fn ensure_player_exists(
        &self,
        player_id: PlayerId,
        display_name: &str,
    ) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT OR IGNORE INTO players (player_id, display_name, kills) VALUES (?1, ?2, 0)",
            params![player_id as i64, display_name],
        )?;
        Ok(())
    }

    /// Read-only count lookup. Returns 0 when absent and creates no row.
    pub fn player_kills(&self, player_id: PlayerId) -> Result<u64> {
        let conn = self.open()?;
        let kills = conn
            .query_row(
                "SELECT kills FROM players WHERE player_id = ?1",
                params![player_id as i64],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .unwrap_or(0);
        Ok(kills as u64)
    }

    /// Create-or-increment for a bot kill, keyed by (bot name, map). Also
    /// refreshes the last-updated stamp. Returns the resulting count.
    pub fn upsert_bot_kill(&self, bot_name: &str, map_name: &str) -> Result<u64> {
        let conn = self.open()?;
        let now = Utc::now().to_rfc3339();
        let kills = conn.query_row(
            "INSERT INTO bot_stats (bot_name, map_name, kills, last_updated) VALUES (?1, ?2, 1, ?3)
             ON CONFLICT(bot_name, map_name) DO UPDATE SET
                 kills = kills + 1,
                 last_updated = excluded.last_updated
             RETURNING kills",
            params![bot_name, map_name, now],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(kills as u64)
    }

    /// All bot counters for one map, ordered by count descending with
    /// insertion order as the stable tie-break.
    pub fn list_bot_kills(&self, map_name: &str) -> Result<Vec<(String, u64)>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT bot_name, kills FROM bot_stats WHERE map_name = ?1
             ORDER BY kills DESC, id ASC",
        )?;
        let rows = stmt
            .query_map(params![map_name], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Remove every bot counter whose map is not `except_map`. Returns the
    /// number of rows removed. Session-boundary cleanup, not steady-state.
    pub fn delete_bot_counters(&self, except_map: &str) -> Result<usize> {
        let conn = self.open()?;
        let removed = conn.execute(
            "DELETE FROM bot_stats WHERE map_name <> ?1",
            params![except_map],
        )?;
        Ok(removed)
    }
}
