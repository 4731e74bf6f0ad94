//! v002: dedup index + dedup events (§4.D).

use rusqlite::Connection;

use crate::error::{to_metadata_err, MetadataResult};

pub fn migrate(conn: &Connection) -> MetadataResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS dedup_index (
            memory_id       TEXT PRIMARY KEY,
            project_id      TEXT NOT NULL,
            exact_hash      TEXT NOT NULL,
            normalized_hash TEXT NOT NULL,
            semantic_hash   TEXT NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_dedup_exact ON dedup_index(exact_hash);
        CREATE INDEX IF NOT EXISTS idx_dedup_normalized ON dedup_index(normalized_hash);
        CREATE INDEX IF NOT EXISTS idx_dedup_semantic ON dedup_index(semantic_hash);
        CREATE INDEX IF NOT EXISTS idx_dedup_project ON dedup_index(project_id);

        CREATE TABLE IF NOT EXISTS dedup_events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            memory_id   TEXT NOT NULL,
            matched_id  TEXT NOT NULL,
            level       TEXT NOT NULL,
            verdict     TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_dedup_events_memory ON dedup_events(memory_id);
        ",
    )
    .map_err(to_metadata_err)?;
    Ok(())
}
