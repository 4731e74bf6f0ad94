//! v001: scheduler state + review log (§4.H).

use rusqlite::Connection;

use crate::error::{to_metadata_err, MetadataResult};

pub fn migrate(conn: &Connection) -> MetadataResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS scheduler_state (
            memory_id           TEXT PRIMARY KEY,
            source_project      TEXT NOT NULL,
            stability           REAL NOT NULL DEFAULT 1.0,
            difficulty          REAL NOT NULL DEFAULT 0.5,
            due                 TEXT NOT NULL,
            review_count        INTEGER NOT NULL DEFAULT 0,
            projects_validated  TEXT NOT NULL DEFAULT '[]',
            promoted            INTEGER NOT NULL DEFAULT 0,
            updated_at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_scheduler_due ON scheduler_state(due, promoted);
        CREATE INDEX IF NOT EXISTS idx_scheduler_promoted ON scheduler_state(promoted, stability, review_count);

        CREATE TABLE IF NOT EXISTS review_log (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            memory_id        TEXT NOT NULL,
            grade            INTEGER NOT NULL,
            reviewed_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            new_stability    REAL NOT NULL,
            new_interval_days REAL NOT NULL,
            source_session   TEXT,
            source_project   TEXT NOT NULL,
            FOREIGN KEY (memory_id) REFERENCES scheduler_state(memory_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_review_log_memory ON review_log(memory_id, reviewed_at);
        ",
    )
    .map_err(to_metadata_err)?;
    Ok(())
}
