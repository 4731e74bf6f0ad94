//! v004: briefing queue (§4.M). One row per project per period; `generated`
//! flips once the maintenance runner has emitted a briefing.

use rusqlite::Connection;

use crate::error::{to_metadata_err, MetadataResult};

pub fn migrate(conn: &Connection) -> MetadataResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS briefing_queue (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id   TEXT NOT NULL,
            period_start TEXT NOT NULL,
            period_end   TEXT NOT NULL,
            generated    INTEGER NOT NULL DEFAULT 0,
            created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            UNIQUE (project_id, period_start, period_end)
        );

        CREATE INDEX IF NOT EXISTS idx_briefing_queue_pending ON briefing_queue(generated);
        ",
    )
    .map_err(to_metadata_err)?;
    Ok(())
}
