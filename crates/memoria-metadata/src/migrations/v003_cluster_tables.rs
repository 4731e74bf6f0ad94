//! v003: clusters + cluster membership (§4.J).

use rusqlite::Connection;

use crate::error::{to_metadata_err, MetadataResult};

pub fn migrate(conn: &Connection) -> MetadataResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS clusters (
            id          TEXT PRIMARY KEY,
            project_id  TEXT NOT NULL,
            name        TEXT NOT NULL,
            keywords    TEXT NOT NULL DEFAULT '[]',
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_clusters_project ON clusters(project_id);

        CREATE TABLE IF NOT EXISTS cluster_membership (
            cluster_id  TEXT NOT NULL,
            memory_id   TEXT NOT NULL,
            PRIMARY KEY (cluster_id, memory_id),
            FOREIGN KEY (cluster_id) REFERENCES clusters(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_cluster_membership_memory ON cluster_membership(memory_id);
        ",
    )
    .map_err(to_metadata_err)?;
    Ok(())
}
