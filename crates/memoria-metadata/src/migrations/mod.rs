//! Migration runner. Applies each versioned migration exactly once, tracked
//! via `PRAGMA user_version`, the way `cortex-storage::migrations` does.

mod v001_scheduler_tables;
mod v002_dedup_tables;
mod v003_cluster_tables;
mod v004_briefing_queue;

use rusqlite::Connection;

use crate::error::{to_metadata_err, MetadataResult};

const CURRENT_VERSION: i64 = 4;

pub fn run_migrations(conn: &Connection) -> MetadataResult<()> {
    let current: i64 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(to_metadata_err)?;

    if current < 1 {
        v001_scheduler_tables::migrate(conn)?;
    }
    if current < 2 {
        v002_dedup_tables::migrate(conn)?;
    }
    if current < 3 {
        v003_cluster_tables::migrate(conn)?;
    }
    if current < 4 {
        v004_briefing_queue::migrate(conn)?;
    }

    if current < CURRENT_VERSION {
        conn.pragma_update(None, "user_version", CURRENT_VERSION)
            .map_err(to_metadata_err)?;
    }
    Ok(())
}
