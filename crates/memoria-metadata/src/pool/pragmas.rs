//! PRAGMA configuration applied to every connection (§4.B): WAL mode, NORMAL
//! sync, foreign keys on, and a 30s busy_timeout for concurrent writers.

use rusqlite::Connection;

use crate::error::{to_metadata_err, MetadataResult};

pub fn apply_write_pragmas(conn: &Connection) -> MetadataResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 30000;
        ",
    )
    .map_err(to_metadata_err)?;
    Ok(())
}

pub fn apply_read_pragmas(conn: &Connection) -> MetadataResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA busy_timeout = 30000;
        PRAGMA query_only = ON;
        ",
    )
    .map_err(to_metadata_err)?;
    Ok(())
}
