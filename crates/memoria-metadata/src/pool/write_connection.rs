//! Single serialized write connection (§4.B). All mutating queries route
//! through here so SQLite's single-writer model never contends internally;
//! the busy_timeout pragma absorbs contention with external readers/writers.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use super::pragmas::apply_write_pragmas;
use crate::error::{to_metadata_err, MetadataResult};

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> MetadataResult<Self> {
        let conn = Connection::open(path).map_err(to_metadata_err)?;
        apply_write_pragmas(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn open_in_memory() -> MetadataResult<Self> {
        let conn = Connection::open_in_memory().map_err(to_metadata_err)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn with_conn<F, T>(&self, f: F) -> MetadataResult<T>
    where
        F: FnOnce(&Connection) -> MetadataResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_metadata_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }

    /// Like `with_conn`, but gives mutable access for callers that need to
    /// open a `rusqlite::Transaction` (scheduler reviews, cluster rewrites).
    pub fn with_conn_mut<F, T>(&self, f: F) -> MetadataResult<T>
    where
        F: FnOnce(&mut Connection) -> MetadataResult<T>,
    {
        let mut guard = self
            .conn
            .lock()
            .map_err(|e| to_metadata_err(format!("write connection lock poisoned: {e}")))?;
        f(&mut guard)
    }
}
