//! Dedup index + dedup events queries (§4.B, §4.D).

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{to_metadata_err, MetadataResult};

#[derive(Debug, Clone)]
pub struct DedupRow {
    pub memory_id: String,
    pub project_id: String,
    pub exact_hash: String,
    pub normalized_hash: String,
    pub semantic_hash: String,
}

/// Upsert all three hashes for a memory (§4.D `register`). Dedup rows are
/// never updated after insertion per §3's lifecycle, so a second call for
/// the same id is a no-op rather than an error.
pub fn register(conn: &Connection, row: &DedupRow) -> MetadataResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO dedup_index
            (memory_id, project_id, exact_hash, normalized_hash, semantic_hash)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            row.memory_id,
            row.project_id,
            row.exact_hash,
            row.normalized_hash,
            row.semantic_hash,
        ],
    )
    .map_err(to_metadata_err)?;
    Ok(())
}

pub fn find_by_exact(conn: &Connection, hash: &str) -> MetadataResult<Option<DedupRow>> {
    find_by_column(conn, "exact_hash", hash)
}

pub fn find_by_normalized(conn: &Connection, hash: &str) -> MetadataResult<Option<DedupRow>> {
    find_by_column(conn, "normalized_hash", hash)
}

pub fn find_by_semantic(conn: &Connection, hash: &str) -> MetadataResult<Option<DedupRow>> {
    find_by_column(conn, "semantic_hash", hash)
}

fn find_by_column(conn: &Connection, column: &str, hash: &str) -> MetadataResult<Option<DedupRow>> {
    let sql = format!(
        "SELECT memory_id, project_id, exact_hash, normalized_hash, semantic_hash
         FROM dedup_index WHERE {column} = ?1 LIMIT 1"
    );
    conn.query_row(&sql, params![hash], |row| {
        Ok(DedupRow {
            memory_id: row.get(0)?,
            project_id: row.get(1)?,
            exact_hash: row.get(2)?,
            normalized_hash: row.get(3)?,
            semantic_hash: row.get(4)?,
        })
    })
    .optional()
    .map_err(to_metadata_err)
}

/// `groups()`: ids sharing the same normalized hash, grouped (§4.D).
pub fn groups_by_normalized_hash(conn: &Connection) -> MetadataResult<Vec<Vec<String>>> {
    let mut stmt = conn
        .prepare(
            "SELECT normalized_hash, memory_id FROM dedup_index ORDER BY normalized_hash ASC",
        )
        .map_err(to_metadata_err)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .map_err(to_metadata_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_metadata_err)?;

    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut current_hash: Option<String> = None;
    for (hash, id) in rows {
        match &current_hash {
            Some(h) if *h == hash => groups.last_mut().unwrap().push(id),
            _ => {
                groups.push(vec![id]);
                current_hash = Some(hash);
            }
        }
    }
    Ok(groups.into_iter().filter(|g| g.len() > 1).collect())
}

pub fn record_event(
    conn: &Connection,
    memory_id: &str,
    matched_id: &str,
    level: &str,
    verdict: &str,
) -> MetadataResult<()> {
    conn.execute(
        "INSERT INTO dedup_events (memory_id, matched_id, level, verdict, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![memory_id, matched_id, level, verdict, Utc::now().to_rfc3339()],
    )
    .map_err(to_metadata_err)?;
    Ok(())
}
