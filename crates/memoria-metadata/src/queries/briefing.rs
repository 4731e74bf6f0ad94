//! Briefing queue queries (§4.M — supplemented from the weekly synthesis
//! runner). Bookkeeping only: actual briefing text generation is an
//! out-of-scope external consumer.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{to_metadata_err, MetadataResult};

#[derive(Debug, Clone)]
pub struct BriefingPeriod {
    pub id: i64,
    pub project_id: String,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub generated: bool,
}

/// Enqueue a period as ready for synthesis (idempotent per
/// `(project_id, period_start, period_end)`).
pub fn mark_period_ready(
    conn: &Connection,
    project_id: &str,
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
) -> MetadataResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO briefing_queue (project_id, period_start, period_end, generated)
         VALUES (?1, ?2, ?3, 0)",
        params![project_id, period_start.to_rfc3339(), period_end.to_rfc3339()],
    )
    .map_err(to_metadata_err)?;
    Ok(())
}

/// Pending (not yet generated) periods, oldest first.
pub fn take_pending(conn: &Connection) -> MetadataResult<Vec<BriefingPeriod>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, project_id, period_start, period_end, generated
             FROM briefing_queue WHERE generated = 0 ORDER BY period_start ASC",
        )
        .map_err(to_metadata_err)?;
    let rows = stmt
        .query_map([], |row| {
            let start: String = row.get(2)?;
            let end: String = row.get(3)?;
            Ok(BriefingPeriod {
                id: row.get(0)?,
                project_id: row.get(1)?,
                period_start: DateTime::parse_from_rfc3339(&start)
                    .map(|d| d.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
                period_end: DateTime::parse_from_rfc3339(&end)
                    .map(|d| d.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
                generated: row.get::<_, i64>(4)? != 0,
            })
        })
        .map_err(to_metadata_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_metadata_err)
}

pub fn mark_generated(conn: &Connection, id: i64) -> MetadataResult<()> {
    conn.execute(
        "UPDATE briefing_queue SET generated = 1 WHERE id = ?1",
        params![id],
    )
    .map_err(to_metadata_err)?;
    Ok(())
}
