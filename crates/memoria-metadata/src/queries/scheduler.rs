//! Scheduler state + review log queries (§4.B, §4.H).

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use memoria_core::scheduler::{Grade, ReviewLogEntry, SchedulerState};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{to_metadata_err, MetadataResult};

fn row_to_state(row: &Row) -> rusqlite::Result<SchedulerState> {
    let due: String = row.get("due")?;
    let last_review: Option<String> = row.get("last_review")?;
    let projects_json: String = row.get("projects_validated")?;
    let promoted_date: Option<String> = row.get("promoted_date")?;

    let projects_validated: BTreeSet<String> =
        serde_json::from_str(&projects_json).unwrap_or_default();

    Ok(SchedulerState {
        memory_id: row.get("memory_id")?,
        stability: row.get("stability")?,
        difficulty: row.get("difficulty")?,
        due_date: DateTime::parse_from_rfc3339(&due)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
        review_count: row.get("review_count")?,
        last_review: last_review.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|d| d.with_timezone(&Utc))
        }),
        projects_validated,
        promoted: row.get::<_, i64>("promoted")? != 0,
        promoted_date: promoted_date.and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|d| d.with_timezone(&Utc))
        }),
    })
}

/// Insert a scheduler row if absent (idempotent registration, §4.G).
pub fn register_if_absent(conn: &Connection, state: &SchedulerState) -> MetadataResult<bool> {
    let existing = get(conn, &state.memory_id)?;
    if existing.is_some() {
        return Ok(false);
    }
    let projects_json = serde_json::to_string(&state.projects_validated).unwrap_or_default();
    conn.execute(
        "INSERT INTO scheduler_state
            (memory_id, source_project, stability, difficulty, due, review_count,
             projects_validated, promoted)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0)",
        params![
            state.memory_id,
            state.projects_validated.iter().next().cloned().unwrap_or_default(),
            state.stability,
            state.difficulty,
            state.due_date.to_rfc3339(),
            state.review_count,
            projects_json,
        ],
    )
    .map_err(to_metadata_err)?;
    Ok(true)
}

pub fn get(conn: &Connection, memory_id: &str) -> MetadataResult<Option<SchedulerState>> {
    conn.query_row(
        "SELECT memory_id, stability, difficulty, due, review_count, last_review,
                projects_validated, promoted, promoted_date
         FROM scheduler_state WHERE memory_id = ?1",
        params![memory_id],
        row_to_state,
    )
    .optional()
    .map_err(to_metadata_err)
}

/// Apply one review, updating scheduler state and appending the review-log
/// row in a single transaction (§5.c).
pub fn record_review(
    conn: &mut Connection,
    memory_id: &str,
    grade: Grade,
    new_stability: f64,
    new_difficulty: f64,
    new_due: DateTime<Utc>,
    new_interval_days: f64,
    reviewing_project: &str,
    source_session: Option<&str>,
) -> MetadataResult<()> {
    let tx = conn.transaction().map_err(to_metadata_err)?;

    let mut state = tx
        .query_row(
            "SELECT memory_id, stability, difficulty, due, review_count, last_review,
                    projects_validated, promoted, promoted_date
             FROM scheduler_state WHERE memory_id = ?1",
            params![memory_id],
            row_to_state,
        )
        .map_err(to_metadata_err)?;

    state.projects_validated.insert(reviewing_project.to_string());
    let projects_json = serde_json::to_string(&state.projects_validated).unwrap_or_default();

    tx.execute(
        "UPDATE scheduler_state
         SET stability = ?1, difficulty = ?2, due = ?3, review_count = review_count + 1,
             last_review = ?4, projects_validated = ?5, updated_at = ?4
         WHERE memory_id = ?6",
        params![
            new_stability,
            new_difficulty,
            new_due.to_rfc3339(),
            Utc::now().to_rfc3339(),
            projects_json,
            memory_id,
        ],
    )
    .map_err(to_metadata_err)?;

    tx.execute(
        "INSERT INTO review_log
            (memory_id, grade, reviewed_at, new_stability, new_interval_days,
             source_session, source_project)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            memory_id,
            grade.as_i32(),
            Utc::now().to_rfc3339(),
            new_stability,
            new_interval_days,
            source_session,
            reviewing_project,
        ],
    )
    .map_err(to_metadata_err)?;

    tx.commit().map_err(to_metadata_err)?;
    Ok(())
}

/// `get_due`: due ≤ now ∧ ¬promoted (§4.H).
pub fn get_due(conn: &Connection, now: DateTime<Utc>) -> MetadataResult<Vec<SchedulerState>> {
    let mut stmt = conn
        .prepare(
            "SELECT memory_id, stability, difficulty, due, review_count, last_review,
                    projects_validated, promoted, promoted_date
             FROM scheduler_state WHERE due <= ?1 AND promoted = 0
             ORDER BY due ASC",
        )
        .map_err(to_metadata_err)?;
    let rows = stmt
        .query_map(params![now.to_rfc3339()], row_to_state)
        .map_err(to_metadata_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_metadata_err)
}

/// SQL pre-filter for promotion candidates (§4.H): stability/review_count
/// thresholds only — the cross-project project-count check happens in Rust
/// once `projects_validated` is deserialized.
pub fn get_promotion_precandidates(
    conn: &Connection,
    min_stability: f64,
    min_reviews: u32,
) -> MetadataResult<Vec<SchedulerState>> {
    let mut stmt = conn
        .prepare(
            "SELECT memory_id, stability, difficulty, due, review_count, last_review,
                    projects_validated, promoted, promoted_date
             FROM scheduler_state
             WHERE promoted = 0 AND stability >= ?1 AND review_count >= ?2",
        )
        .map_err(to_metadata_err)?;
    let rows = stmt
        .query_map(params![min_stability, min_reviews], row_to_state)
        .map_err(to_metadata_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_metadata_err)
}

pub fn get_promoted_ids(conn: &Connection) -> MetadataResult<BTreeSet<String>> {
    let mut stmt = conn
        .prepare("SELECT memory_id FROM scheduler_state WHERE promoted = 1")
        .map_err(to_metadata_err)?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(to_metadata_err)?;
    rows.collect::<Result<BTreeSet<_>, _>>().map_err(to_metadata_err)
}

pub fn mark_promoted(conn: &Connection, memory_id: &str, now: DateTime<Utc>) -> MetadataResult<()> {
    conn.execute(
        "UPDATE scheduler_state SET promoted = 1, promoted_date = ?1 WHERE memory_id = ?2",
        params![now.to_rfc3339(), memory_id],
    )
    .map_err(to_metadata_err)?;
    Ok(())
}

/// All scheduler rows currently flagged `promoted` — used by the
/// reconciliation pass (§4.I) to repair memories missing `#promoted`.
pub fn get_all_promoted(conn: &Connection) -> MetadataResult<Vec<SchedulerState>> {
    let mut stmt = conn
        .prepare(
            "SELECT memory_id, stability, difficulty, due, review_count, last_review,
                    projects_validated, promoted, promoted_date
             FROM scheduler_state WHERE promoted = 1",
        )
        .map_err(to_metadata_err)?;
    let rows = stmt.query_map([], row_to_state).map_err(to_metadata_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_metadata_err)
}

pub fn review_log_for(conn: &Connection, memory_id: &str) -> MetadataResult<Vec<ReviewLogEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT memory_id, grade, reviewed_at, new_stability, new_interval_days,
                    source_session, source_project
             FROM review_log
             WHERE memory_id = ?1 ORDER BY reviewed_at ASC",
        )
        .map_err(to_metadata_err)?;
    let rows = stmt
        .query_map(params![memory_id], |row| {
            let grade_i: i32 = row.get("grade")?;
            let reviewed_at: String = row.get("reviewed_at")?;
            Ok(ReviewLogEntry {
                memory_id: row.get("memory_id")?,
                timestamp: DateTime::parse_from_rfc3339(&reviewed_at)
                    .map(|d| d.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
                grade: Grade::from_i32(grade_i).unwrap_or(Grade::Good),
                new_stability: row.get("new_stability")?,
                new_interval_days: row.get("new_interval_days")?,
                source_session: row.get("source_session")?,
                source_project: row.get("source_project")?,
            })
        })
        .map_err(to_metadata_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_metadata_err)
}
