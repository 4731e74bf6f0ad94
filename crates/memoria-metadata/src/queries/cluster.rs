//! Cluster + cluster-membership queries (§4.B, §4.J). Rebuilt from scratch
//! each clusterer run, so the write path is a transactional truncate +
//! rewrite rather than incremental upserts.

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::{to_metadata_err, MetadataResult};

#[derive(Debug, Clone)]
pub struct ClusterRow {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub keywords: Vec<String>,
    pub member_ids: Vec<String>,
}

/// Truncate and rewrite every cluster + membership row in one transaction
/// (§4.J: "rebuilt from scratch each run, idempotent over the memory set").
pub fn replace_all(conn: &mut Connection, clusters: &[ClusterRow]) -> MetadataResult<()> {
    let tx = conn.transaction().map_err(to_metadata_err)?;
    tx.execute("DELETE FROM cluster_membership", []).map_err(to_metadata_err)?;
    tx.execute("DELETE FROM clusters", []).map_err(to_metadata_err)?;

    let now = Utc::now().to_rfc3339();
    for cluster in clusters {
        let keywords_json = serde_json::to_string(&cluster.keywords).unwrap_or_default();
        tx.execute(
            "INSERT INTO clusters (id, project_id, name, keywords, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![cluster.id, cluster.project_id, cluster.name, keywords_json, now],
        )
        .map_err(to_metadata_err)?;

        for member_id in &cluster.member_ids {
            tx.execute(
                "INSERT INTO cluster_membership (cluster_id, memory_id) VALUES (?1, ?2)",
                params![cluster.id, member_id],
            )
            .map_err(to_metadata_err)?;
        }
    }

    tx.commit().map_err(to_metadata_err)
}

pub fn list_all(conn: &Connection) -> MetadataResult<Vec<ClusterRow>> {
    let mut stmt = conn
        .prepare("SELECT id, project_id, name, keywords FROM clusters ORDER BY id ASC")
        .map_err(to_metadata_err)?;
    let clusters = stmt
        .query_map([], |row| {
            let keywords_json: String = row.get(3)?;
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                keywords_json,
            ))
        })
        .map_err(to_metadata_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_metadata_err)?;

    let mut out = Vec::with_capacity(clusters.len());
    for (id, project_id, name, keywords_json) in clusters {
        let keywords: Vec<String> = serde_json::from_str(&keywords_json).unwrap_or_default();
        let mut member_stmt = conn
            .prepare("SELECT memory_id FROM cluster_membership WHERE cluster_id = ?1")
            .map_err(to_metadata_err)?;
        let member_ids = member_stmt
            .query_map(params![id], |row| row.get::<_, String>(0))
            .map_err(to_metadata_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_metadata_err)?;
        out.push(ClusterRow {
            id,
            project_id,
            name,
            keywords,
            member_ids,
        });
    }
    Ok(out)
}

/// Ids present in at least one cluster — the complement (within a memory
/// set) is the "unclustered" report (§3).
pub fn clustered_memory_ids(conn: &Connection) -> MetadataResult<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT DISTINCT memory_id FROM cluster_membership")
        .map_err(to_metadata_err)?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(to_metadata_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(to_metadata_err)
}
