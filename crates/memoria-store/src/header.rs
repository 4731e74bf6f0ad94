//! The on-disk wire format (§4.A):
//!
//! ```text
//! ---
//! id: 20240101120000-ab12
//! project_id: LFI
//! scope: project
//! tags: [#learning, #rust]
//! importance: 0.8
//! confidence_score: 0.5
//! confirmations: 0
//! contradictions: 0
//! source_session_id: null
//! created: 2024-01-01T12:00:00Z
//! updated: 2024-01-01T12:00:00Z
//! retrieval_weight: 0.8
//! schema_version: 2
//! ---
//! <markdown body>
//! ```
//!
//! The parser tolerates unknown keys (forward-compat, §9): anything not in
//! the known field set is preserved verbatim in `MemoryRecord::extra` and
//! re-emitted on the next write.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use memoria_core::record::{MemoryRecord, Scope, TagSet};

use crate::error::StoreError;

pub const DELIMITER: &str = "---";

const KNOWN_KEYS: &[&str] = &[
    "id",
    "project_id",
    "scope",
    "tags",
    "importance",
    "confidence_score",
    "confirmations",
    "contradictions",
    "source_session_id",
    "created",
    "updated",
    "retrieval_weight",
    "schema_version",
];

/// Render a header value in canonical bracketed-list / scalar / null form.
fn render_value(v: &str) -> String {
    v.to_string()
}

fn render_list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

pub fn serialize(record: &MemoryRecord) -> String {
    let mut out = String::new();
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&format!("id: {}\n", record.id));
    out.push_str(&format!("project_id: {}\n", record.project_id));
    out.push_str(&format!("scope: {}\n", record.scope));
    out.push_str(&format!("tags: {}\n", render_list(record.tags.as_slice())));
    out.push_str(&format!("importance: {}\n", record.importance));
    out.push_str(&format!("confidence_score: {}\n", record.confidence_score));
    out.push_str(&format!("confirmations: {}\n", record.confirmations));
    out.push_str(&format!("contradictions: {}\n", record.contradictions));
    match &record.source_session_id {
        Some(s) => out.push_str(&format!("source_session_id: {s}\n")),
        None => out.push_str("source_session_id: null\n"),
    }
    out.push_str(&format!("created: {}\n", record.created.to_rfc3339()));
    out.push_str(&format!("updated: {}\n", record.updated.to_rfc3339()));
    out.push_str(&format!("retrieval_weight: {}\n", record.retrieval_weight));
    out.push_str(&format!("schema_version: {}\n", record.schema_version));
    for (k, v) in &record.extra {
        out.push_str(&format!("{k}: {}\n", render_value(&v.to_string())));
    }
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&record.content);
    if !record.content.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn parse_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn parse(path_for_errors: &str, text: &str) -> Result<MemoryRecord, StoreError> {
    let mut lines = text.lines();

    let first = lines.next().unwrap_or("");
    if first.trim() != DELIMITER {
        return Err(StoreError::Corruption {
            path: path_for_errors.to_string(),
            details: "missing opening delimiter".to_string(),
        });
    }

    let mut header_lines = Vec::new();
    let mut found_closing = false;
    for line in lines.by_ref() {
        if line.trim() == DELIMITER {
            found_closing = true;
            break;
        }
        header_lines.push(line.to_string());
    }
    if !found_closing {
        return Err(StoreError::Corruption {
            path: path_for_errors.to_string(),
            details: "missing closing delimiter".to_string(),
        });
    }

    let body: String = lines.collect::<Vec<_>>().join("\n");

    let mut fields: BTreeMap<String, String> = BTreeMap::new();
    for line in &header_lines {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        fields.insert(key.trim().to_string(), value.trim().to_string());
    }

    let missing = |field: &str| StoreError::Corruption {
        path: path_for_errors.to_string(),
        details: format!("missing required header field: {field}"),
    };

    let id = fields.get("id").cloned().ok_or_else(|| missing("id"))?;
    let project_id = fields
        .get("project_id")
        .cloned()
        .ok_or_else(|| missing("project_id"))?;
    let scope = fields
        .get("scope")
        .and_then(|s| Scope::from_str(s).ok())
        .ok_or_else(|| missing("scope"))?;
    let tags = TagSet::from_iter_dedup(
        fields
            .get("tags")
            .map(|v| parse_list(v))
            .unwrap_or_default(),
    );
    let importance: f64 = fields
        .get("importance")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| missing("importance"))?;
    let confidence_score: f64 = fields
        .get("confidence_score")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| missing("confidence_score"))?;
    let confirmations: u32 = fields
        .get("confirmations")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let contradictions: u32 = fields
        .get("contradictions")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let source_session_id = fields.get("source_session_id").and_then(|v| {
        if v == "null" || v.is_empty() {
            None
        } else {
            Some(v.clone())
        }
    });
    let created: DateTime<Utc> = fields
        .get("created")
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|d| d.with_timezone(&Utc))
        .ok_or_else(|| missing("created"))?;
    let updated: DateTime<Utc> = fields
        .get("updated")
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|d| d.with_timezone(&Utc))
        .ok_or_else(|| missing("updated"))?;
    let retrieval_weight: f64 = fields
        .get("retrieval_weight")
        .and_then(|v| v.parse().ok())
        .unwrap_or(importance);
    let schema_version: u32 = fields
        .get("schema_version")
        .and_then(|v| v.parse().ok())
        .unwrap_or(memoria_core::constants::SCHEMA_VERSION);

    let mut extra = BTreeMap::new();
    for (k, v) in &fields {
        if !KNOWN_KEYS.contains(&k.as_str()) {
            extra.insert(k.clone(), serde_json::Value::String(v.clone()));
        }
    }

    Ok(MemoryRecord {
        id,
        content: body,
        project_id,
        scope,
        tags,
        importance,
        confidence_score,
        confirmations,
        contradictions,
        source_session_id,
        created,
        updated,
        retrieval_weight,
        schema_version,
        extra,
    })
}
