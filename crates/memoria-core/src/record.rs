//! The universal memory record (§3). Every persisted memory is a `MemoryRecord`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SCHEMA_VERSION;

/// §3 — partitions the corpus for retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Project,
    Global,
    Archived,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Scope::Project => "project",
            Scope::Global => "global",
            Scope::Archived => "archived",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(Scope::Project),
            "global" => Ok(Scope::Global),
            "archived" => Ok(Scope::Archived),
            other => Err(format!("unknown scope: {other}")),
        }
    }
}

/// Ordered set of tags: duplicates ignored, insertion order preserved (§3).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_iter_dedup(tags: impl IntoIterator<Item = String>) -> Self {
        let mut set = Self::new();
        for t in tags {
            set.push(t);
        }
        set
    }

    /// Insert a tag; no-op if already present.
    pub fn push(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.0.contains(&tag) {
            self.0.push(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

/// The universal memory struct. Every memory in the system is a `MemoryRecord`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Lexicographically sortable unique id (ms-timestamp + short random hash).
    pub id: String,
    /// Markdown body, any length.
    pub content: String,
    /// Partitions memories by owning project.
    pub project_id: String,
    pub scope: Scope,
    pub tags: TagSet,
    /// [0,1], decayed over time.
    pub importance: f64,
    /// [0,1], derived from confirmations/contradictions (§4.C).
    pub confidence_score: f64,
    pub confirmations: u32,
    pub contradictions: u32,
    pub source_session_id: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    /// Defaults to `importance` when absent.
    pub retrieval_weight: f64,
    pub schema_version: u32,
    /// Forward-compat: unknown header keys preserved verbatim on write (§9).
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl MemoryRecord {
    /// Construct a brand-new record with schema-current defaults.
    pub fn new(id: String, content: String, project_id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            content,
            project_id,
            scope: Scope::Project,
            tags: TagSet::new(),
            importance: 0.5,
            confidence_score: crate::constants::CONFIDENCE_INITIAL,
            confirmations: 0,
            contradictions: 0,
            source_session_id: None,
            created: now,
            updated: now,
            retrieval_weight: 0.5,
            schema_version: SCHEMA_VERSION,
            extra: BTreeMap::new(),
        }
    }

    /// (I4) invariant check: importance and retrieval_weight both in [0,1].
    pub fn bounds_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.importance) && (0.0..=1.0).contains(&self.retrieval_weight)
    }

    /// (I2) invariant: archived scope implies the `#archived` tag.
    pub fn archived_consistent(&self) -> bool {
        match self.scope {
            Scope::Archived => self.tags.contains("#archived"),
            _ => true,
        }
    }
}

/// A partial update applied by `RecordStore::update`. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordPatch {
    pub content: Option<String>,
    pub scope: Option<Scope>,
    pub tags: Option<TagSet>,
    pub importance: Option<f64>,
    pub confirmations: Option<u32>,
    pub contradictions: Option<u32>,
    pub retrieval_weight: Option<f64>,
}

impl MemoryRecordPatch {
    pub fn confirm() -> Self {
        Self::default()
    }
}
