//! `RecordStore` — the record store component (§4.A). Owns atomic
//! read/write of memory record files under `<memory_root>/<project_id>/memories/`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use memoria_core::record::{MemoryRecord, MemoryRecordPatch, Scope, TagSet};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::header;
use crate::manifest;
use crate::path::safe_record_path;

/// A filter used by `search` — field predicates over project, scope, tag
/// inclusion, and body substring (§4.A — linear scan, no index assumed).
#[derive(Debug, Clone, Default)]
pub struct SearchPredicate {
    pub project_id: Option<String>,
    pub scope: Option<Scope>,
    pub tag: Option<String>,
    pub body_substring: Option<String>,
}

impl SearchPredicate {
    fn matches(&self, record: &MemoryRecord) -> bool {
        if let Some(p) = &self.project_id {
            if &record.project_id != p {
                return false;
            }
        }
        if let Some(s) = self.scope {
            if record.scope != s {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !record.tags.contains(tag) {
                return false;
            }
        }
        if let Some(sub) = &self.body_substring {
            if !record.content.contains(sub.as_str()) {
                return false;
            }
        }
        true
    }
}

pub struct RecordStore {
    memory_root: PathBuf,
}

impl RecordStore {
    pub fn open(memory_root: impl Into<PathBuf>) -> StoreResult<Self> {
        let memory_root = memory_root.into();
        fs::create_dir_all(&memory_root)?;
        Ok(Self { memory_root })
    }

    fn active_dir(&self, project_id: &str) -> PathBuf {
        self.memory_root.join(project_id).join("memories")
    }

    fn archived_dir(&self, project_id: &str) -> PathBuf {
        self.active_dir(project_id).join("archived")
    }

    fn generate_id(now: chrono::DateTime<Utc>) -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("{}-{}", now.timestamp_millis(), &suffix[..8])
    }

    /// Atomic write: write to a sibling temp file in the same directory,
    /// fsync, and rename onto the target. Removes the temp file on error.
    fn atomic_write(path: &Path, contents: &str) -> StoreResult<()> {
        let dir = path.parent().ok_or_else(|| {
            StoreError::InvalidId(path.to_string_lossy().to_string())
        })?;
        fs::create_dir_all(dir)?;
        let tmp_name = format!(
            ".{}.tmp-{}",
            path.file_name().and_then(|n| n.to_str()).unwrap_or("record"),
            std::process::id()
        );
        let tmp_path = dir.join(tmp_name);

        let write_result = (|| -> StoreResult<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
            Ok(())
        })();

        if let Err(e) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// `create(header_fields, body) → id` (§4.A).
    pub fn create(
        &self,
        project_id: &str,
        content: String,
        tags: TagSet,
        importance: f64,
        source_session_id: Option<String>,
    ) -> StoreResult<MemoryRecord> {
        let now = Utc::now();
        let dir = self.active_dir(project_id);
        fs::create_dir_all(&dir)?;

        for _ in 0..5 {
            let id = Self::generate_id(now);
            let path = safe_record_path(&dir, &id)?;
            if path.exists() {
                continue; // collision — retry with a fresh id (negligible probability).
            }

            let mut record = MemoryRecord::new(id.clone(), content.clone(), project_id.to_string(), now);
            record.tags = tags.clone();
            record.importance = importance.clamp(0.0, 1.0);
            record.retrieval_weight = record.importance;
            record.source_session_id = source_session_id.clone();

            Self::atomic_write(&path, &header::serialize(&record))?;
            info!(memory_id = %record.id, project_id, "created memory record");
            return Ok(record);
        }

        Err(StoreError::IdCollision(format!(
            "exhausted retries generating id in project {project_id}"
        )))
    }

    /// Persist a fully-formed record at its own id (used when restoring a
    /// contradiction-replaced record, or by tests/fixtures).
    pub fn create_record(&self, record: &MemoryRecord) -> StoreResult<()> {
        let dir = match record.scope {
            Scope::Archived => self.archived_dir(&record.project_id),
            _ => self.active_dir(&record.project_id),
        };
        fs::create_dir_all(&dir)?;
        let path = safe_record_path(&dir, &record.id)?;
        if path.exists() {
            return Err(StoreError::IdCollision(record.id.clone()));
        }
        Self::atomic_write(&path, &header::serialize(record))
    }

    /// `get(id) → record`: reads `project/` first, then `project/archived/`.
    pub fn get(&self, project_id: &str, id: &str) -> StoreResult<MemoryRecord> {
        let active_path = safe_record_path(&self.active_dir(project_id), id)?;
        if active_path.exists() {
            return self.read_record(&active_path);
        }
        let archived_path = safe_record_path(&self.archived_dir(project_id), id)?;
        if archived_path.exists() {
            return self.read_record(&archived_path);
        }
        Err(StoreError::NotFound(id.to_string()))
    }

    /// Resolve a record by id alone, scanning every project directory
    /// (used where only the memory id is known — e.g. promotion, which
    /// tracks candidates by id in the scheduler without a project index).
    pub fn find_by_id(&self, id: &str) -> StoreResult<MemoryRecord> {
        let Ok(entries) = fs::read_dir(&self.memory_root) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let Some(project_id) = entry.file_name().to_str().map(|s| s.to_string()) else {
                continue;
            };
            if let Ok(record) = self.get(&project_id, id) {
                return Ok(record);
            }
        }
        Err(StoreError::NotFound(id.to_string()))
    }

    fn read_record(&self, path: &Path) -> StoreResult<MemoryRecord> {
        let text = fs::read_to_string(path)?;
        header::parse(&path.to_string_lossy(), &text)
    }

    /// `list(include_archived?) → [record]`. Order is unspecified.
    pub fn list(&self, project_id: &str, include_archived: bool) -> StoreResult<Vec<MemoryRecord>> {
        let mut out = Vec::new();
        Self::collect_dir(&self.active_dir(project_id), &mut out)?;
        if include_archived {
            Self::collect_dir(&self.archived_dir(project_id), &mut out)?;
        }
        Ok(out)
    }

    /// List across every project directory under the memory root (used by
    /// cross-project components: reinforcement, dedup, list/search defaults).
    pub fn list_all_projects(&self, include_archived: bool) -> StoreResult<Vec<MemoryRecord>> {
        let mut out = Vec::new();
        let Ok(entries) = fs::read_dir(&self.memory_root) else {
            return Ok(out);
        };
        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let Some(project_id) = entry.file_name().to_str().map(|s| s.to_string()) else {
                continue;
            };
            out.extend(self.list(&project_id, include_archived)?);
        }
        Ok(out)
    }

    fn collect_dir(dir: &Path, out: &mut Vec<MemoryRecord>) -> StoreResult<()> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Ok(());
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let text = match fs::read_to_string(&path) {
                Ok(t) => t,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read record");
                    continue;
                }
            };
            match header::parse(&path.to_string_lossy(), &text) {
                Ok(record) => out.push(record),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping corrupted record");
                }
            }
        }
        Ok(())
    }

    /// `update(id, patch) → record`: merges fields, recomputes
    /// invariant-dependent derived fields (I3), and rewrites the file.
    pub fn update(
        &self,
        project_id: &str,
        id: &str,
        patch: MemoryRecordPatch,
    ) -> StoreResult<MemoryRecord> {
        let mut record = self.get(project_id, id)?;
        let was_archived = record.scope == Scope::Archived;

        if let Some(content) = patch.content {
            record.content = content;
        }
        if let Some(scope) = patch.scope {
            record.scope = scope;
        }
        if let Some(tags) = patch.tags {
            record.tags = tags;
        }
        if let Some(importance) = patch.importance {
            record.importance = importance.clamp(0.0, 1.0);
        }
        if let Some(confirmations) = patch.confirmations {
            record.confirmations = confirmations;
        }
        if let Some(contradictions) = patch.contradictions {
            record.contradictions = contradictions;
        }
        if let Some(weight) = patch.retrieval_weight {
            record.retrieval_weight = weight.clamp(0.0, 1.0);
        } else {
            record.retrieval_weight = record.retrieval_weight.clamp(0.0, 1.0);
        }

        // (I3) recompute confidence from the (possibly just-updated) counts.
        record.confidence_score =
            memoria_core::confidence::compute(record.confirmations, record.contradictions, 1);
        record.updated = Utc::now();

        let now_archived = record.scope == Scope::Archived;
        let old_path = if was_archived {
            safe_record_path(&self.archived_dir(project_id), id)?
        } else {
            safe_record_path(&self.active_dir(project_id), id)?
        };

        if was_archived == now_archived {
            Self::atomic_write(&old_path, &header::serialize(&record))?;
        } else {
            // Scope changed across the active/archived boundary: write the
            // new location first, then remove the old file.
            let new_dir = if now_archived {
                self.archived_dir(project_id)
            } else {
                self.active_dir(project_id)
            };
            let new_path = safe_record_path(&new_dir, id)?;
            Self::atomic_write(&new_path, &header::serialize(&record))?;
            let _ = fs::remove_file(&old_path);
        }

        debug!(memory_id = %record.id, "updated memory record");
        Ok(record)
    }

    /// `archive(id, reason) → bool`. Idempotent: `false` if already archived.
    pub fn archive(&self, project_id: &str, id: &str, reason: &str) -> StoreResult<bool> {
        let active_path = safe_record_path(&self.active_dir(project_id), id)?;
        if !active_path.exists() {
            // Either already archived, or doesn't exist at all.
            let archived_path = safe_record_path(&self.archived_dir(project_id), id)?;
            if archived_path.exists() {
                return Ok(false);
            }
            return Err(StoreError::NotFound(id.to_string()));
        }

        let mut record = self.read_record(&active_path)?;
        record.scope = Scope::Archived;
        record.tags.push("#archived");
        record.updated = Utc::now();

        let archived_dir = self.archived_dir(project_id);
        let archived_path = safe_record_path(&archived_dir, id)?;
        Self::atomic_write(&archived_path, &header::serialize(&record))?;
        fs::remove_file(&active_path)?;

        manifest::append_entry(&archived_dir, record.updated, id, reason, record.importance)?;
        info!(memory_id = %id, reason, "archived memory record");
        Ok(true)
    }

    /// `search(predicate) → [record]`: linear scan across one project, or
    /// all projects when `predicate.project_id` is `None` (§9 default).
    pub fn search(&self, predicate: &SearchPredicate) -> StoreResult<Vec<MemoryRecord>> {
        let all = match &predicate.project_id {
            Some(p) => self.list(p, true)?,
            None => self.list_all_projects(true)?,
        };
        Ok(all.into_iter().filter(|r| predicate.matches(r)).collect())
    }

    pub fn memory_root(&self) -> &Path {
        &self.memory_root
    }
}
