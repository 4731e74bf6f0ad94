//! Scope promotion (§4.I): lifts a memory from project-scope to global once
//! the scheduler says it has earned it, and repairs any memory left behind
//! by a crash between the scope update and the scheduler flag.

use chrono::{DateTime, Utc};
use memoria_core::record::{MemoryRecordPatch, Scope};
use memoria_metadata::MetadataStore;
use memoria_scheduler::{get_promotion_candidates, PromotionCandidate, PromotionPath};
use memoria_store::RecordStore;
use tracing::info;

use crate::error::PromotionResult;

#[derive(Debug, Clone, PartialEq)]
pub struct PromotionReport {
    pub memory_id: String,
    pub old_scope: Scope,
    pub new_scope: Scope,
    pub path: PromotionPath,
    pub stability: f64,
    pub review_count: u32,
    pub projects_validated: usize,
}

pub struct PromotionExecutor<'a> {
    store: &'a RecordStore,
    metadata: &'a MetadataStore,
}

impl<'a> PromotionExecutor<'a> {
    pub fn new(store: &'a RecordStore, metadata: &'a MetadataStore) -> Self {
        Self { store, metadata }
    }

    /// Pull every eligible candidate from the scheduler and promote each one.
    pub fn run(&self, now: DateTime<Utc>) -> PromotionResult<Vec<PromotionReport>> {
        let candidates = get_promotion_candidates(self.metadata)?;
        candidates
            .into_iter()
            .map(|candidate| self.promote_one(candidate, now))
            .collect()
    }

    /// Promote a single candidate.
    ///
    /// Order matters: the memory's scope is updated *before* the scheduler
    /// is flagged `promoted`, so a crash between the two steps leaves the
    /// memory already global (an idempotent state the next `reconcile` pass
    /// or re-run of `run` can finish) rather than a flagged-but-not-promoted
    /// memory that would silently vanish from future candidate scans.
    fn promote_one(&self, candidate: PromotionCandidate, now: DateTime<Utc>) -> PromotionResult<PromotionReport> {
        let PromotionCandidate { state, path } = candidate;
        let record = self.store.find_by_id(&state.memory_id)?;
        let old_scope = record.scope;

        let mut tags = record.tags.clone();
        tags.push("#promoted");
        let patch = MemoryRecordPatch {
            scope: Some(Scope::Global),
            tags: Some(tags),
            ..Default::default()
        };
        self.store.update(&record.project_id, &record.id, patch)?;
        self.metadata.mark_promoted(&state.memory_id, now)?;

        info!(memory_id = %state.memory_id, path = ?path, "memory promoted to global scope");

        Ok(PromotionReport {
            memory_id: state.memory_id,
            old_scope,
            new_scope: Scope::Global,
            path,
            stability: state.stability,
            review_count: state.review_count,
            projects_validated: state.projects_validated.len(),
        })
    }

    /// Repair memories left behind by a crash between the scope update and
    /// the scheduler flag going the *other* direction: a scheduler row
    /// flagged `promoted = true` whose memory never got `#promoted` or
    /// `scope = global`, e.g. from a process killed mid-`update`.
    pub fn reconcile(&self) -> PromotionResult<Vec<String>> {
        let mut repaired = Vec::new();
        for state in self.metadata.get_all_promoted()? {
            let record = match self.store.find_by_id(&state.memory_id) {
                Ok(record) => record,
                Err(memoria_store::StoreError::NotFound(_)) => continue,
                Err(e) => return Err(e.into()),
            };
            if record.scope == Scope::Global && record.tags.contains("#promoted") {
                continue;
            }

            let mut tags = record.tags.clone();
            tags.push("#promoted");
            let patch = MemoryRecordPatch {
                scope: Some(Scope::Global),
                tags: Some(tags),
                ..Default::default()
            };
            self.store.update(&record.project_id, &record.id, patch)?;
            info!(memory_id = %state.memory_id, "reconciled promoted memory missing scope/tag");
            repaired.push(state.memory_id);
        }
        Ok(repaired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoria_core::record::TagSet;

    fn env() -> (tempfile::TempDir, RecordStore, MetadataStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        let metadata = MetadataStore::open_in_memory().unwrap();
        (tmp, store, metadata)
    }

    fn drive_reviews(metadata: &MetadataStore, id: &str, projects: &[&str], stability: f64, review_count: u32) {
        let now = Utc::now();
        metadata
            .register_if_absent(&memoria_core::scheduler::SchedulerState::new(
                id.to_string(),
                projects[0].to_string(),
                now,
            ))
            .unwrap();
        for i in 0..review_count {
            let project = projects[(i as usize).min(projects.len() - 1)];
            metadata
                .record_review(id, memoria_core::scheduler::Grade::Good, stability, 0.5, now, 1.0, project, None)
                .unwrap();
        }
    }

    #[test]
    fn promotes_eligible_memory_to_global_scope() {
        let (_tmp, store, metadata) = env();
        let record = store
            .create("proj-a", "learned something durable".into(), TagSet::new(), 0.7, None)
            .unwrap();
        drive_reviews(&metadata, &record.id, &["proj-a", "proj-b"], 2.0, 2);

        let executor = PromotionExecutor::new(&store, &metadata);
        let reports = executor.run(Utc::now()).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].memory_id, record.id);
        assert_eq!(reports[0].old_scope, Scope::Project);
        assert_eq!(reports[0].new_scope, Scope::Global);
        assert_eq!(reports[0].path, PromotionPath::CrossProject);

        let updated = store.get("proj-a", &record.id).unwrap();
        assert_eq!(updated.scope, Scope::Global);
        assert!(updated.tags.contains("#promoted"));

        let state = metadata.get_scheduler_state(&record.id).unwrap().unwrap();
        assert!(state.promoted);
    }

    #[test]
    fn promoting_an_already_tagged_memory_does_not_duplicate_the_tag() {
        let (_tmp, store, metadata) = env();
        let record = store
            .create(
                "proj-a",
                "already tagged".into(),
                TagSet::from_iter_dedup(["#promoted".to_string()]),
                0.7,
                None,
            )
            .unwrap();
        drive_reviews(&metadata, &record.id, &["proj-a"], 4.0, 5);

        let executor = PromotionExecutor::new(&store, &metadata);
        executor.run(Utc::now()).unwrap();

        let updated = store.get("proj-a", &record.id).unwrap();
        assert_eq!(updated.tags.as_slice().iter().filter(|t| *t == "#promoted").count(), 1);
    }

    #[test]
    fn reconcile_repairs_memory_left_behind_by_a_crash() {
        let (_tmp, store, metadata) = env();
        let record = store
            .create("proj-a", "crashed mid promotion".into(), TagSet::new(), 0.7, None)
            .unwrap();
        drive_reviews(&metadata, &record.id, &["proj-a"], 4.0, 5);
        // Simulate the scheduler flag having been set without the scope update landing.
        metadata.mark_promoted(&record.id, Utc::now()).unwrap();

        let still_project_scoped = store.get("proj-a", &record.id).unwrap();
        assert_eq!(still_project_scoped.scope, Scope::Project);

        let executor = PromotionExecutor::new(&store, &metadata);
        let repaired = executor.reconcile().unwrap();

        assert_eq!(repaired, vec![record.id.clone()]);
        let fixed = store.get("proj-a", &record.id).unwrap();
        assert_eq!(fixed.scope, Scope::Global);
        assert!(fixed.tags.contains("#promoted"));
    }

    #[test]
    fn reconcile_is_a_no_op_when_everything_is_consistent() {
        let (_tmp, store, metadata) = env();
        let record = store
            .create("proj-a", "clean promotion".into(), TagSet::new(), 0.7, None)
            .unwrap();
        drive_reviews(&metadata, &record.id, &["proj-a", "proj-b"], 2.0, 2);

        let executor = PromotionExecutor::new(&store, &metadata);
        executor.run(Utc::now()).unwrap();
        let repaired = executor.reconcile().unwrap();
        assert!(repaired.is_empty());
    }
}
