//! Reinforcement orchestration (§4.G): for each newly-persisted memory, find
//! its best cross-corpus match and register a scheduler review for it.

use chrono::{DateTime, Utc};
use memoria_core::scheduler::{evolve, SchedulerState};
use memoria_metadata::MetadataStore;
use tracing::debug;

use crate::error::ReinforcementResult;
use crate::grade::grade_for;
use crate::matcher::{best_match, CorpusEntry};

#[derive(Debug, Clone, PartialEq)]
pub struct ReinforcementEvent {
    pub new_memory_id: String,
    pub matched_memory_id: String,
    pub similarity: f64,
    pub grade: memoria_core::scheduler::Grade,
}

pub struct ReinforcementDetector<'a> {
    metadata: &'a MetadataStore,
}

impl<'a> ReinforcementDetector<'a> {
    pub fn new(metadata: &'a MetadataStore) -> Self {
        Self { metadata }
    }

    /// Process one batch of newly-persisted memories `(id, project_id, content)`
    /// against `corpus` (the pre-batch snapshot). Loads the promoted-id set once.
    pub fn process_batch(
        &self,
        new_memories: &[(String, String, String)],
        corpus: &[CorpusEntry],
        threshold: f64,
        now: DateTime<Utc>,
    ) -> ReinforcementResult<Vec<ReinforcementEvent>> {
        let promoted_ids = self.metadata.get_promoted_ids()?;
        let mut events = Vec::new();

        for (new_id, new_project_id, content) in new_memories {
            let Some(m) = best_match(content, new_id, corpus, &promoted_ids, threshold) else {
                continue;
            };

            self.metadata.register_if_absent(&SchedulerState::new(m.memory_id.clone(), m.project_id.clone(), now))?;
            let current = self
                .metadata
                .get_scheduler_state(&m.memory_id)?
                .unwrap_or_else(|| SchedulerState::new(m.memory_id.clone(), m.project_id.clone(), now));

            let grade = grade_for(new_project_id, &m.project_id);
            let (new_stability, new_difficulty, new_interval_days) = evolve(grade, current.stability, current.difficulty);
            let new_due = now + chrono::Duration::seconds((new_interval_days * 86_400.0).round() as i64);

            self.metadata.record_review(
                &m.memory_id,
                grade,
                new_stability,
                new_difficulty,
                new_due,
                new_interval_days,
                new_project_id,
                None,
            )?;

            debug!(new_id = %new_id, matched_id = %m.memory_id, similarity = m.similarity, "reinforcement recorded");

            events.push(ReinforcementEvent {
                new_memory_id: new_id.clone(),
                matched_memory_id: m.memory_id,
                similarity: m.similarity,
                grade,
            });
        }

        Ok(events)
    }
}
