//! Due-review pass (§4.H): evolve a memory's FSRS state on an explicit
//! review, in one transaction with the review-log insert.

use chrono::{DateTime, Utc};
use memoria_core::scheduler::{evolve, Grade, SchedulerState};
use memoria_metadata::MetadataStore;
use tracing::info;

use crate::error::SchedulerResult;

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub memory_id: String,
    pub new_stability: f64,
    pub new_difficulty: f64,
    pub new_due: DateTime<Utc>,
    pub new_interval_days: f64,
}

pub struct FsrsScheduler<'a> {
    metadata: &'a MetadataStore,
}

impl<'a> FsrsScheduler<'a> {
    pub fn new(metadata: &'a MetadataStore) -> Self {
        Self { metadata }
    }

    /// Register `memory_id` for tracking if it isn't already (idempotent).
    pub fn register(&self, memory_id: &str, source_project: &str, now: DateTime<Utc>) -> SchedulerResult<bool> {
        Ok(self.metadata.register_if_absent(&SchedulerState::new(memory_id.to_string(), source_project.to_string(), now))?)
    }

    /// Apply one review for `memory_id`, evolving stability/difficulty/due
    /// and recording the review-log row atomically.
    pub fn review(
        &self,
        memory_id: &str,
        grade: Grade,
        reviewing_project: &str,
        source_session: Option<&str>,
        now: DateTime<Utc>,
    ) -> SchedulerResult<ReviewOutcome> {
        self.register(memory_id, reviewing_project, now)?;
        let current = self
            .metadata
            .get_scheduler_state(memory_id)?
            .unwrap_or_else(|| SchedulerState::new(memory_id.to_string(), reviewing_project.to_string(), now));

        let (new_stability, new_difficulty, new_interval_days) = evolve(grade, current.stability, current.difficulty);
        let new_due = now + chrono::Duration::seconds((new_interval_days * 86_400.0).round() as i64);

        self.metadata.record_review(
            memory_id,
            grade,
            new_stability,
            new_difficulty,
            new_due,
            new_interval_days,
            reviewing_project,
            source_session,
        )?;

        info!(memory_id, grade = grade.as_i32(), new_stability, new_interval_days, "scheduler review recorded");

        Ok(ReviewOutcome {
            memory_id: memory_id.to_string(),
            new_stability,
            new_difficulty,
            new_due,
            new_interval_days,
        })
    }

    /// `get_due`: due ≤ now ∧ ¬promoted (§4.H).
    pub fn get_due(&self, now: DateTime<Utc>) -> SchedulerResult<Vec<SchedulerState>> {
        Ok(self.metadata.get_due(now)?)
    }

    /// Batch set for reinforcement filtering (§4.G).
    pub fn get_promoted_ids(&self) -> SchedulerResult<std::collections::BTreeSet<String>> {
        Ok(self.metadata.get_promoted_ids()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn review_evolves_state_and_increments_count() {
        let metadata = MetadataStore::open_in_memory().unwrap();
        let scheduler = FsrsScheduler::new(&metadata);
        let now = Utc::now();

        let outcome = scheduler.review("mem-1", Grade::Good, "proj-a", None, now).unwrap();
        assert!((outcome.new_stability - 1.5).abs() < 1e-9);

        let state = metadata.get_scheduler_state("mem-1").unwrap().unwrap();
        assert_eq!(state.review_count, 1);
    }

    #[test]
    fn due_query_excludes_future_due_dates() {
        let metadata = MetadataStore::open_in_memory().unwrap();
        let scheduler = FsrsScheduler::new(&metadata);
        let now = Utc::now();
        scheduler.review("mem-1", Grade::Fail, "proj-a", None, now).unwrap();

        let due_now = scheduler.get_due(now).unwrap();
        assert!(due_now.is_empty(), "fail grade pushes due_date into the future");

        let due_far_future = scheduler.get_due(now + chrono::Duration::days(30)).unwrap();
        assert_eq!(due_far_future.len(), 1);
    }
}
