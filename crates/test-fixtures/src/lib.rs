//! Shared test builders for memory records, transcripts, and scheduler rows,
//! used across the workspace's integration tests so every crate constructs
//! the same minimal valid fixtures instead of re-deriving them locally.

use chrono::{DateTime, Utc};
use memoria_consolidation::TranscriptMessage;
use memoria_core::record::{MemoryRecord, TagSet};
use memoria_core::scheduler::SchedulerState;

/// A memory record with sane defaults, overridable via the builder methods.
pub struct MemoryRecordBuilder {
    record: MemoryRecord,
}

impl MemoryRecordBuilder {
    pub fn new(id: &str, project_id: &str, content: &str) -> Self {
        Self {
            record: MemoryRecord::new(id.to_string(), content.to_string(), project_id.to_string(), Utc::now()),
        }
    }

    pub fn importance(mut self, importance: f64) -> Self {
        self.record.importance = importance;
        self.record.retrieval_weight = importance;
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.record.tags = TagSet::from_iter_dedup(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn updated(mut self, updated: DateTime<Utc>) -> Self {
        self.record.updated = updated;
        self
    }

    pub fn build(self) -> MemoryRecord {
        self.record
    }
}

/// Build a flat list of `TranscriptMessage`s from `(role, content)` pairs, the
/// shape every consolidation test needs to hand `Consolidator::consolidate`.
pub fn transcript(pairs: &[(&str, &str)]) -> Vec<TranscriptMessage> {
    pairs
        .iter()
        .map(|(role, content)| TranscriptMessage {
            role: role.to_string(),
            content: content.to_string(),
        })
        .collect()
}

/// A freshly-registered scheduler row, for tests that need a starting point
/// without driving it through real reviews.
pub fn scheduler_state(memory_id: &str, source_project: &str, now: DateTime<Utc>) -> SchedulerState {
    SchedulerState::new(memory_id.to_string(), source_project.to_string(), now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_record_builder_applies_overrides() {
        let record = MemoryRecordBuilder::new("mem-1", "proj-a", "body")
            .importance(0.75)
            .tags(&["#learning"])
            .build();
        assert_eq!(record.importance, 0.75);
        assert_eq!(record.retrieval_weight, 0.75);
        assert!(record.tags.contains("#learning"));
    }

    #[test]
    fn transcript_builds_role_content_pairs() {
        let messages = transcript(&[("user", "hello"), ("assistant", "hi there")]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[1].content, "hi there");
    }

    #[test]
    fn scheduler_state_starts_unpromoted() {
        let state = scheduler_state("mem-1", "proj-a", Utc::now());
        assert!(!state.promoted);
        assert_eq!(state.review_count, 0);
    }
}
