//! Promotion eligibility (§4.H): two disjunctive paths, both requiring
//! `promoted = false`. SQL pre-filters by stability/review_count; the
//! cross-project path's `|projects_validated| >= 2` check happens here in
//! Rust once the JSON column has been deserialized.

use memoria_core::constants::{
    PROMOTE_CROSS_PROJECT_MIN_PROJECTS, PROMOTE_CROSS_PROJECT_REVIEWS, PROMOTE_CROSS_PROJECT_STABILITY,
    PROMOTE_DEEP_REVIEWS, PROMOTE_DEEP_STABILITY,
};
use memoria_core::scheduler::SchedulerState;
use memoria_metadata::MetadataStore;

use crate::error::SchedulerResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionPath {
    CrossProject,
    DeepSingleProject,
}

#[derive(Debug, Clone)]
pub struct PromotionCandidate {
    pub state: SchedulerState,
    pub path: PromotionPath,
}

fn is_deep_single_project(state: &SchedulerState) -> bool {
    state.stability >= PROMOTE_DEEP_STABILITY && state.review_count >= PROMOTE_DEEP_REVIEWS
}

fn is_cross_project(state: &SchedulerState) -> bool {
    state.stability >= PROMOTE_CROSS_PROJECT_STABILITY
        && state.review_count >= PROMOTE_CROSS_PROJECT_REVIEWS
        && state.projects_validated.len() >= PROMOTE_CROSS_PROJECT_MIN_PROJECTS
}

pub fn get_promotion_candidates(metadata: &MetadataStore) -> SchedulerResult<Vec<PromotionCandidate>> {
    // The precandidate query needs the lower of the two stability thresholds
    // to avoid filtering out deep-single-project candidates in SQL; the
    // stricter cutoffs apply in the Rust checks below.
    let min_stability = PROMOTE_CROSS_PROJECT_STABILITY.min(PROMOTE_DEEP_STABILITY);
    let min_reviews = PROMOTE_CROSS_PROJECT_REVIEWS.min(PROMOTE_DEEP_REVIEWS);
    let precandidates = metadata.get_promotion_precandidates(min_stability, min_reviews)?;

    Ok(precandidates
        .into_iter()
        .filter_map(|state| {
            if is_cross_project(&state) {
                Some(PromotionCandidate {
                    state,
                    path: PromotionPath::CrossProject,
                })
            } else if is_deep_single_project(&state) {
                Some(PromotionCandidate {
                    state,
                    path: PromotionPath::DeepSingleProject,
                })
            } else {
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use memoria_metadata::MetadataStore;

    /// Drive `review_count` reviews through the real `record_review` path so
    /// `projects_validated` accumulates the given projects, landing at `stability`.
    fn register(metadata: &MetadataStore, id: &str, projects: &[&str], stability: f64, review_count: u32) {
        let now = Utc::now();
        metadata
            .register_if_absent(&SchedulerState::new(id.to_string(), projects[0].to_string(), now))
            .unwrap();
        for i in 0..review_count {
            let project = projects[(i as usize).min(projects.len() - 1)];
            metadata
                .record_review(id, memoria_core::scheduler::Grade::Good, stability, 0.5, now, 1.0, project, None)
                .unwrap();
        }
    }

    #[test]
    fn cross_project_path_requires_two_projects() {
        let metadata = MetadataStore::open_in_memory().unwrap();
        register(&metadata, "mem-1", &["proj-a", "proj-b"], 2.0, 2);
        let candidates = get_promotion_candidates(&metadata).unwrap();
        assert!(candidates.iter().any(|c| c.state.memory_id == "mem-1" && c.path == PromotionPath::CrossProject));
    }

    #[test]
    fn single_project_below_deep_threshold_is_not_a_candidate() {
        let metadata = MetadataStore::open_in_memory().unwrap();
        register(&metadata, "mem-1", &["proj-a"], 2.0, 2);
        let candidates = get_promotion_candidates(&metadata).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn deep_single_project_path_needs_no_second_project() {
        let metadata = MetadataStore::open_in_memory().unwrap();
        register(&metadata, "mem-1", &["proj-a"], 4.0, 5);
        let candidates = get_promotion_candidates(&metadata).unwrap();
        assert!(candidates.iter().any(|c| c.state.memory_id == "mem-1" && c.path == PromotionPath::DeepSingleProject));
    }
}
