//! Briefing queue scheduling (§4.M): enqueues the trailing week as ready for
//! synthesis per project. The queue itself (and its idempotent insert) lives
//! in `memoria-metadata`; this just decides *which* periods to enqueue.

use chrono::{DateTime, Duration, Utc};
use memoria_metadata::queries::briefing::BriefingPeriod;
use memoria_metadata::MetadataStore;

use crate::error::MaintenanceResult;

/// Enqueue the trailing 7-day window ending at `now` as ready for synthesis,
/// for each project named in `project_ids`. Idempotent: re-running for the
/// same project/period is a no-op (`mark_period_ready` is `INSERT OR IGNORE`).
pub fn enqueue_weekly(metadata: &MetadataStore, project_ids: &[String], now: DateTime<Utc>) -> MaintenanceResult<()> {
    let period_start = now - Duration::days(7);
    for project_id in project_ids {
        metadata.mark_period_ready(project_id, period_start, now)?;
    }
    Ok(())
}

/// Periods ready for synthesis but not yet generated, oldest first.
pub fn pending(metadata: &MetadataStore) -> MaintenanceResult<Vec<BriefingPeriod>> {
    Ok(metadata.take_pending_briefings()?)
}

/// Mark a briefing as generated once the (out-of-scope) synthesizer has
/// produced its text for that period.
pub fn mark_generated(metadata: &MetadataStore, id: i64) -> MaintenanceResult<()> {
    Ok(metadata.mark_briefing_generated(id)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enqueueing_twice_for_the_same_week_does_not_duplicate() {
        let metadata = MetadataStore::open_in_memory().unwrap();
        let now = Utc::now();
        enqueue_weekly(&metadata, &["proj-a".to_string()], now).unwrap();
        enqueue_weekly(&metadata, &["proj-a".to_string()], now).unwrap();

        let pending = pending(&metadata).unwrap();
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn mark_generated_removes_a_period_from_the_pending_queue() {
        let metadata = MetadataStore::open_in_memory().unwrap();
        let now = Utc::now();
        enqueue_weekly(&metadata, &["proj-a".to_string()], now).unwrap();

        let first = pending(&metadata).unwrap();
        assert_eq!(first.len(), 1);
        mark_generated(&metadata, first[0].id).unwrap();

        assert!(pending(&metadata).unwrap().is_empty());
    }
}
