//! Decay pass (§4.K step 1): apply §4.C's daily decay to every active memory
//! whose `days_since_touched > 0`.

use chrono::{DateTime, Utc};
use memoria_core::record::MemoryRecordPatch;
use memoria_decay::decay;
use memoria_store::RecordStore;
use tracing::debug;

use crate::error::MaintenanceResult;

pub struct DecayPassReport {
    pub updated_count: usize,
}

pub fn run(
    store: &RecordStore,
    config: &memoria_core::config::DecayConfig,
    now: DateTime<Utc>,
    dry_run: bool,
) -> MaintenanceResult<DecayPassReport> {
    let memories = store.list_all_projects(false)?;
    let mut updated_count = 0;

    for memory in memories {
        let days = decay::days_since_touched(memory.updated, now);
        if days <= 0.0 {
            continue;
        }
        let new_importance = decay::apply(memory.importance, days, config);
        if (new_importance - memory.importance).abs() < f64::EPSILON {
            continue;
        }

        updated_count += 1;
        if dry_run {
            continue;
        }
        store.update(
            &memory.project_id,
            &memory.id,
            MemoryRecordPatch {
                importance: Some(new_importance),
                ..Default::default()
            },
        )?;
        debug!(memory_id = %memory.id, days, new_importance, "decay applied");
    }

    Ok(DecayPassReport { updated_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoria_core::record::TagSet;

    #[test]
    fn decays_memories_untouched_for_multiple_days() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        let record = store.create("proj-a", "body".into(), TagSet::new(), 0.8, None).unwrap();

        let config = memoria_core::config::DecayConfig::default();
        let future = record.updated + chrono::Duration::days(10);
        let report = run(&store, &config, future, false).unwrap();

        assert_eq!(report.updated_count, 1);
        let updated = store.get("proj-a", &record.id).unwrap();
        assert!(updated.importance < 0.8);
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        let record = store.create("proj-a", "body".into(), TagSet::new(), 0.8, None).unwrap();

        let config = memoria_core::config::DecayConfig::default();
        let future = record.updated + chrono::Duration::days(10);
        let report = run(&store, &config, future, true).unwrap();

        assert_eq!(report.updated_count, 1);
        let unchanged = store.get("proj-a", &record.id).unwrap();
        assert_eq!(unchanged.importance, 0.8);
    }

    #[test]
    fn untouched_memories_today_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        let record = store.create("proj-a", "body".into(), TagSet::new(), 0.8, None).unwrap();

        let config = memoria_core::config::DecayConfig::default();
        let report = run(&store, &config, record.updated, false).unwrap();
        assert_eq!(report.updated_count, 0);
    }

    #[test]
    fn rerunning_minutes_later_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        let record = store.create("proj-a", "body".into(), TagSet::new(), 0.8, None).unwrap();

        let config = memoria_core::config::DecayConfig::default();
        let moments_later = record.updated + chrono::Duration::minutes(5);
        let report = run(&store, &config, moments_later, false).unwrap();
        assert_eq!(report.updated_count, 0, "sub-day elapsed time must not round up to a decayed day");

        let unchanged = store.get("proj-a", &record.id).unwrap();
        assert_eq!(unchanged.importance, 0.8);
    }
}
