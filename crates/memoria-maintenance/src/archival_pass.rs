//! Archival pass (§4.K step 2): archive every active memory below the
//! importance floor. Goes through `RecordStore::archive`, which handles the
//! scope flip, the `#archived` tag, and the day's manifest entry.

use memoria_core::config::MaintenanceConfig;
use memoria_store::RecordStore;
use tracing::debug;

use crate::error::MaintenanceResult;

pub struct ArchivalPassReport {
    pub archived_count: usize,
}

pub fn run(store: &RecordStore, config: &MaintenanceConfig, dry_run: bool) -> MaintenanceResult<ArchivalPassReport> {
    let memories = store.list_all_projects(false)?;
    let mut archived_count = 0;

    for memory in memories {
        if memory.importance >= config.archival_importance_threshold {
            continue;
        }
        archived_count += 1;
        if dry_run {
            continue;
        }
        store.archive(&memory.project_id, &memory.id, "importance below archival threshold")?;
        debug!(memory_id = %memory.id, importance = memory.importance, "memory archived");
    }

    Ok(ArchivalPassReport { archived_count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoria_core::record::{Scope, TagSet};

    #[test]
    fn archives_memories_below_the_threshold() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        let low = store.create("proj-a", "stale".into(), TagSet::new(), 0.1, None).unwrap();
        let high = store.create("proj-a", "kept".into(), TagSet::new(), 0.8, None).unwrap();

        let config = MaintenanceConfig::default();
        let report = run(&store, &config, false).unwrap();

        assert_eq!(report.archived_count, 1);
        assert_eq!(store.get("proj-a", &low.id).unwrap().scope, Scope::Archived);
        assert_eq!(store.get("proj-a", &high.id).unwrap().scope, Scope::Project);
    }

    #[test]
    fn dry_run_counts_without_archiving() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        let low = store.create("proj-a", "stale".into(), TagSet::new(), 0.1, None).unwrap();

        let config = MaintenanceConfig::default();
        let report = run(&store, &config, true).unwrap();

        assert_eq!(report.archived_count, 1);
        assert_eq!(store.get("proj-a", &low.id).unwrap().scope, Scope::Project);
    }
}
