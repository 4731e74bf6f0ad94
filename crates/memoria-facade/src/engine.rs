//! Orchestration facade (§4.L): the single entry point wiring the record
//! store, metadata store, and maintenance runner behind `save` / `search` /
//! `get_recent` / `get_stats` / `run_maintenance`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use memoria_core::config::{FacadeConfig, MemoriaConfig};
use memoria_core::record::{MemoryRecord, TagSet};
use memoria_maintenance::{MaintenanceReport, MaintenanceRunner};
use memoria_store::RecordStore;

use crate::cache::ListingCache;
use crate::error::FacadeResult;
use crate::search::{self, SearchResult};

pub struct MemoriaFacade {
    store: RecordStore,
    metadata: memoria_metadata::MetadataStore,
    cache: ListingCache,
    config: MemoriaConfig,
}

impl MemoriaFacade {
    pub fn new(store: RecordStore, metadata: memoria_metadata::MetadataStore, config: MemoriaConfig) -> Self {
        let cache = ListingCache::new(&config.facade);
        Self { store, metadata, cache, config }
    }

    pub fn facade_config(&self) -> &FacadeConfig {
        &self.config.facade
    }

    /// Persist a new memory directly (no consolidation pipeline — the
    /// straight-line write path for callers who already have a vetted body).
    pub fn save(
        &self,
        project_id: &str,
        content: String,
        tags: TagSet,
        importance: f64,
        source_session_id: Option<String>,
    ) -> FacadeResult<MemoryRecord> {
        let record = self.store.create(project_id, content, tags, importance, source_session_id)?;
        self.cache.invalidate();
        Ok(record)
    }

    /// Hybrid BM25 + optional semantic search over the cached listing.
    pub fn search(&self, query: &str, semantic_scores: Option<&HashMap<String, f64>>) -> FacadeResult<Vec<SearchResult>> {
        let memories = self.cache.get_or_load(|| self.store.list_all_projects(false))?;
        Ok(search::search(query, &memories, semantic_scores, &self.config.facade))
    }

    /// The `n` most recently updated memories, newest first.
    pub fn get_recent(&self, n: usize) -> FacadeResult<Vec<MemoryRecord>> {
        let memories = self.cache.get_or_load(|| self.store.list_all_projects(false))?;
        let mut sorted: Vec<MemoryRecord> = memories.as_ref().clone();
        sorted.sort_by(|a, b| b.updated.cmp(&a.updated));
        sorted.truncate(n);
        Ok(sorted)
    }

    pub fn get_stats(&self) -> FacadeResult<memoria_maintenance::Stats> {
        let memories = self.cache.get_or_load(|| self.store.list_all_projects(false))?;
        Ok(memoria_maintenance::stats::collect(&memories, &self.config.maintenance))
    }

    /// Run decay, archival, stats, and health, invalidating the listing
    /// cache afterward since archival changes scope.
    pub fn run_maintenance(&self, now: DateTime<Utc>, dry_run: bool) -> FacadeResult<MaintenanceReport> {
        let runner = MaintenanceRunner::new(&self.store);
        let report = runner.run(&self.config.decay, &self.config.maintenance, now, dry_run)?;
        if !dry_run {
            self.cache.invalidate();
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facade() -> (tempfile::TempDir, MemoriaFacade) {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).unwrap();
        let metadata = memoria_metadata::MetadataStore::open_in_memory().unwrap();
        let facade = MemoriaFacade::new(store, metadata, MemoriaConfig::default());
        (tmp, facade)
    }

    #[test]
    fn save_then_search_finds_the_new_memory() {
        let (_tmp, facade) = facade();
        facade.save("proj-a", "office setup and desk arrangement".into(), TagSet::new(), 0.6, None).unwrap();

        let results = facade.search("office", None).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].memory.content.contains("office"));
    }

    #[test]
    fn save_invalidates_the_listing_cache() {
        let (_tmp, facade) = facade();
        assert!(facade.get_recent(10).unwrap().is_empty());

        facade.save("proj-a", "first memory".into(), TagSet::new(), 0.6, None).unwrap();
        assert_eq!(facade.get_recent(10).unwrap().len(), 1);
    }

    #[test]
    fn get_recent_respects_the_limit_and_orders_newest_first() {
        let (_tmp, facade) = facade();
        facade.save("proj-a", "first".into(), TagSet::new(), 0.5, None).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        facade.save("proj-a", "second".into(), TagSet::new(), 0.5, None).unwrap();

        let recent = facade.get_recent(1).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].content, "second");
    }

    #[test]
    fn get_stats_reflects_saved_memories() {
        let (_tmp, facade) = facade();
        facade.save("proj-a", "body".into(), TagSet::new(), 0.9, None).unwrap();

        let stats = facade.get_stats().unwrap();
        assert_eq!(stats.total_count, 1);
        assert_eq!(stats.high_importance_count, 1);
    }

    #[test]
    fn run_maintenance_archives_low_importance_memories() {
        let (_tmp, facade) = facade();
        facade.save("proj-a", "stale".into(), TagSet::new(), 0.05, None).unwrap();

        let report = facade.run_maintenance(Utc::now(), false).unwrap();
        assert_eq!(report.archived_count, 1);
        assert!(facade.get_stats().unwrap().total_count == 0, "archived memories drop out of the active listing");
    }
}
