//! Maintenance runner (§4.K): a single idempotent `run(dry_run) → report`
//! composing decay, archival, stats, and the health check.

use chrono::{DateTime, Utc};
use memoria_core::config::{DecayConfig, MaintenanceConfig};
use memoria_store::RecordStore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::archival_pass::{self, ArchivalPassReport};
use crate::decay_pass::{self, DecayPassReport};
use crate::error::MaintenanceResult;
use crate::health::{self, HealthReport};
use crate::stats::{self, Stats};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceReport {
    pub dry_run: bool,
    pub decayed_count: usize,
    pub archived_count: usize,
    pub stats: Stats,
    pub health: HealthReport,
}

pub struct MaintenanceRunner<'a> {
    store: &'a RecordStore,
}

impl<'a> MaintenanceRunner<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn run(
        &self,
        decay_config: &DecayConfig,
        maintenance_config: &MaintenanceConfig,
        now: DateTime<Utc>,
        dry_run: bool,
    ) -> MaintenanceResult<MaintenanceReport> {
        let DecayPassReport { updated_count: decayed_count } =
            decay_pass::run(self.store, decay_config, now, dry_run)?;
        let ArchivalPassReport { archived_count } = archival_pass::run(self.store, maintenance_config, dry_run)?;

        let memories = self.store.list_all_projects(false)?;
        let stats = stats::collect(&memories, maintenance_config);
        let health = health::check(self.store.memory_root());

        info!(decayed_count, archived_count, total = stats.total_count, dry_run, "maintenance run complete");

        Ok(MaintenanceReport {
            dry_run,
            decayed_count,
            archived_count,
            stats,
            health,
        })
    }
}
