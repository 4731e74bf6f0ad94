//! `MetadataStore` — owns the connection pool, runs migrations at `open()`,
//! and exposes the scheduler/dedup/cluster/briefing query modules over it.
//! Mirrors `cortex-storage::StorageEngine`'s open/initialize/with_reader split.

use std::path::Path;

use chrono::{DateTime, Utc};
use memoria_core::scheduler::{Grade, ReviewLogEntry, SchedulerState};
use rusqlite::Connection;

use crate::error::MetadataResult;
use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{briefing, cluster, dedup, scheduler};

pub struct MetadataStore {
    pool: ConnectionPool,
    use_read_pool: bool,
}

impl MetadataStore {
    pub fn open(path: &Path) -> MetadataResult<Self> {
        let pool = ConnectionPool::open(path, crate::pool::ReadPool::default_size())?;
        let store = Self { pool, use_read_pool: true };
        store.initialize()?;
        Ok(store)
    }

    pub fn open_in_memory() -> MetadataResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let store = Self { pool, use_read_pool: false };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> MetadataResult<()> {
        self.pool.writer.with_conn(|conn| migrations::run_migrations(conn))
    }

    fn with_reader<F, T>(&self, f: F) -> MetadataResult<T>
    where
        F: FnOnce(&Connection) -> MetadataResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f)
        }
    }

    // --- scheduler (§4.H) ---

    pub fn register_if_absent(&self, state: &SchedulerState) -> MetadataResult<bool> {
        self.pool.writer.with_conn(|conn| scheduler::register_if_absent(conn, state))
    }

    pub fn get_scheduler_state(&self, memory_id: &str) -> MetadataResult<Option<SchedulerState>> {
        self.with_reader(|conn| scheduler::get(conn, memory_id))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn record_review(
        &self,
        memory_id: &str,
        grade: Grade,
        new_stability: f64,
        new_difficulty: f64,
        new_due: DateTime<Utc>,
        new_interval_days: f64,
        reviewing_project: &str,
        source_session: Option<&str>,
    ) -> MetadataResult<()> {
        self.pool.writer.with_conn_mut(|conn| {
            scheduler::record_review(
                conn,
                memory_id,
                grade,
                new_stability,
                new_difficulty,
                new_due,
                new_interval_days,
                reviewing_project,
                source_session,
            )
        })
    }

    pub fn get_due(&self, now: DateTime<Utc>) -> MetadataResult<Vec<SchedulerState>> {
        self.with_reader(|conn| scheduler::get_due(conn, now))
    }

    pub fn get_promotion_precandidates(
        &self,
        min_stability: f64,
        min_reviews: u32,
    ) -> MetadataResult<Vec<SchedulerState>> {
        self.with_reader(|conn| scheduler::get_promotion_precandidates(conn, min_stability, min_reviews))
    }

    pub fn get_promoted_ids(&self) -> MetadataResult<std::collections::BTreeSet<String>> {
        self.with_reader(scheduler::get_promoted_ids)
    }

    pub fn mark_promoted(&self, memory_id: &str, now: DateTime<Utc>) -> MetadataResult<()> {
        self.pool.writer.with_conn(|conn| scheduler::mark_promoted(conn, memory_id, now))
    }

    pub fn get_all_promoted(&self) -> MetadataResult<Vec<SchedulerState>> {
        self.with_reader(scheduler::get_all_promoted)
    }

    pub fn review_log_for(&self, memory_id: &str) -> MetadataResult<Vec<ReviewLogEntry>> {
        self.with_reader(|conn| scheduler::review_log_for(conn, memory_id))
    }

    // --- dedup (§4.D) ---

    pub fn register_dedup(&self, row: &dedup::DedupRow) -> MetadataResult<()> {
        self.pool.writer.with_conn(|conn| dedup::register(conn, row))
    }

    pub fn find_by_exact(&self, hash: &str) -> MetadataResult<Option<dedup::DedupRow>> {
        self.with_reader(|conn| dedup::find_by_exact(conn, hash))
    }

    pub fn find_by_normalized(&self, hash: &str) -> MetadataResult<Option<dedup::DedupRow>> {
        self.with_reader(|conn| dedup::find_by_normalized(conn, hash))
    }

    pub fn find_by_semantic(&self, hash: &str) -> MetadataResult<Option<dedup::DedupRow>> {
        self.with_reader(|conn| dedup::find_by_semantic(conn, hash))
    }

    pub fn dedup_groups(&self) -> MetadataResult<Vec<Vec<String>>> {
        self.with_reader(dedup::groups_by_normalized_hash)
    }

    pub fn record_dedup_event(
        &self,
        memory_id: &str,
        matched_id: &str,
        level: &str,
        verdict: &str,
    ) -> MetadataResult<()> {
        self.pool
            .writer
            .with_conn(|conn| dedup::record_event(conn, memory_id, matched_id, level, verdict))
    }

    // --- cluster (§4.J) ---

    pub fn replace_clusters(&self, clusters: &[cluster::ClusterRow]) -> MetadataResult<()> {
        self.pool.writer.with_conn_mut(|conn| cluster::replace_all(conn, clusters))
    }

    pub fn list_clusters(&self) -> MetadataResult<Vec<cluster::ClusterRow>> {
        self.with_reader(cluster::list_all)
    }

    pub fn clustered_memory_ids(&self) -> MetadataResult<Vec<String>> {
        self.with_reader(cluster::clustered_memory_ids)
    }

    // --- briefing queue (§4.M) ---

    pub fn mark_period_ready(
        &self,
        project_id: &str,
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> MetadataResult<()> {
        self.pool
            .writer
            .with_conn(|conn| briefing::mark_period_ready(conn, project_id, period_start, period_end))
    }

    pub fn take_pending_briefings(&self) -> MetadataResult<Vec<briefing::BriefingPeriod>> {
        self.with_reader(briefing::take_pending)
    }

    pub fn mark_briefing_generated(&self, id: i64) -> MetadataResult<()> {
        self.pool.writer.with_conn(|conn| briefing::mark_generated(conn, id))
    }
}
