//! Consolidator orchestration (§4.F): flatten → extract → merge → dedup →
//! contradiction check → persist → report.

use std::time::Duration;

use memoria_core::config::{ConsolidationConfig, ContradictionConfig};
use memoria_core::oracle::{ContradictionOracle, DedupOracle, Extractor};
use memoria_core::record::TagSet;
use memoria_dedup::DedupEngine;
use memoria_metadata::MetadataStore;
use memoria_store::RecordStore;
use tracing::info;

use crate::dedup::{self, DedupDecision};
use crate::error::ConsolidationResult;
use crate::flatten::{flatten, TranscriptMessage};
use crate::merge::merge;
use crate::patterns;
use crate::report::{ConsolidationReport, SessionQuality};
use crate::session_cache::SessionDedupCache;

pub struct Consolidator<'a> {
    store: &'a RecordStore,
    metadata: &'a MetadataStore,
    contradiction_oracle: Option<&'a dyn ContradictionOracle>,
    dedup_oracle: Option<&'a dyn DedupOracle>,
    extractor: Option<&'a dyn Extractor>,
    contradiction_config: ContradictionConfig,
    oracle_timeout: Duration,
    oracle_max_retries: u32,
}

impl<'a> Consolidator<'a> {
    pub fn new(store: &'a RecordStore, metadata: &'a MetadataStore) -> Self {
        Self {
            store,
            metadata,
            contradiction_oracle: None,
            dedup_oracle: None,
            extractor: None,
            contradiction_config: ContradictionConfig::default(),
            oracle_timeout: Duration::from_secs(10),
            oracle_max_retries: 2,
        }
    }

    pub fn with_contradiction_config(mut self, config: ContradictionConfig) -> Self {
        self.contradiction_config = config;
        self
    }

    pub fn with_contradiction_oracle(mut self, oracle: &'a dyn ContradictionOracle) -> Self {
        self.contradiction_oracle = Some(oracle);
        self
    }

    pub fn with_dedup_oracle(mut self, oracle: &'a dyn DedupOracle) -> Self {
        self.dedup_oracle = Some(oracle);
        self
    }

    pub fn with_extractor(mut self, extractor: &'a dyn Extractor) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_oracle_timing(mut self, timeout: Duration, max_retries: u32) -> Self {
        self.oracle_timeout = timeout;
        self.oracle_max_retries = max_retries;
        self
    }

    /// Consolidate one session transcript for `project_id`, persisting
    /// survivors with `source_session_id=session_id`.
    pub async fn consolidate(
        &self,
        project_id: &str,
        session_id: &str,
        messages: &[TranscriptMessage],
        config: &ConsolidationConfig,
    ) -> ConsolidationResult<ConsolidationReport> {
        let conversation = flatten(messages, config);

        let pattern_candidates = patterns::extract(&conversation);
        let extracted_candidates = match self.extractor {
            Some(extractor) => extractor.extract(&conversation).await.unwrap_or_default(),
            None => Vec::new(),
        };
        let merged = merge(pattern_candidates, extracted_candidates, config);
        let extracted_count = merged.len();

        let dedup_engine = DedupEngine::new(self.metadata);
        let mut session_cache = SessionDedupCache::new();
        let mut saved_importances = Vec::new();
        let mut saved_ids = Vec::new();
        let mut deduped_count = 0usize;
        let mut contradictions_resolved = 0usize;

        for candidate in merged {
            if session_cache.is_duplicate(&candidate.content) {
                deduped_count += 1;
                continue;
            }

            let corpus = self.live_corpus(project_id)?;

            let (decision, matched_id) = dedup::decide(
                &candidate.content,
                &corpus,
                self.dedup_oracle,
                config,
                self.oracle_timeout,
                self.oracle_max_retries,
            )
            .await;

            match decision {
                DedupDecision::Duplicate => {
                    deduped_count += 1;
                    session_cache.record(&candidate.content);
                    continue;
                }
                DedupDecision::Update => {
                    if let Some(id) = &matched_id {
                        self.store.archive(project_id, id, "superseded by consolidated update")?;
                    }
                }
                DedupDecision::New => {}
            }

            if let Some(oracle) = self.contradiction_oracle {
                let candidates = memoria_contradiction::candidate::select(&candidate.content, &corpus, &self.contradiction_config);
                let pairs: Vec<_> = candidates
                    .into_iter()
                    .map(|c| {
                        let body = corpus.iter().find(|(id, _)| *id == c.memory_id).map(|(_, b)| b.clone()).unwrap_or_default();
                        (c, body)
                    })
                    .collect();
                let resolution = memoria_contradiction::resolve(&candidate.content, &pairs, oracle, self.oracle_timeout, self.oracle_max_retries).await;
                if let memoria_contradiction::Action::Replace { contradicted_id } = resolution.action {
                    self.store.archive(project_id, &contradicted_id, "contradicted by newly consolidated memory")?;
                    contradictions_resolved += 1;
                }
            }

            let record = self.store.create(
                project_id,
                candidate.content.clone(),
                TagSet::from_iter_dedup(["#learning".to_string()]),
                candidate.importance,
                Some(session_id.to_string()),
            )?;

            dedup_engine.register(&record.id, project_id, &candidate.content, None)?;
            session_cache.record(&candidate.content);
            saved_importances.push(candidate.importance);
            saved_ids.push(record.id);
        }

        let session_quality = SessionQuality::compute(&saved_importances, config);
        info!(project_id, session_id, saved = saved_ids.len(), deduped_count, contradictions_resolved, "consolidated session");

        Ok(ConsolidationReport {
            memories_extracted: extracted_count,
            memories_saved: saved_ids.len(),
            memories_deduplicated: deduped_count,
            contradictions_resolved,
            session_quality,
            saved_memory_ids: saved_ids,
        })
    }

    fn live_corpus(&self, project_id: &str) -> ConsolidationResult<Vec<(String, String)>> {
        Ok(self
            .store
            .list(project_id, false)?
            .into_iter()
            .map(|r| (r.id, r.content))
            .collect())
    }
}
