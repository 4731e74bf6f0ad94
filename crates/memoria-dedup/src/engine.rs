//! `DedupEngine` — wraps `memoria_metadata::MetadataStore`'s dedup tables
//! with the exact → normalized → semantic probe order (§4.D).

use memoria_metadata::queries::dedup::DedupRow;
use memoria_metadata::MetadataStore;
use tracing::debug;

use crate::error::DedupResult;
use crate::hashing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLevel {
    Exact,
    Normalized,
    Semantic,
}

impl MatchLevel {
    pub fn confidence(self) -> f64 {
        match self {
            MatchLevel::Exact => 1.0,
            MatchLevel::Normalized => 0.9,
            MatchLevel::Semantic => 0.6,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            MatchLevel::Exact => "exact",
            MatchLevel::Normalized => "normalized",
            MatchLevel::Semantic => "semantic",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DedupCheck {
    pub is_duplicate: bool,
    pub match_level: Option<MatchLevel>,
    pub matched_id: Option<String>,
    pub confidence: f64,
}

pub struct DedupEngine<'a> {
    metadata: &'a MetadataStore,
}

impl<'a> DedupEngine<'a> {
    pub fn new(metadata: &'a MetadataStore) -> Self {
        Self { metadata }
    }

    /// `register(id, content, vector?)` — upserts all three hashes (§4.D).
    pub fn register(&self, id: &str, project_id: &str, content: &str, vector: Option<&[f32]>) -> DedupResult<()> {
        let semantic = vector.map(hashing::default_semantic_hash).unwrap_or_default();
        self.metadata.register_dedup(&DedupRow {
            memory_id: id.to_string(),
            project_id: project_id.to_string(),
            exact_hash: hashing::exact_hash(content),
            normalized_hash: hashing::normalized_hash(content),
            semantic_hash: semantic,
        })?;
        Ok(())
    }

    /// `check(content, vector?) → {is_duplicate, match_level, matched_id, confidence}`
    /// probes exact → normalized → semantic in order, returning the first hit.
    pub fn check(&self, candidate_id: &str, content: &str, vector: Option<&[f32]>) -> DedupResult<DedupCheck> {
        let exact = hashing::exact_hash(content);
        if let Some(row) = self.metadata.find_by_exact(&exact)? {
            return self.hit(candidate_id, row.memory_id, MatchLevel::Exact);
        }

        let normalized = hashing::normalized_hash(content);
        if let Some(row) = self.metadata.find_by_normalized(&normalized)? {
            return self.hit(candidate_id, row.memory_id, MatchLevel::Normalized);
        }

        if let Some(vector) = vector {
            let semantic = hashing::default_semantic_hash(vector);
            if !semantic.is_empty() {
                if let Some(row) = self.metadata.find_by_semantic(&semantic)? {
                    return self.hit(candidate_id, row.memory_id, MatchLevel::Semantic);
                }
            }
        }

        Ok(DedupCheck {
            is_duplicate: false,
            match_level: None,
            matched_id: None,
            confidence: 0.0,
        })
    }

    fn hit(&self, candidate_id: &str, matched_id: String, level: MatchLevel) -> DedupResult<DedupCheck> {
        debug!(candidate_id, matched_id = %matched_id, level = level.as_str(), "dedup hit");
        self.metadata
            .record_dedup_event(candidate_id, &matched_id, level.as_str(), "duplicate")?;
        Ok(DedupCheck {
            is_duplicate: true,
            match_level: Some(level),
            confidence: level.confidence(),
            matched_id: Some(matched_id),
        })
    }

    /// `groups()` — ids sharing the same normalized hash (§4.D).
    pub fn groups(&self) -> DedupResult<Vec<Vec<String>>> {
        Ok(self.metadata.dedup_groups()?)
    }
}
