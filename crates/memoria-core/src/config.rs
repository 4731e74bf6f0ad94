//! Deployment-tunable configuration, grouped by subsystem the way
//! `cortex-core::config` splits `DecayConfig` / `ConsolidationConfig` /
//! `MultiagentConfig` out of one umbrella struct.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoriaConfig {
    pub decay: DecayConfig,
    pub dedup: DedupConfig,
    pub contradiction: ContradictionConfig,
    pub consolidation: ConsolidationConfig,
    pub reinforcement: ReinforcementConfig,
    pub scheduler: SchedulerConfig,
    pub cluster: ClusterConfig,
    pub maintenance: MaintenanceConfig,
    pub facade: FacadeConfig,
    pub oracle: OracleConfig,
}

impl Default for MemoriaConfig {
    fn default() -> Self {
        Self {
            decay: DecayConfig::default(),
            dedup: DedupConfig::default(),
            contradiction: ContradictionConfig::default(),
            consolidation: ConsolidationConfig::default(),
            reinforcement: ReinforcementConfig::default(),
            scheduler: SchedulerConfig::default(),
            cluster: ClusterConfig::default(),
            maintenance: MaintenanceConfig::default(),
            facade: FacadeConfig::default(),
            oracle: OracleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub per_day_multiplier: f64,
    pub grade_a: f64,
    pub grade_b: f64,
    pub grade_c: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            per_day_multiplier: IMPORTANCE_DECAY_PER_DAY,
            grade_a: GRADE_A_THRESHOLD,
            grade_b: GRADE_B_THRESHOLD,
            grade_c: GRADE_C_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    pub semantic_buckets: usize,
    /// When false, dedup considers only the calling project's universe (§9 open question).
    pub cross_project: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            semantic_buckets: SEMANTIC_QUANTIZE_BUCKETS,
            cross_project: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContradictionConfig {
    pub candidate_limit: usize,
    pub threshold: f64,
    /// When true, only the current project's corpus is scored (§9 default).
    pub project_scoped: bool,
}

impl Default for ContradictionConfig {
    fn default() -> Self {
        Self {
            candidate_limit: CONTRADICTION_CANDIDATE_LIMIT,
            threshold: CONTRADICTION_THRESHOLD,
            project_scoped: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    pub pattern_llm_merge_similarity: f64,
    pub dedup_definite_threshold: f64,
    pub dedup_gray_zone_low: f64,
    pub dedup_gray_zone_fallback: f64,
    pub min_prose_len: usize,
    pub json_noise_ratio: f64,
    pub session_quality_importance_threshold: f64,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            pattern_llm_merge_similarity: PATTERN_LLM_MERGE_SIMILARITY,
            dedup_definite_threshold: DEDUP_DEFINITE_THRESHOLD,
            dedup_gray_zone_low: DEDUP_GRAY_ZONE_LOW,
            dedup_gray_zone_fallback: DEDUP_GRAY_ZONE_FALLBACK,
            min_prose_len: MIN_PROSE_LEN,
            json_noise_ratio: JSON_NOISE_RATIO,
            session_quality_importance_threshold: SESSION_QUALITY_IMPORTANCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReinforcementConfig {
    pub threshold: f64,
}

impl Default for ReinforcementConfig {
    fn default() -> Self {
        Self {
            threshold: REINFORCEMENT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub stability_min: f64,
    pub stability_max: f64,
    pub promote_cross_project_stability: f64,
    pub promote_cross_project_reviews: u32,
    pub promote_cross_project_min_projects: usize,
    pub promote_deep_stability: f64,
    pub promote_deep_reviews: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            stability_min: STABILITY_MIN,
            stability_max: STABILITY_MAX,
            promote_cross_project_stability: PROMOTE_CROSS_PROJECT_STABILITY,
            promote_cross_project_reviews: PROMOTE_CROSS_PROJECT_REVIEWS,
            promote_cross_project_min_projects: PROMOTE_CROSS_PROJECT_MIN_PROJECTS,
            promote_deep_stability: PROMOTE_DEEP_STABILITY,
            promote_deep_reviews: PROMOTE_DEEP_REVIEWS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub keyword_min_len: usize,
    pub similarity_threshold: f64,
    pub name_top_k: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            keyword_min_len: CLUSTER_KEYWORD_MIN_LEN,
            similarity_threshold: CLUSTER_DEFAULT_THRESHOLD,
            name_top_k: CLUSTER_NAME_TOP_K,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    pub archival_importance_threshold: f64,
    pub high_importance_threshold: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            archival_importance_threshold: ARCHIVAL_IMPORTANCE_THRESHOLD,
            high_importance_threshold: HIGH_IMPORTANCE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    pub cache_ttl_secs: u64,
    pub bm25_weight: f64,
    pub semantic_weight: f64,
    pub default_top_k: usize,
    pub default_recent_n: usize,
}

impl FacadeConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: CACHE_TTL_SECS,
            bm25_weight: SEARCH_BM25_WEIGHT,
            semantic_weight: SEARCH_SEMANTIC_WEIGHT,
            default_top_k: DEFAULT_TOP_K,
            default_recent_n: DEFAULT_RECENT_N,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl OracleConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            timeout_secs: ORACLE_DEFAULT_TIMEOUT_SECS,
            max_retries: ORACLE_DEFAULT_RETRIES,
        }
    }
}
