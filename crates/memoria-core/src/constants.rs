//! Tunable defaults for each component's thresholds and weights. Grouped by
//! the component that owns them; `MemoriaConfig` overrides these per-deployment.

/// §4.C — daily importance decay multiplier.
pub const IMPORTANCE_DECAY_PER_DAY: f64 = 0.99;

/// §4.C — importance grade bands.
pub const GRADE_A_THRESHOLD: f64 = 0.8;
pub const GRADE_B_THRESHOLD: f64 = 0.6;
pub const GRADE_C_THRESHOLD: f64 = 0.4;

/// §4.C — confidence math.
pub const CONFIDENCE_INITIAL: f64 = 0.5;
pub const CONFIDENCE_CONFIRM_STEP: f64 = 0.1;
pub const CONFIDENCE_CONFIRM_CEILING: f64 = 0.9;
pub const CONFIDENCE_CONTRADICT_STEP: f64 = 0.3;
pub const CONFIDENCE_FLOOR: f64 = 0.1;
pub const CONFIDENCE_SOURCE_BOOST_STEP: f64 = 0.05;
pub const CONFIDENCE_SOURCE_BOOST_CEILING: f64 = 0.1;

/// §4.D — dedup thresholds and quantization bucket count.
pub const SEMANTIC_QUANTIZE_BUCKETS: usize = 64;

/// §4.E — contradiction candidate selection.
pub const CONTRADICTION_CANDIDATE_LIMIT: usize = 5;
pub const CONTRADICTION_THRESHOLD: f64 = 0.3;

/// §4.F — consolidator thresholds.
pub const PATTERN_LLM_MERGE_SIMILARITY: f64 = 0.7;
pub const DEDUP_DEFINITE_THRESHOLD: f64 = 0.9;
pub const DEDUP_GRAY_ZONE_LOW: f64 = 0.5;
pub const DEDUP_GRAY_ZONE_FALLBACK: f64 = 0.75;
pub const MIN_PROSE_LEN: usize = 30;
pub const JSON_NOISE_RATIO: f64 = 0.2;
pub const SESSION_QUALITY_IMPORTANCE_THRESHOLD: f64 = 0.7;

/// §4.G — reinforcement detector.
pub const REINFORCEMENT_THRESHOLD: f64 = 0.35;

/// §4.H — FSRS scheduler.
pub const STABILITY_MIN: f64 = 0.1;
pub const STABILITY_MAX: f64 = 10.0;
pub const STABILITY_INITIAL: f64 = 1.0;
pub const DIFFICULTY_INITIAL: f64 = 0.5;
pub const FSRS_MULT_FAIL: f64 = 0.5;
pub const FSRS_MULT_HARD: f64 = 0.8;
pub const FSRS_MULT_GOOD: f64 = 1.5;
pub const FSRS_MULT_EASY: f64 = 2.2;
pub const DIFFICULTY_DELTA_SCALE: f64 = 0.1;
pub const MIN_INTERVAL_DAYS: f64 = 0.5;

/// Promotion eligibility (§4.H).
pub const PROMOTE_CROSS_PROJECT_STABILITY: f64 = 2.0;
pub const PROMOTE_CROSS_PROJECT_REVIEWS: u32 = 2;
pub const PROMOTE_CROSS_PROJECT_MIN_PROJECTS: usize = 2;
pub const PROMOTE_DEEP_STABILITY: f64 = 4.0;
pub const PROMOTE_DEEP_REVIEWS: u32 = 5;

/// §4.J — clusterer.
pub const CLUSTER_KEYWORD_MIN_LEN: usize = 4;
pub const CLUSTER_DEFAULT_THRESHOLD: f64 = 0.3;
pub const CLUSTER_NAME_TOP_K: usize = 3;

/// §4.K — maintenance runner.
pub const ARCHIVAL_IMPORTANCE_THRESHOLD: f64 = 0.2;
pub const HIGH_IMPORTANCE_THRESHOLD: f64 = 0.8;

/// §4.L — facade.
pub const CACHE_TTL_SECS: u64 = 5;
pub const SEARCH_BM25_WEIGHT: f64 = 0.3;
pub const SEARCH_SEMANTIC_WEIGHT: f64 = 0.7;
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_RECENT_N: usize = 10;

/// §5/§7 — oracle timeouts and retries.
pub const ORACLE_DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const ORACLE_DEFAULT_RETRIES: u32 = 3;
pub const METADATA_STORE_TIMEOUT_SECS: u64 = 30;

/// Current on-disk schema version (§3).
pub const SCHEMA_VERSION: u32 = 2;
