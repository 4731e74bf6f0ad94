//! # memoria-consolidation
//!
//! Turns a session transcript into deduplicated, contradiction-checked,
//! persisted memories (§4.F), plus the session-scoped dedup cache (§4.N).

pub mod dedup;
pub mod engine;
pub mod error;
pub mod flatten;
pub mod merge;
pub mod patterns;
pub mod report;
pub mod session_cache;

pub use engine::Consolidator;
pub use error::{ConsolidationError, ConsolidationResult};
pub use flatten::TranscriptMessage;
pub use report::{ConsolidationReport, SessionQuality};
pub use session_cache::SessionDedupCache;
