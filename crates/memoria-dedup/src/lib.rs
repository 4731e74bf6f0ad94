//! # memoria-dedup
//!
//! Three-level (exact, normalized, quantized-vector) content-addressed
//! deduplication (§4.D), backed by `memoria-metadata`'s dedup tables.

pub mod engine;
pub mod error;
pub mod hashing;

pub use engine::{DedupCheck, DedupEngine, MatchLevel};
pub use error::{DedupError, DedupResult};
