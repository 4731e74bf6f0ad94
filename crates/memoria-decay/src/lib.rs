//! # memoria-decay
//!
//! Importance scoring, daily decay, and grade classification (§4.C). The
//! confidence formula itself lives in `memoria_core::confidence` (the record
//! store depends on it directly for invariant I3); this crate re-exports it
//! alongside decay so callers have one place to reach for all of §4.C.

pub mod decay;
pub mod error;
pub mod grade;
pub mod importance;

pub use error::{DecayError, DecayResult};
pub use memoria_core::confidence::compute as compute_confidence;
