//! # memoria-scheduler
//!
//! FSRS-inspired spaced-repetition state machine (§4.H): review application,
//! due queries, and promotion eligibility.

pub mod engine;
pub mod error;
pub mod promotion;

pub use engine::{FsrsScheduler, ReviewOutcome};
pub use error::{SchedulerError, SchedulerResult};
pub use promotion::{get_promotion_candidates, PromotionCandidate, PromotionPath};
