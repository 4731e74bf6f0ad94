//! Scheduler state value types shared between `memoria-metadata` (storage),
//! `memoria-scheduler` (FSRS evolution), and `memoria-promotion`.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// FSRS review grade (§4.H).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Grade {
    Fail = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Grade {
    pub fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            1 => Some(Grade::Fail),
            2 => Some(Grade::Hard),
            3 => Some(Grade::Good),
            4 => Some(Grade::Easy),
            _ => None,
        }
    }

    /// §4.H stability multiplier per grade.
    pub fn stability_multiplier(self) -> f64 {
        match self {
            Grade::Fail => 0.5,
            Grade::Hard => 0.8,
            Grade::Good => 1.5,
            Grade::Easy => 2.2,
        }
    }
}

/// One row per memory tracked for review (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerState {
    pub memory_id: String,
    pub stability: f64,
    pub difficulty: f64,
    pub due_date: DateTime<Utc>,
    pub review_count: u32,
    pub last_review: Option<DateTime<Utc>>,
    pub projects_validated: BTreeSet<String>,
    pub promoted: bool,
    pub promoted_date: Option<DateTime<Utc>>,
}

impl SchedulerState {
    /// Initial values on first registration (§3).
    pub fn new(memory_id: String, source_project: String, now: DateTime<Utc>) -> Self {
        let mut projects_validated = BTreeSet::new();
        projects_validated.insert(source_project);
        Self {
            memory_id,
            stability: crate::constants::STABILITY_INITIAL,
            difficulty: crate::constants::DIFFICULTY_INITIAL,
            due_date: now + chrono::Duration::days(1),
            review_count: 0,
            last_review: None,
            projects_validated,
            promoted: false,
            promoted_date: None,
        }
    }
}

/// Evolve stability/difficulty/interval on a single review (§4.H). Shared by
/// `memoria-scheduler`'s due-review pass and `memoria-reinforcement`'s
/// matched-memory registration — both drive the same state machine.
pub fn evolve(grade: Grade, stability: f64, difficulty: f64) -> (f64, f64, f64) {
    let new_stability = (stability * grade.stability_multiplier()).clamp(
        crate::constants::STABILITY_MIN,
        crate::constants::STABILITY_MAX,
    );
    let difficulty_delta = (3.0 - grade.as_i32() as f64) * crate::constants::DIFFICULTY_DELTA_SCALE;
    let new_difficulty = (difficulty + difficulty_delta).clamp(0.0, 1.0);
    let new_interval_days = (new_stability * (1.0 + (grade.as_i32() as f64 - 2.0) * 0.5)).max(crate::constants::MIN_INTERVAL_DAYS);
    (new_stability, new_difficulty, new_interval_days)
}

/// One row per review event (§3, append-only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewLogEntry {
    pub memory_id: String,
    pub timestamp: DateTime<Utc>,
    pub grade: Grade,
    pub new_stability: f64,
    pub new_interval_days: f64,
    pub source_session: Option<String>,
    pub source_project: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_grade_increases_stability() {
        let (stability, _, _) = evolve(Grade::Good, 1.0, 0.5);
        assert!((stability - 1.5).abs() < 1e-9);
    }

    #[test]
    fn fail_grade_decreases_stability_and_is_floored() {
        let (stability, _, _) = evolve(Grade::Fail, 0.15, 0.5);
        assert!(stability >= crate::constants::STABILITY_MIN);
    }

    #[test]
    fn stability_is_clamped_to_max() {
        let (stability, _, _) = evolve(Grade::Easy, 9.0, 0.5);
        assert!((stability - crate::constants::STABILITY_MAX).abs() < 1e-9);
    }

    #[test]
    fn interval_never_drops_below_minimum() {
        let (_, _, interval) = evolve(Grade::Fail, 0.1, 0.5);
        assert!(interval >= crate::constants::MIN_INTERVAL_DAYS);
    }
}
