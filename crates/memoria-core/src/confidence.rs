//! Confidence math (§4.C). Lives in `memoria-core` rather than
//! `memoria-decay` because the record store must enforce invariant (I3) —
//! `confidence_score = f(confirmations, contradictions)` — on every
//! mutation, and the store only depends on `memoria-core`.

use crate::constants::{
    CONFIDENCE_CONFIRM_CEILING, CONFIDENCE_CONFIRM_STEP, CONFIDENCE_CONTRADICT_STEP,
    CONFIDENCE_FLOOR, CONFIDENCE_INITIAL, CONFIDENCE_SOURCE_BOOST_CEILING,
    CONFIDENCE_SOURCE_BOOST_STEP,
};

/// `f(confirmations, contradictions)` from §4.C, with an optional
/// independent-source boost (sources = 1 means "no boost").
pub fn compute(confirmations: u32, contradictions: u32, independent_sources: u32) -> f64 {
    if confirmations == 0 && contradictions == 0 {
        return CONFIDENCE_INITIAL;
    }

    let base = (CONFIDENCE_INITIAL + CONFIDENCE_CONFIRM_STEP * confirmations as f64)
        .min(CONFIDENCE_CONFIRM_CEILING);
    let after_contradictions =
        (base - CONFIDENCE_CONTRADICT_STEP * contradictions as f64).max(CONFIDENCE_FLOOR);

    let sources = independent_sources.max(1);
    let boost = (CONFIDENCE_SOURCE_BOOST_STEP * (sources - 1) as f64)
        .min(CONFIDENCE_SOURCE_BOOST_CEILING);

    (after_contradictions + boost).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_events_is_initial() {
        assert_eq!(compute(0, 0, 1), CONFIDENCE_INITIAL);
    }

    #[test]
    fn confirmations_raise_confidence_up_to_ceiling() {
        assert!((compute(1, 0, 1) - 0.6).abs() < 1e-9);
        assert!((compute(4, 0, 1) - 0.9).abs() < 1e-9);
        // Ceiling at 0.9 even with more confirmations.
        assert!((compute(10, 0, 1) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn contradictions_lower_confidence_with_floor() {
        let c = compute(1, 3, 1);
        assert!((c - CONFIDENCE_FLOOR).abs() < 1e-9);
    }

    #[test]
    fn independent_sources_boost_is_capped() {
        let without = compute(2, 0, 1);
        let with_two = compute(2, 0, 2);
        let with_many = compute(2, 0, 20);
        assert!(with_two > without);
        assert!((with_many - (without + CONFIDENCE_SOURCE_BOOST_CEILING)).abs() < 1e-9);
    }
}
