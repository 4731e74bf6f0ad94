//! Daily importance decay (§4.C): `new_importance = importance × 0.99^days`.
//! Applied by the maintenance runner to every active memory whose
//! `days_since_touched > 0`.

use chrono::{DateTime, Utc};
use memoria_core::config::DecayConfig;

/// Whole days elapsed since `updated`, truncated (not fractional) so that
/// re-running maintenance within the same day is always a no-op.
pub fn days_since_touched(updated: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - updated).num_days().max(0) as f64
}

/// Apply the configured per-day multiplier for `days` elapsed, clamped to [0,1].
pub fn apply(importance: f64, days: f64, config: &DecayConfig) -> f64 {
    if days <= 0.0 {
        return importance.clamp(0.0, 1.0);
    }
    (importance * config.per_day_multiplier.powf(days)).clamp(0.0, 1.0)
}

/// Convenience wrapper computing elapsed days from timestamps directly.
pub fn apply_since(importance: f64, updated: DateTime<Utc>, now: DateTime<Utc>, config: &DecayConfig) -> f64 {
    apply(importance, days_since_touched(updated, now), config)
}
