//! Consolidation result bundle (§4.F step 6).

use memoria_core::config::ConsolidationConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionQuality {
    pub total_memories: usize,
    pub high_value_count: usize,
    /// `fraction with importance >= threshold * mean importance`.
    pub quality_score: f64,
}

impl SessionQuality {
    pub fn compute(importances: &[f64], config: &ConsolidationConfig) -> Self {
        let total = importances.len();
        if total == 0 {
            return Self {
                total_memories: 0,
                high_value_count: 0,
                quality_score: 0.0,
            };
        }
        let high_value = importances.iter().filter(|i| **i >= config.session_quality_importance_threshold).count();
        let mean = importances.iter().sum::<f64>() / total as f64;
        let fraction_high_value = high_value as f64 / total as f64;
        Self {
            total_memories: total,
            high_value_count: high_value,
            quality_score: fraction_high_value * mean,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsolidationReport {
    pub memories_extracted: usize,
    pub memories_saved: usize,
    pub memories_deduplicated: usize,
    pub contradictions_resolved: usize,
    pub session_quality: SessionQuality,
    pub saved_memory_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_score_combines_fraction_and_mean() {
        let config = ConsolidationConfig::default();
        let quality = SessionQuality::compute(&[0.9, 0.8, 0.3, 0.2], &config);
        assert_eq!(quality.total_memories, 4);
        assert_eq!(quality.high_value_count, 2);
        let expected_mean = (0.9 + 0.8 + 0.3 + 0.2) / 4.0;
        assert!((quality.quality_score - (0.5 * expected_mean)).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_zero_quality() {
        let config = ConsolidationConfig::default();
        let quality = SessionQuality::compute(&[], &config);
        assert_eq!(quality.quality_score, 0.0);
    }
}
