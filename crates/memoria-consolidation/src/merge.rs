//! Merge pattern-rule candidates with extractor candidates (§4.F step 2b):
//! for each pattern candidate, find the best extractor candidate by word-set
//! similarity ≥ threshold; keep the higher-importance version. Non-matched
//! extractor candidates are carried over unchanged.

use memoria_core::config::ConsolidationConfig;
use memoria_core::oracle::ExtractedCandidate;
use memoria_core::wordset::{bidirectional_overlap, word_set};

use crate::patterns::PatternCandidate;

#[derive(Debug, Clone, PartialEq)]
pub struct MergedCandidate {
    pub content: String,
    pub importance: f64,
}

pub fn merge(
    pattern_candidates: Vec<PatternCandidate>,
    extracted_candidates: Vec<ExtractedCandidate>,
    config: &ConsolidationConfig,
) -> Vec<MergedCandidate> {
    let mut used_extracted = vec![false; extracted_candidates.len()];
    let mut merged = Vec::with_capacity(pattern_candidates.len() + extracted_candidates.len());

    for pattern in pattern_candidates {
        let pattern_words = word_set(&pattern.content);
        let mut best: Option<(usize, f64)> = None;

        for (idx, extracted) in extracted_candidates.iter().enumerate() {
            if used_extracted[idx] {
                continue;
            }
            let similarity = bidirectional_overlap(&pattern_words, &word_set(&extracted.content));
            if similarity >= config.pattern_llm_merge_similarity {
                if best.map(|(_, best_sim)| similarity > best_sim).unwrap_or(true) {
                    best = Some((idx, similarity));
                }
            }
        }

        match best {
            Some((idx, _)) => {
                used_extracted[idx] = true;
                let extracted = &extracted_candidates[idx];
                merged.push(if extracted.importance > pattern.importance {
                    MergedCandidate {
                        content: extracted.content.clone(),
                        importance: extracted.importance,
                    }
                } else {
                    MergedCandidate {
                        content: pattern.content,
                        importance: pattern.importance,
                    }
                });
            }
            None => merged.push(MergedCandidate {
                content: pattern.content,
                importance: pattern.importance,
            }),
        }
    }

    for (idx, extracted) in extracted_candidates.into_iter().enumerate() {
        if !used_extracted[idx] {
            merged.push(MergedCandidate {
                content: extracted.content,
                importance: extracted.importance,
            });
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_pair_keeps_higher_importance_version() {
        let config = ConsolidationConfig::default();
        let patterns = vec![PatternCandidate {
            content: "the retry loop needs jittered backoff".to_string(),
            importance: 0.4,
        }];
        let extracted = vec![ExtractedCandidate {
            content: "the retry loop needs a jittered backoff to avoid thundering herds".to_string(),
            importance: 0.8,
        }];
        let merged = merge(patterns, extracted, &config);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].importance, 0.8);
    }

    #[test]
    fn unmatched_extracted_candidate_is_carried_over() {
        let config = ConsolidationConfig::default();
        let patterns = vec![PatternCandidate {
            content: "rust ownership rules are strict".to_string(),
            importance: 0.5,
        }];
        let extracted = vec![ExtractedCandidate {
            content: "completely unrelated fact about lunch orders".to_string(),
            importance: 0.6,
        }];
        let merged = merge(patterns, extracted, &config);
        assert_eq!(merged.len(), 2);
    }
}
