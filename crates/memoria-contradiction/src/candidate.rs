//! Candidate-pair selection (§4.E): score the existing corpus by word-set
//! overlap against a new body, keep the top-N above a threshold.

use memoria_core::config::ContradictionConfig;
use memoria_core::wordset::{overlap, word_set};

#[derive(Debug, Clone)]
pub struct Candidate {
    pub memory_id: String,
    pub score: f64,
}

/// `corpus`: `(memory_id, content)` pairs to score against `new_body`.
pub fn select(new_body: &str, corpus: &[(String, String)], config: &ContradictionConfig) -> Vec<Candidate> {
    let new_words = word_set(new_body);

    let mut scored: Vec<Candidate> = corpus
        .iter()
        .map(|(id, content)| Candidate {
            memory_id: id.clone(),
            score: overlap(&new_words, &word_set(content)),
        })
        .filter(|c| c.score >= config.threshold)
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(config.candidate_limit);
    scored
}
