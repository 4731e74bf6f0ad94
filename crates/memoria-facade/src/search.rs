//! Hybrid search (§4.L): BM25 (required) blended with optional pre-computed
//! semantic similarity. Default weights 0.3 BM25 / 0.7 semantic when
//! semantic scores are supplied, else BM25 carries the full weight.

use std::collections::HashMap;

use memoria_core::config::FacadeConfig;
use memoria_core::record::MemoryRecord;

use crate::bm25;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub memory: MemoryRecord,
    pub score: f64,
    pub bm25_score: f64,
    pub semantic_score: f64,
}

/// `semantic_scores`, when present, maps memory id to a pre-computed
/// cosine-similarity-style score in `[0, 1]`. Missing entries score 0.0.
pub fn search(
    query: &str,
    memories: &[MemoryRecord],
    semantic_scores: Option<&HashMap<String, f64>>,
    config: &FacadeConfig,
) -> Vec<SearchResult> {
    if memories.is_empty() {
        return Vec::new();
    }

    let contents: Vec<&str> = memories.iter().map(|m| m.content.as_str()).collect();
    let avg_len = contents.iter().map(|c| c.split_whitespace().count()).sum::<usize>() as f64 / contents.len() as f64;
    let idf = bm25::compute_idf(&contents);

    let raw_bm25: Vec<f64> = memories.iter().map(|m| bm25::score(query, &m.content, avg_len, &idf)).collect();
    let normalized_bm25 = bm25::normalize(&raw_bm25);

    let (bm25_weight, semantic_weight) = match semantic_scores {
        Some(_) => (config.bm25_weight, config.semantic_weight),
        None => (1.0, 0.0),
    };

    let mut results: Vec<SearchResult> = memories
        .iter()
        .zip(normalized_bm25)
        .map(|(memory, bm25_score)| {
            let semantic_score = semantic_scores.and_then(|s| s.get(&memory.id)).copied().unwrap_or(0.0);
            let score = bm25_weight * bm25_score + semantic_weight * semantic_score;
            SearchResult {
                memory: memory.clone(),
                score,
                bm25_score,
                semantic_score,
            }
        })
        .collect();

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn memory(id: &str, content: &str) -> MemoryRecord {
        MemoryRecord::new(id.to_string(), content.to_string(), "proj-a".to_string(), Utc::now())
    }

    #[test]
    fn bm25_only_ranks_exact_matches_first() {
        let memories = vec![
            memory("m1", "office setup and desk arrangement"),
            memory("m2", "kitchen remodel notes"),
        ];
        let results = search("office", &memories, None, &FacadeConfig::default());
        assert_eq!(results[0].memory.id, "m1");
        assert_eq!(results[0].semantic_score, 0.0);
    }

    #[test]
    fn semantic_scores_can_outrank_a_weaker_bm25_match() {
        let memories = vec![
            memory("m1", "office setup and desk arrangement mentions office twice office"),
            memory("m2", "workspace configuration for remote work"),
        ];
        let mut semantic = HashMap::new();
        semantic.insert("m2".to_string(), 1.0);
        semantic.insert("m1".to_string(), 0.0);

        let results = search("office", &memories, Some(&semantic), &FacadeConfig::default());
        assert_eq!(results[0].memory.id, "m2", "semantic weight of 0.7 should surface the semantic match");
    }

    #[test]
    fn empty_corpus_returns_no_results() {
        assert!(search("query", &[], None, &FacadeConfig::default()).is_empty());
    }
}
