//! BM25 keyword scoring over the in-memory corpus (§4.L). Smoothed IDF,
//! standard Okapi term-frequency saturation, scores normalized per-query by
//! dividing by the max before blending with semantic similarity.

use std::collections::HashMap;

const K1: f64 = 1.5;
const B: f64 = 0.75;

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase().split_whitespace().map(|s| s.to_string()).collect()
}

/// IDF per term across the corpus: `ln((N + 1) / (doc_count + 1)) + 1`.
pub fn compute_idf(documents: &[&str]) -> HashMap<String, f64> {
    let n = documents.len();
    if n == 0 {
        return HashMap::new();
    }

    let mut doc_freq: HashMap<String, usize> = HashMap::new();
    for doc in documents {
        let unique: std::collections::HashSet<String> = tokenize(doc).into_iter().collect();
        for term in unique {
            *doc_freq.entry(term).or_insert(0) += 1;
        }
    }

    doc_freq
        .into_iter()
        .map(|(term, count)| {
            let idf = ((n as f64 + 1.0) / (count as f64 + 1.0)).ln() + 1.0;
            (term, idf)
        })
        .collect()
}

/// Divide every score by the corpus max, yielding 0.0s if the max is 0.
pub fn normalize(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(0.0_f64, f64::max);
    if max == 0.0 {
        return vec![0.0; scores.len()];
    }
    scores.iter().map(|s| s / max).collect()
}

/// BM25 score of `document` against `query`, given the corpus's average
/// document length (in tokens) and precomputed IDF table.
pub fn score(query: &str, document: &str, avg_doc_length: f64, idf: &HashMap<String, f64>) -> f64 {
    if avg_doc_length <= 0.0 {
        return 0.0;
    }
    let query_terms = tokenize(query);
    let doc_terms = tokenize(document);
    let doc_length = doc_terms.len() as f64;

    let mut term_freq: HashMap<String, usize> = HashMap::new();
    for term in &doc_terms {
        *term_freq.entry(term.clone()).or_insert(0) += 1;
    }

    let mut total = 0.0;
    for term in &query_terms {
        let Some(&tf) = term_freq.get(term) else { continue };
        let tf = tf as f64;
        let numerator = tf * (K1 + 1.0);
        let denominator = tf + K1 * (1.0 - B + B * (doc_length / avg_doc_length));
        let term_idf = idf.get(term).copied().unwrap_or(1.0);
        total += term_idf * (numerator / denominator);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_term_match_scores_higher_than_no_match() {
        let docs = ["office setup guide", "kitchen remodel notes"];
        let idf = compute_idf(&docs);
        let avg_len = 3.0;

        let matching = score("office", docs[0], avg_len, &idf);
        let non_matching = score("office", docs[1], avg_len, &idf);
        assert!(matching > non_matching);
        assert_eq!(non_matching, 0.0);
    }

    #[test]
    fn rarer_terms_carry_more_weight() {
        let docs = ["common common common rare", "common common common common"];
        let idf = compute_idf(&docs);
        assert!(idf["rare"] > idf["common"]);
    }

    #[test]
    fn normalize_divides_by_max_and_handles_all_zero() {
        let normalized = normalize(&[1.0, 2.0, 4.0]);
        assert_eq!(normalized, vec![0.25, 0.5, 1.0]);
        assert_eq!(normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert_eq!(normalize(&[]), Vec::<f64>::new());
    }

    #[test]
    fn empty_corpus_has_no_idf() {
        assert!(compute_idf(&[]).is_empty());
    }
}
