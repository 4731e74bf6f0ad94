//! Keyword extraction and Jaccard similarity (§4.J step 1).

use std::collections::BTreeSet;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "shall", "can", "to",
    "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through", "during",
    "before", "after", "above", "below", "between", "and", "but", "or", "not", "no", "if", "then",
    "than", "that", "this", "it", "its", "over",
];

/// Lowercase, split on non-alphanumerics, drop stopwords and words shorter
/// than `min_len`.
pub fn extract(content: &str, min_len: usize) -> BTreeSet<String> {
    content
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.len() >= min_len)
        .filter(|word| !STOPWORDS.contains(word))
        .map(|word| word.to_string())
        .collect()
}

/// Jaccard similarity between two keyword sets; 0.0 if either is empty.
pub fn similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_meaningful_words() {
        let keywords = extract("Always validate user input at system boundaries", 4);
        assert!(keywords.contains("validate"));
        assert!(keywords.contains("input"));
        assert!(keywords.contains("boundaries"));
    }

    #[test]
    fn filters_stopwords() {
        let keywords = extract("the quick brown fox jumped over the lazy dog", 4);
        assert!(!keywords.contains("the"));
        assert!(!keywords.contains("over"));
    }

    #[test]
    fn lowercases() {
        let keywords = extract("VALIDATE User INPUT", 4);
        assert!(keywords.contains("validate"));
        assert!(keywords.contains("user"));
    }

    #[test]
    fn empty_string_is_empty_set() {
        assert!(extract("", 4).is_empty());
    }

    #[test]
    fn identical_sets_score_one() {
        let a: BTreeSet<String> = ["validate", "input", "boundaries"].iter().map(|s| s.to_string()).collect();
        assert_eq!(similarity(&a, &a.clone()), 1.0);
    }

    #[test]
    fn disjoint_sets_score_zero() {
        let a: BTreeSet<String> = ["validate", "input"].iter().map(|s| s.to_string()).collect();
        let b: BTreeSet<String> = ["grid", "layout"].iter().map(|s| s.to_string()).collect();
        assert_eq!(similarity(&a, &b), 0.0);
    }

    #[test]
    fn partial_overlap_is_between_zero_and_one() {
        let a: BTreeSet<String> = ["validate", "input", "boundaries", "system"].iter().map(|s| s.to_string()).collect();
        let b: BTreeSet<String> = ["validate", "input", "data", "processing"].iter().map(|s| s.to_string()).collect();
        let score = similarity(&a, &b);
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn empty_sets_score_zero() {
        let empty: BTreeSet<String> = BTreeSet::new();
        let word: BTreeSet<String> = ["word".to_string()].into_iter().collect();
        assert_eq!(similarity(&empty, &word), 0.0);
        assert_eq!(similarity(&word, &empty), 0.0);
        assert_eq!(similarity(&empty, &empty), 0.0);
    }
}
