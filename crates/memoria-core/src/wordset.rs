//! Lowercased, punctuation-stripped word sets: the shared word-overlap
//! primitive behind contradiction candidate selection (§4.E) and
//! reinforcement matching (§4.G) — the same math, different corpora.

use std::collections::BTreeSet;

pub fn word_set(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

/// `|A ∩ B| / min(|A|, |B|)` (§4.E candidate selection).
pub fn overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    shared as f64 / a.len().min(b.len()) as f64
}

/// `max(|A∩B|/|A|, |A∩B|/|B|)` (§4.G reinforcement matching).
pub fn bidirectional_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count() as f64;
    (shared / a.len() as f64).max(shared / b.len() as f64)
}
