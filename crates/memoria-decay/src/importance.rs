//! `importance(body) → [0,1]` (§4.C): a pluggable default implementation.
//! Signal-based: presence of emphasis phrasing and length bands. Callers
//! needing a different heuristic (or an LLM-scored one) substitute their own.

const EMPHASIS_PHRASES: &[&str] = &[
    "always",
    "never",
    "important",
    "critical",
    "remember",
    "must",
    "key insight",
    "learned that",
    "note that",
];

/// Default content-based importance score.
pub fn score(body: &str) -> f64 {
    let lower = body.to_lowercase();
    let emphasis_hits = EMPHASIS_PHRASES.iter().filter(|p| lower.contains(*p)).count();
    let emphasis_score = (emphasis_hits as f64 * 0.1).min(0.3);

    let len = body.trim().chars().count();
    let length_score = match len {
        0..=29 => 0.1,
        30..=119 => 0.3,
        120..=399 => 0.5,
        _ => 0.4, // very long bodies are often transcript noise, not a single crisp learning.
    };

    (0.2 + emphasis_score + length_score).clamp(0.0, 1.0)
}
