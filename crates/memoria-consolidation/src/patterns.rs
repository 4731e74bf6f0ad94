//! Pattern-based candidate extraction (§4.F step 2a): explicit learning
//! phrases, user corrections, problem/solution pairs, and assistant insights
//! matching learning indicators. Deterministic, no external calls.

use std::sync::OnceLock;

use memoria_decay::importance::score as importance_score;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub struct PatternCandidate {
    pub content: String,
    pub importance: f64,
}

const INSIGHT_SKIP_PHRASES: &[&str] = &["let me", "i'll", "here's", "sure", "okay", "got it"];

const INSIGHT_INDICATORS: &[&str] = &[
    "better to",
    "key is",
    "important",
    "pattern",
    "approach",
    "when you",
    "if you",
    "works well",
    "effective",
    "i've found",
    "rather than",
    "instead of",
    "acknowledge",
    "reframe",
    "ask",
    "often hide",
    "surface",
    "recommend",
];

fn learning_patterns() -> &'static [Regex] {
    static CELL: OnceLock<Vec<Regex>> = OnceLock::new();
    CELL.get_or_init(|| {
        vec![
            Regex::new(r"(?i)(?:learned|discovered|realized|found out|noticed) that ([^.!?]+[.!?])").unwrap(),
            Regex::new(r"(?i)(?:key insight|important to note|worth remembering):? ([^.!?]+[.!?])").unwrap(),
            Regex::new(r"(?i)(?:pattern|trend) (?:i noticed|observed|saw):? ([^.!?]+[.!?])").unwrap(),
        ]
    })
}

fn correction_patterns() -> &'static [Regex] {
    static CELL: OnceLock<Vec<Regex>> = OnceLock::new();
    CELL.get_or_init(|| {
        vec![
            Regex::new(r"(?is)user:.*?(?:actually|correction|no,|wrong|mistake|should be|meant to say) ([^.!?]+[.!?])").unwrap(),
            Regex::new(r"(?is)user:.*?(?:better way|instead try|prefer) ([^.!?]+[.!?])").unwrap(),
        ]
    })
}

fn problem_solution_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| {
        Regex::new(r"(?is)(?:problem|issue|challenge):.*?([^.!?]+[.!?]).*?(?:solution|fix|approach):.*?([^.!?]+[.!?])").unwrap()
    })
}

fn assistant_insight_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"(?s)assistant:.*?([A-Z][^.!?]{30,}[.!?])").unwrap())
}

/// Run all pattern families over the flattened conversation text.
pub fn extract(conversation: &str) -> Vec<PatternCandidate> {
    let mut out = Vec::new();
    extract_learnings(conversation, &mut out);
    extract_corrections(conversation, &mut out);
    extract_problem_solution(conversation, &mut out);
    extract_assistant_insights(conversation, &mut out);
    out
}

fn extract_learnings(conversation: &str, out: &mut Vec<PatternCandidate>) {
    for pattern in learning_patterns() {
        for caps in pattern.captures_iter(conversation) {
            let content = caps[1].trim().to_string();
            if (50..2000).contains(&content.len()) {
                let importance = importance_score(&content);
                if importance >= 0.5 {
                    out.push(PatternCandidate { content, importance });
                }
            }
        }
    }
}

fn extract_corrections(conversation: &str, out: &mut Vec<PatternCandidate>) {
    for pattern in correction_patterns() {
        for caps in pattern.captures_iter(conversation) {
            let content = caps[1].trim().to_string();
            if (50..2000).contains(&content.len()) {
                let boosted = (importance_score(&content) * 1.2).min(0.95);
                out.push(PatternCandidate {
                    content: format!("Correction: {content}"),
                    importance: boosted,
                });
            }
        }
    }
}

fn extract_problem_solution(conversation: &str, out: &mut Vec<PatternCandidate>) {
    for caps in problem_solution_pattern().captures_iter(conversation) {
        let problem = caps[1].trim();
        let solution = caps[2].trim();
        if problem.len() > 20 && solution.len() > 20 {
            let content = format!("Problem: {problem} Solution: {solution}");
            let importance = importance_score(&content);
            if importance >= 0.6 {
                out.push(PatternCandidate { content, importance });
            }
        }
    }
}

fn extract_assistant_insights(conversation: &str, out: &mut Vec<PatternCandidate>) {
    let mut count = 0;
    for caps in assistant_insight_pattern().captures_iter(conversation) {
        if count >= 3 {
            break;
        }
        let insight = caps[1].trim();
        if insight.len() > 2000 {
            continue;
        }
        let lower = insight.to_lowercase();
        if INSIGHT_SKIP_PHRASES.iter().any(|p| lower.contains(p)) {
            continue;
        }
        if INSIGHT_INDICATORS.iter().any(|p| lower.contains(p)) {
            let importance = importance_score(insight);
            if importance >= 0.5 {
                out.push(PatternCandidate {
                    content: insight.to_string(),
                    importance,
                });
                count += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_explicit_learning_phrase() {
        let text = "user: what happened\n\nassistant: I learned that the retry loop needs a jittered backoff to avoid thundering herds.";
        let candidates = extract(text);
        assert!(candidates.iter().any(|c| c.content.contains("jittered backoff")));
    }

    #[test]
    fn extracts_user_correction_with_boosted_importance() {
        let text = "user: actually the timeout should be 30 seconds not 5, that was a mistake in my earlier message";
        let candidates = extract(text);
        assert!(candidates.iter().any(|c| c.content.starts_with("Correction:")));
    }

    #[test]
    fn extracts_problem_solution_pair() {
        let text = "problem: the cache stampedes under load. solution: add a single-flight lock around the refill.";
        let candidates = extract(text);
        assert!(candidates.iter().any(|c| c.content.starts_with("Problem:") && c.content.contains("Solution:")));
    }

    #[test]
    fn skips_trivial_assistant_acknowledgements() {
        let text = "assistant: Sure, let me go ahead and run that command for you right now.";
        let candidates = extract(text);
        assert!(candidates.is_empty());
    }
}
