//! Cross-session reinforcement matching (§4.G): bidirectional word-overlap
//! against the non-promoted existing corpus, best match above threshold.

use std::collections::BTreeSet;

use memoria_core::wordset::{bidirectional_overlap, word_set};

/// One existing memory eligible to be matched against.
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    pub memory_id: String,
    pub project_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub memory_id: String,
    pub project_id: String,
    pub similarity: f64,
}

/// Best non-promoted match for `new_content` above `threshold`, excluding
/// `exclude_id` (the new memory's own id, if it is already part of `corpus`).
pub fn best_match(
    new_content: &str,
    exclude_id: &str,
    corpus: &[CorpusEntry],
    promoted_ids: &BTreeSet<String>,
    threshold: f64,
) -> Option<Match> {
    let new_words = word_set(new_content);
    let mut best: Option<Match> = None;

    for entry in corpus {
        if entry.memory_id == exclude_id || promoted_ids.contains(&entry.memory_id) {
            continue;
        }
        let similarity = bidirectional_overlap(&new_words, &word_set(&entry.content));
        if similarity < threshold {
            continue;
        }
        if best.as_ref().map(|b| similarity > b.similarity).unwrap_or(true) {
            best = Some(Match {
                memory_id: entry.memory_id.clone(),
                project_id: entry.project_id.clone(),
                similarity,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, project: &str, content: &str) -> CorpusEntry {
        CorpusEntry {
            memory_id: id.to_string(),
            project_id: project.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn finds_best_match_above_threshold() {
        let corpus = vec![
            entry("mem-1", "proj-a", "rust ownership and borrowing rules"),
            entry("mem-2", "proj-a", "completely unrelated note about lunch"),
        ];
        let promoted = BTreeSet::new();
        let m = best_match("rust ownership rules explained in depth", "new-id", &corpus, &promoted, 0.35).unwrap();
        assert_eq!(m.memory_id, "mem-1");
    }

    #[test]
    fn promoted_memories_are_excluded() {
        let corpus = vec![entry("mem-1", "proj-a", "rust ownership and borrowing rules")];
        let mut promoted = BTreeSet::new();
        promoted.insert("mem-1".to_string());
        let m = best_match("rust ownership rules explained", "new-id", &corpus, &promoted, 0.1);
        assert!(m.is_none());
    }

    #[test]
    fn below_threshold_is_no_match() {
        let corpus = vec![entry("mem-1", "proj-a", "completely different subject matter entirely")];
        let promoted = BTreeSet::new();
        let m = best_match("rust ownership rules", "new-id", &corpus, &promoted, 0.35);
        assert!(m.is_none());
    }
}
