use std::time::Duration;

use async_trait::async_trait;
use memoria_contradiction::{candidate, resolve, Action};
use memoria_core::config::ContradictionConfig;
use memoria_core::oracle::{ContradictionOracle, Verdict};

/// Contradicts only the candidate whose body contains "disabled".
struct SelectiveOracle;

#[async_trait]
impl ContradictionOracle for SelectiveOracle {
    async fn judge(&self, existing_body: &str, _new_body: &str) -> anyhow::Result<Verdict> {
        if existing_body.contains("disabled") {
            Ok(Verdict::Contradicts)
        } else {
            Ok(Verdict::Compatible)
        }
    }
}

struct FlakyThenFails;

#[async_trait]
impl ContradictionOracle for FlakyThenFails {
    async fn judge(&self, _existing_body: &str, _new_body: &str) -> anyhow::Result<Verdict> {
        anyhow::bail!("network blip")
    }
}

#[tokio::test]
async fn end_to_end_candidate_selection_then_contradiction_replace() {
    let config = ContradictionConfig::default();
    let corpus = vec![
        ("mem-a".to_string(), "two-factor auth is disabled for this account".to_string()),
        ("mem-b".to_string(), "completely unrelated note about lunch".to_string()),
    ];
    let new_body = "two-factor auth is enabled for this account";

    let candidates = candidate::select(new_body, &corpus, &config);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].memory_id, "mem-a");

    let pairs: Vec<_> = candidates
        .into_iter()
        .map(|c| {
            let body = corpus.iter().find(|(id, _)| *id == c.memory_id).unwrap().1.clone();
            (c, body)
        })
        .collect();

    let resolution = resolve::resolve(new_body, &pairs, &SelectiveOracle, Duration::from_millis(100), 2).await;
    assert_eq!(
        resolution.action,
        Action::Replace {
            contradicted_id: "mem-a".to_string()
        }
    );
}

#[tokio::test]
async fn no_candidates_resolves_to_save() {
    let resolution = resolve::resolve("anything", &[], &SelectiveOracle, Duration::from_millis(50), 1).await;
    assert_eq!(resolution.action, Action::Save);
    assert!(resolution.checked.is_empty());
}

#[tokio::test]
async fn oracle_exhausting_retries_still_defaults_to_save() {
    let pairs = vec![(
        candidate::Candidate {
            memory_id: "mem-z".to_string(),
            score: 0.9,
        },
        "some existing body".to_string(),
    )];
    let resolution = resolve::resolve("new body", &pairs, &FlakyThenFails, Duration::from_millis(10), 2).await;
    assert_eq!(resolution.action, Action::Save);
    assert_eq!(resolution.checked, vec!["mem-z".to_string()]);
}
