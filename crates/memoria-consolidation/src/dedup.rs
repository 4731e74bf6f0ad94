//! Corpus-similarity dedup (§4.F step 3): definite duplicate at high
//! word-set similarity, a gray zone that defers to an optional oracle, and a
//! conservative fallback when the oracle is unavailable.

use std::time::Duration;

use memoria_core::config::ConsolidationConfig;
use memoria_core::oracle::{call_with_retry, DedupOracle, DedupVerdict, OracleOutcome};
use memoria_core::wordset::{overlap, word_set};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecision {
    Duplicate,
    Update,
    New,
}

/// Decide whether `content` duplicates anything in `corpus` (`(id, content)`
/// pairs). Returns the decision and, when not `New`, the matched memory id.
pub async fn decide(
    content: &str,
    corpus: &[(String, String)],
    oracle: Option<&dyn DedupOracle>,
    config: &ConsolidationConfig,
    timeout: Duration,
    max_retries: u32,
) -> (DedupDecision, Option<String>) {
    let new_words = word_set(content);

    let mut best: Option<(String, f64)> = None;
    for (id, existing) in corpus {
        let similarity = overlap(&new_words, &word_set(existing));
        if best.as_ref().map(|(_, best_sim)| similarity > *best_sim).unwrap_or(true) {
            best = Some((id.clone(), similarity));
        }
    }

    let Some((matched_id, similarity)) = best else {
        return (DedupDecision::New, None);
    };

    if similarity >= config.dedup_definite_threshold {
        return (DedupDecision::Duplicate, Some(matched_id));
    }
    if similarity < config.dedup_gray_zone_low {
        return (DedupDecision::New, None);
    }

    // Gray zone: consult the oracle, falling back to a stricter threshold.
    let existing_body = corpus.iter().find(|(id, _)| *id == matched_id).map(|(_, body)| body.clone()).unwrap_or_default();
    let verdict = match oracle {
        Some(oracle) => call_with_retry(timeout, max_retries, || oracle.judge(&existing_body, content)).await,
        None => OracleOutcome::Unavailable,
    };

    match verdict {
        OracleOutcome::Verdict(DedupVerdict::Duplicate) => (DedupDecision::Duplicate, Some(matched_id)),
        OracleOutcome::Verdict(DedupVerdict::Update) => (DedupDecision::Update, Some(matched_id)),
        OracleOutcome::Verdict(DedupVerdict::New) => (DedupDecision::New, None),
        OracleOutcome::Unavailable => {
            if similarity > config.dedup_gray_zone_fallback {
                (DedupDecision::Duplicate, Some(matched_id))
            } else {
                (DedupDecision::New, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct AlwaysUpdate;
    #[async_trait]
    impl DedupOracle for AlwaysUpdate {
        async fn judge(&self, _existing_body: &str, _new_body: &str) -> anyhow::Result<DedupVerdict> {
            Ok(DedupVerdict::Update)
        }
    }

    #[tokio::test]
    async fn high_similarity_is_definite_duplicate_without_oracle() {
        let config = ConsolidationConfig::default();
        let corpus = vec![("mem-1".to_string(), "the build fails when the cache is stale".to_string())];
        let (decision, id) = decide(
            "the build fails when the cache is stale",
            &corpus,
            None,
            &config,
            Duration::from_millis(50),
            1,
        )
        .await;
        assert_eq!(decision, DedupDecision::Duplicate);
        assert_eq!(id, Some("mem-1".to_string()));
    }

    #[tokio::test]
    async fn low_similarity_is_new() {
        let config = ConsolidationConfig::default();
        let corpus = vec![("mem-1".to_string(), "completely unrelated topic about lunch".to_string())];
        let (decision, _) = decide("rust ownership and borrowing rules", &corpus, None, &config, Duration::from_millis(50), 1).await;
        assert_eq!(decision, DedupDecision::New);
    }

    #[tokio::test]
    async fn gray_zone_without_oracle_falls_back_to_stricter_threshold() {
        let config = ConsolidationConfig::default();
        // Construct a similarity in (0.5, 0.75) via partial word overlap.
        let corpus = vec![("mem-1".to_string(), "alpha bravo charlie delta echo foxtrot".to_string())];
        let (decision, _) = decide("alpha bravo charlie zulu yankee xray", &corpus, None, &config, Duration::from_millis(50), 1).await;
        assert_eq!(decision, DedupDecision::New);
    }

    #[tokio::test]
    async fn gray_zone_with_oracle_defers_to_verdict() {
        let config = ConsolidationConfig::default();
        let corpus = vec![("mem-1".to_string(), "alpha bravo charlie delta echo foxtrot".to_string())];
        let (decision, id) = decide(
            "alpha bravo charlie zulu yankee xray",
            &corpus,
            Some(&AlwaysUpdate),
            &config,
            Duration::from_millis(50),
            1,
        )
        .await;
        assert_eq!(decision, DedupDecision::Update);
        assert_eq!(id, Some("mem-1".to_string()));
    }
}
