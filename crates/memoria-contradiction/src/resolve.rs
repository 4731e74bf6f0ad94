//! Resolution policy (§4.E): consult the oracle for each candidate pair; on
//! the first `CONTRADICTS`, return `replace`. Oracle failure defaults to
//! `save` — best-effort, never blocks a write (§7).

use std::time::Duration;

use memoria_core::oracle::{call_with_retry, ContradictionOracle, OracleOutcome, Verdict};

use crate::candidate::Candidate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Save,
    Replace { contradicted_id: String },
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub action: Action,
    /// Candidates actually consulted before a verdict (or exhaustion), in order.
    pub checked: Vec<String>,
}

/// Walk `candidates` in order, consulting `oracle` for each against
/// `new_body`. Stops at the first `CONTRADICTS`.
pub async fn resolve(
    new_body: &str,
    candidates: &[(Candidate, String)],
    oracle: &dyn ContradictionOracle,
    timeout: Duration,
    max_retries: u32,
) -> Resolution {
    let mut checked = Vec::new();

    for (candidate, existing_body) in candidates {
        checked.push(candidate.memory_id.clone());
        let outcome = call_with_retry(timeout, max_retries, || oracle.judge(existing_body, new_body)).await;

        match outcome {
            OracleOutcome::Verdict(Verdict::Contradicts) => {
                return Resolution {
                    action: Action::Replace {
                        contradicted_id: candidate.memory_id.clone(),
                    },
                    checked,
                };
            }
            OracleOutcome::Verdict(Verdict::Compatible) => continue,
            OracleOutcome::Unavailable => continue, // best-effort: never blocks write
        }
    }

    Resolution {
        action: Action::Save,
        checked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct AlwaysContradicts;
    #[async_trait]
    impl ContradictionOracle for AlwaysContradicts {
        async fn judge(&self, _existing_body: &str, _new_body: &str) -> anyhow::Result<Verdict> {
            Ok(Verdict::Contradicts)
        }
    }

    struct AlwaysCompatible;
    #[async_trait]
    impl ContradictionOracle for AlwaysCompatible {
        async fn judge(&self, _existing_body: &str, _new_body: &str) -> anyhow::Result<Verdict> {
            Ok(Verdict::Compatible)
        }
    }

    struct AlwaysFails;
    #[async_trait]
    impl ContradictionOracle for AlwaysFails {
        async fn judge(&self, _existing_body: &str, _new_body: &str) -> anyhow::Result<Verdict> {
            anyhow::bail!("oracle down")
        }
    }

    fn candidates() -> Vec<(Candidate, String)> {
        vec![(
            Candidate {
                memory_id: "mem-1".into(),
                score: 0.8,
            },
            "existing body".into(),
        )]
    }

    #[tokio::test]
    async fn contradiction_triggers_replace() {
        let res = resolve("new body", &candidates(), &AlwaysContradicts, Duration::from_millis(50), 1).await;
        assert_eq!(res.action, Action::Replace { contradicted_id: "mem-1".into() });
    }

    #[tokio::test]
    async fn compatible_falls_through_to_save() {
        let res = resolve("new body", &candidates(), &AlwaysCompatible, Duration::from_millis(50), 1).await;
        assert_eq!(res.action, Action::Save);
    }

    #[tokio::test]
    async fn oracle_failure_defaults_to_save() {
        let res = resolve("new body", &candidates(), &AlwaysFails, Duration::from_millis(20), 1).await;
        assert_eq!(res.action, Action::Save);
    }
}
