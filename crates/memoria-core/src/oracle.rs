//! The oracle abstraction: any external function the core delegates to
//! (LLM contradiction verdict, gray-zone dedup verdict, extractor). Always
//! optional with a documented fallback (§9 design note).
//!
//! Modeled as a cancellable async task returning a `Verdict | Unavailable`
//! sum type — `OracleOutcome` — so every call site can apply its documented
//! fallback without matching on error internals.

use async_trait::async_trait;

/// Boolean verdict an oracle can render for a contradiction check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Contradicts,
    Compatible,
}

/// Three-way verdict an oracle can render for a gray-zone dedup check (§4.F).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupVerdict {
    Duplicate,
    Update,
    New,
}

/// Outcome of any oracle call: either a verdict, or "unavailable" after the
/// caller-supplied deadline/retries were exhausted (§5, §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleOutcome<V> {
    Verdict(V),
    Unavailable,
}

impl<V> OracleOutcome<V> {
    pub fn is_available(&self) -> bool {
        matches!(self, OracleOutcome::Verdict(_))
    }
}

/// A contradiction oracle: given two memory bodies, does the new one
/// contradict the existing one?
#[async_trait]
pub trait ContradictionOracle: Send + Sync {
    async fn judge(&self, existing_body: &str, new_body: &str) -> anyhow::Result<Verdict>;
}

/// A gray-zone dedup oracle: given two near-duplicate bodies, is the new one
/// a duplicate, an update, or genuinely new?
#[async_trait]
pub trait DedupOracle: Send + Sync {
    async fn judge(&self, existing_body: &str, new_body: &str) -> anyhow::Result<DedupVerdict>;
}

/// The external candidate extractor (§1 — treated as an opaque function).
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, text: &str) -> anyhow::Result<Vec<ExtractedCandidate>>;
}

/// One candidate memory surfaced by the (opaque) extractor.
#[derive(Debug, Clone)]
pub struct ExtractedCandidate {
    pub content: String,
    pub importance: f64,
}

/// Umbrella marker trait bundling the three oracle roles, for call sites that
/// want a single object (e.g. the facade). Not required — callers may wire
/// each oracle independently.
pub trait Oracle: ContradictionOracle + DedupOracle + Extractor {}
impl<T: ContradictionOracle + DedupOracle + Extractor> Oracle for T {}

/// Drive an oracle call with a deadline and exponential-backoff retries,
/// returning `Unavailable` on exhaustion instead of propagating the error —
/// best-effort paths must never prevent a save (§7).
pub async fn call_with_retry<F, Fut, V>(
    timeout: std::time::Duration,
    max_retries: u32,
    mut call: F,
) -> OracleOutcome<V>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<V>>,
{
    let mut backoff = timeout / 4;
    for attempt in 0..max_retries.max(1) {
        match tokio::time::timeout(timeout, call()).await {
            Ok(Ok(verdict)) => return OracleOutcome::Verdict(verdict),
            Ok(Err(_)) | Err(_) => {
                if attempt + 1 < max_retries.max(1) {
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
            }
        }
    }
    OracleOutcome::Unavailable
}
