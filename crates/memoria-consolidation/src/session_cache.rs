//! Session-scoped dedup cache (§4.N): avoid re-persisting a memory the
//! consolidator already surfaced earlier in the *same* session. Purely an
//! in-session optimization — never touches persisted state.

use std::collections::HashSet;

use memoria_dedup::hashing::normalized_hash;

#[derive(Debug, Default)]
pub struct SessionDedupCache {
    seen_normalized_hashes: HashSet<String>,
}

impl SessionDedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `content` (by normalized hash) was already seen this session.
    pub fn is_duplicate(&self, content: &str) -> bool {
        self.seen_normalized_hashes.contains(&normalized_hash(content))
    }

    /// Record `content` as seen. Idempotent.
    pub fn record(&mut self, content: &str) {
        self.seen_normalized_hashes.insert(normalized_hash(content));
    }

    pub fn len(&self) -> usize {
        self.seen_normalized_hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen_normalized_hashes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_detects_within_session_duplicates() {
        let mut cache = SessionDedupCache::new();
        assert!(!cache.is_duplicate("The Build Is Broken!"));
        cache.record("The Build Is Broken!");
        assert!(cache.is_duplicate("the build is broken"));
    }
}
