//! Corpus statistics (§4.K step 3).

use std::collections::BTreeMap;

use memoria_core::config::MaintenanceConfig;
use memoria_core::record::MemoryRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub total_count: usize,
    pub high_importance_count: usize,
    pub mean_importance: f64,
    pub per_project_counts: BTreeMap<String, usize>,
    pub per_tag_counts: BTreeMap<String, usize>,
}

pub fn collect(memories: &[MemoryRecord], config: &MaintenanceConfig) -> Stats {
    let total_count = memories.len();
    let high_importance_count = memories
        .iter()
        .filter(|m| m.importance >= config.high_importance_threshold)
        .count();
    let mean_importance = if total_count == 0 {
        0.0
    } else {
        memories.iter().map(|m| m.importance).sum::<f64>() / total_count as f64
    };

    let mut per_project_counts = BTreeMap::new();
    let mut per_tag_counts = BTreeMap::new();
    for memory in memories {
        *per_project_counts.entry(memory.project_id.clone()).or_insert(0) += 1;
        for tag in memory.tags.iter() {
            *per_tag_counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    Stats {
        total_count,
        high_importance_count,
        mean_importance,
        per_project_counts,
        per_tag_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoria_core::record::{MemoryRecord, TagSet};
    use chrono::Utc;

    fn record(project_id: &str, importance: f64, tags: &[&str]) -> MemoryRecord {
        let mut r = MemoryRecord::new("id".into(), "body".into(), project_id.into(), Utc::now());
        r.importance = importance;
        r.tags = TagSet::from_iter_dedup(tags.iter().map(|t| t.to_string()));
        r
    }

    #[test]
    fn empty_corpus_has_zero_mean() {
        let stats = collect(&[], &MaintenanceConfig::default());
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.mean_importance, 0.0);
    }

    #[test]
    fn counts_high_importance_and_per_project_and_per_tag() {
        let memories = vec![
            record("proj-a", 0.9, &["#learning"]),
            record("proj-a", 0.2, &["#learning", "#rust"]),
            record("proj-b", 0.85, &["#rust"]),
        ];
        let stats = collect(&memories, &MaintenanceConfig::default());
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.high_importance_count, 2);
        assert_eq!(stats.per_project_counts["proj-a"], 2);
        assert_eq!(stats.per_project_counts["proj-b"], 1);
        assert_eq!(stats.per_tag_counts["#learning"], 2);
        assert_eq!(stats.per_tag_counts["#rust"], 2);
    }
}
