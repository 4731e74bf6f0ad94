//! Greedy keyword clustering (§4.J): rebuilds the whole cluster index from
//! the current memory set every run, deterministic in memory-id order.

use std::collections::BTreeSet;

use memoria_core::config::ClusterConfig;
use memoria_metadata::queries::cluster::ClusterRow;
use memoria_metadata::MetadataStore;
use memoria_store::RecordStore;
use tracing::info;

use crate::error::ClusterResult;
use crate::keywords;

struct BuildingCluster {
    project_id: String,
    centroid: BTreeSet<String>,
    member_ids: Vec<String>,
    token_counts: std::collections::HashMap<String, usize>,
}

impl BuildingCluster {
    fn seed(project_id: String, memory_id: String, keywords: BTreeSet<String>) -> Self {
        let mut token_counts = std::collections::HashMap::new();
        for kw in &keywords {
            *token_counts.entry(kw.clone()).or_insert(0) += 1;
        }
        Self {
            project_id,
            centroid: keywords,
            member_ids: vec![memory_id],
            token_counts,
        }
    }

    fn add(&mut self, memory_id: String, keywords: &BTreeSet<String>) {
        for kw in keywords {
            *self.token_counts.entry(kw.clone()).or_insert(0) += 1;
            self.centroid.insert(kw.clone());
        }
        self.member_ids.push(memory_id);
    }

    fn name(&self, top_k: usize) -> String {
        let mut tokens: Vec<(&String, &usize)> = self.token_counts.iter().collect();
        tokens.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        tokens
            .into_iter()
            .take(top_k)
            .map(|(token, _)| token.clone())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct Clusterer<'a> {
    store: &'a RecordStore,
    metadata: &'a MetadataStore,
}

impl<'a> Clusterer<'a> {
    pub fn new(store: &'a RecordStore, metadata: &'a MetadataStore) -> Self {
        Self { store, metadata }
    }

    /// Rebuild every cluster from the current active memory set and persist
    /// the result in one transaction (§4.J).
    pub fn rebuild(&self, config: &ClusterConfig) -> ClusterResult<Vec<ClusterRow>> {
        let mut memories = self.store.list_all_projects(false)?;
        memories.sort_by(|a, b| a.id.cmp(&b.id));

        let mut clusters: Vec<BuildingCluster> = Vec::new();
        for memory in &memories {
            let keywords = keywords::extract(&memory.content, config.keyword_min_len);
            if keywords.is_empty() {
                clusters.push(BuildingCluster::seed(memory.project_id.clone(), memory.id.clone(), keywords));
                continue;
            }

            let best = clusters
                .iter_mut()
                .map(|cluster| (keywords::similarity(&cluster.centroid, &keywords), cluster))
                .filter(|(score, _)| *score >= config.similarity_threshold)
                .max_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            match best {
                Some((_, cluster)) => cluster.add(memory.id.clone(), &keywords),
                None => clusters.push(BuildingCluster::seed(memory.project_id.clone(), memory.id.clone(), keywords)),
            }
        }

        let rows: Vec<ClusterRow> = clusters
            .iter()
            .map(|cluster| ClusterRow {
                id: uuid::Uuid::new_v4().simple().to_string(),
                project_id: cluster.project_id.clone(),
                name: cluster.name(config.name_top_k),
                keywords: cluster.centroid.iter().cloned().collect(),
                member_ids: cluster.member_ids.clone(),
            })
            .collect();

        self.metadata.replace_clusters(&rows)?;
        info!(cluster_count = rows.len(), memory_count = memories.len(), "clusters rebuilt");
        Ok(rows)
    }
}
