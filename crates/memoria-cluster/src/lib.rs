//! # memoria-cluster
//!
//! Keyword extraction and deterministic greedy clustering of the memory set
//! (§4.J).

pub mod engine;
pub mod error;
pub mod keywords;

pub use engine::Clusterer;
pub use error::{ClusterError, ClusterResult};
