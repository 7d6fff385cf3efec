//! Entity co-occurrence networks over canonical records
//!
//! Builds undirected weighted graphs from the multi-valued columns of a
//! harmonized table (co-authorship from `authors`, keyword co-occurrence
//! from either keyword column), prunes them, and derives structure:
//! - per-record pair counting with within-record entity deduplication
//! - degree-pruning for author graphs, frequency-pruning for keyword graphs
//! - descriptive network statistics
//! - community partitioning (Louvain, with a greedy-modularity fallback)
//! - CSV node-list / edge-list export for interchange and visualization

pub mod community;
pub mod export;
pub mod graph;
pub mod stats;

pub use community::{
    modularity, CommunityDetector, CommunityPartitioner, GreedyModularity, Louvain,
};
pub use export::{export_edge_list, export_node_list, ExportError};
pub use graph::{build_cooccurrence, frequency_series, CooccurrenceGraph, EntityField, EntityNode};
pub use stats::GraphStats;
