//! Descriptive network statistics

use petgraph::algo::connected_components;
use serde::{Deserialize, Serialize};

use crate::graph::CooccurrenceGraph;

/// Whole-graph statistics for reporting alongside a built network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    /// Fraction of possible node pairs that are connected.
    pub density: f64,
    pub avg_degree: f64,
    pub components: usize,
}

impl GraphStats {
    pub fn from_graph(graph: &CooccurrenceGraph) -> Self {
        let nodes = graph.node_count();
        let edges = graph.edge_count();
        if nodes == 0 {
            return Self::empty();
        }

        let density = if nodes > 1 {
            2.0 * edges as f64 / (nodes as f64 * (nodes as f64 - 1.0))
        } else {
            0.0
        };

        Self {
            nodes,
            edges,
            density,
            avg_degree: 2.0 * edges as f64 / nodes as f64,
            components: connected_components(graph.inner()),
        }
    }

    fn empty() -> Self {
        Self {
            nodes: 0,
            edges: 0,
            density: 0.0,
            avg_degree: 0.0,
            components: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_cooccurrence, EntityField};
    use bibmet_domain::{Record, SourceDb};

    fn record_with_authors(authors: &[&str]) -> Record {
        let mut r = Record::new(SourceDb::Harmonized);
        r.authors = authors.iter().map(|a| a.to_string()).collect();
        r
    }

    #[test]
    fn test_empty_graph() {
        let graph = build_cooccurrence(&[], EntityField::Authors, 0);
        assert_eq!(GraphStats::from_graph(&graph), GraphStats::empty());
    }

    #[test]
    fn test_triangle_stats() {
        let records = vec![record_with_authors(&["A", "B", "C"])];
        let graph = build_cooccurrence(&records, EntityField::Authors, 0);
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.nodes, 3);
        assert_eq!(stats.edges, 3);
        assert!((stats.density - 1.0).abs() < 1e-12);
        assert!((stats.avg_degree - 2.0).abs() < 1e-12);
        assert_eq!(stats.components, 1);
    }

    #[test]
    fn test_two_components() {
        let records = vec![
            record_with_authors(&["A", "B"]),
            record_with_authors(&["C", "D"]),
        ];
        let graph = build_cooccurrence(&records, EntityField::Authors, 0);
        let stats = GraphStats::from_graph(&graph);
        assert_eq!(stats.components, 2);
    }
}
