//! Co-occurrence network integration tests
//!
//! Drives graph construction from canonical records the way the analytics
//! layer does, including the documented co-authorship scenario and the
//! pruning contracts.

use bibmet_domain::{Record, SourceDb};
use bibmet_network::{
    build_cooccurrence, frequency_series, CommunityPartitioner, EntityField, GraphStats,
};

fn author_records(cells: &[&str]) -> Vec<Record> {
    cells
        .iter()
        .map(|cell| {
            let mut r = Record::new(SourceDb::Harmonized);
            r.title = (*cell).to_string();
            r.authors = cell.split(';').map(|a| a.trim().to_string()).collect();
            r
        })
        .collect()
}

#[test]
fn test_documented_coauthorship_scenario() {
    // Authors column ["A;B;C", "A;B", "B;C;D"], min_frequency = 1
    let records = author_records(&["A;B;C", "A;B", "B;C;D"]);
    let graph = build_cooccurrence(&records, EntityField::Authors, 1);

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 5);
    assert_eq!(graph.weight("A", "B"), Some(2));
    assert_eq!(graph.weight("A", "C"), Some(1));
    assert_eq!(graph.weight("B", "C"), Some(2));
    assert_eq!(graph.weight("B", "D"), Some(1));
    assert_eq!(graph.weight("C", "D"), Some(1));

    // Symmetry and simplicity
    for (a, b, w) in graph.edges() {
        assert!(w >= 1);
        assert_ne!(a, b);
        assert_eq!(graph.weight(a, b), graph.weight(b, a));
    }
}

#[test]
fn test_pruned_author_graph_degree_contract() {
    let records = author_records(&["A;B;C", "A;B", "B;C;D", "A;E", "D;E;F", "C;F;G"]);
    for k in 1..=3 {
        let graph = build_cooccurrence(&records, EntityField::Authors, k);
        for label in graph.labels() {
            assert!(
                graph.degree(label).unwrap() as u32 >= k,
                "node {label} has degree < {k} after pruning"
            );
        }
    }
}

#[test]
fn test_keyword_graph_carries_frequency() {
    let mut records = Vec::new();
    for keywords in [
        vec!["bim", "machine learning"],
        vec!["bim", "safety"],
        vec!["bim", "machine learning"],
    ] {
        let mut r = Record::new(SourceDb::Harmonized);
        r.author_keywords = keywords.into_iter().map(str::to_string).collect();
        records.push(r);
    }

    let graph = build_cooccurrence(&records, EntityField::AuthorKeywords, 2);
    assert!(graph.contains("bim"));
    assert!(graph.contains("machine learning"));
    // "safety" appears once and is frequency-pruned
    assert!(!graph.contains("safety"));
    assert_eq!(graph.frequency("bim"), Some(3));
    assert_eq!(graph.weight("bim", "machine learning"), Some(2));

    // The ranked series is computed pre-prune and still includes "safety"
    let series = frequency_series(&records, EntityField::AuthorKeywords);
    assert_eq!(series[0], ("bim".to_string(), 3));
    assert!(series.iter().any(|(label, count)| label == "safety" && *count == 1));
}

#[test]
fn test_stats_and_communities_over_built_graph() {
    let records = author_records(&["A;B;C", "A;B;C", "D;E;F", "D;E;F", "C;D"]);
    let mut graph = build_cooccurrence(&records, EntityField::Authors, 1);

    let stats = GraphStats::from_graph(&graph);
    assert_eq!(stats.nodes, 6);
    assert_eq!(stats.components, 1);

    let partition = CommunityPartitioner::new().annotate(&mut graph);
    assert_eq!(partition.len(), 6);
    assert_eq!(partition["A"], partition["B"]);
    assert_eq!(partition["D"], partition["F"]);
    assert_ne!(partition["A"], partition["D"]);
    assert_eq!(graph.community("A"), Some(partition["A"]));
}

#[test]
fn test_empty_table_degrades_to_empty_graph() {
    let graph = build_cooccurrence(&[], EntityField::Authors, 2);
    assert_eq!(graph.node_count(), 0);
    let stats = GraphStats::from_graph(&graph);
    assert_eq!(stats.nodes, 0);
    assert_eq!(stats.components, 0);
    assert!(CommunityPartitioner::new().partition(&graph).is_empty());
}
