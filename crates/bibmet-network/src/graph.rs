//! Co-occurrence graph construction and pruning

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use bibmet_domain::Record;

/// Which multi-valued column the graph is built from.
///
/// The choice also selects the pruning policy: author graphs prune by
/// degree (a prolific single-collaboration author is less interesting than
/// a connected one), keyword graphs prune by frequency (a single
/// high-frequency keyword matters even with few co-occurrences).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityField {
    Authors,
    AuthorKeywords,
    IndexKeywords,
}

impl EntityField {
    pub(crate) fn values<'a>(&self, record: &'a Record) -> &'a [String] {
        match self {
            EntityField::Authors => &record.authors,
            EntityField::AuthorKeywords => &record.author_keywords,
            EntityField::IndexKeywords => &record.index_keywords,
        }
    }

    fn prunes_by_frequency(&self) -> bool {
        !matches!(self, EntityField::Authors)
    }
}

/// Node payload of a co-occurrence graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EntityNode {
    pub label: String,
    /// Number of records the entity appeared in, counted before pruning.
    pub frequency: u32,
    /// Cluster id assigned by a community detector, if one ran.
    pub community: Option<usize>,
}

/// Undirected weighted entity co-occurrence graph.
///
/// Simple by construction: no self-loops, at most one edge per pair, every
/// edge weight >= 1. Immutable once built and pruned, except for the
/// `community` node attribute.
pub struct CooccurrenceGraph {
    graph: UnGraph<EntityNode, u32>,
    indices: HashMap<String, NodeIndex>,
    field: EntityField,
}

impl CooccurrenceGraph {
    pub fn field(&self) -> EntityField {
        self.field
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.indices.contains_key(label)
    }

    /// Edge weight between two entities, in either order.
    pub fn weight(&self, a: &str, b: &str) -> Option<u32> {
        let (ia, ib) = (*self.indices.get(a)?, *self.indices.get(b)?);
        let edge = self.graph.find_edge(ia, ib)?;
        Some(self.graph[edge])
    }

    /// Distinct-neighbor count in the pruned graph.
    pub fn degree(&self, label: &str) -> Option<usize> {
        let ix = *self.indices.get(label)?;
        Some(self.graph.neighbors(ix).count())
    }

    /// Pre-prune record-appearance count.
    pub fn frequency(&self, label: &str) -> Option<u32> {
        let ix = *self.indices.get(label)?;
        Some(self.graph[ix].frequency)
    }

    pub fn community(&self, label: &str) -> Option<usize> {
        let ix = *self.indices.get(label)?;
        self.graph[ix].community
    }

    pub(crate) fn set_community(&mut self, label: &str, id: usize) {
        if let Some(&ix) = self.indices.get(label) {
            self.graph[ix].community = Some(id);
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|ix| self.graph[ix].label.as_str())
    }

    pub fn nodes(&self) -> impl Iterator<Item = &EntityNode> {
        self.graph.node_indices().map(|ix| &self.graph[ix])
    }

    /// All edges as (label, label, weight).
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].label.as_str(),
                self.graph[edge.target()].label.as_str(),
                *edge.weight(),
            )
        })
    }

    pub(crate) fn inner(&self) -> &UnGraph<EntityNode, u32> {
        &self.graph
    }
}

/// Build the co-occurrence graph of a multi-valued column.
///
/// For each record, entities are deduplicated within that record and every
/// unordered pair increments an edge weight by 1; a record with one entity
/// contributes no edges. After counting, the graph is pruned at
/// `min_frequency` under the field's policy: author nodes are removed until
/// every survivor has degree >= `min_frequency` in the pruned graph,
/// keyword nodes below the frequency threshold are removed in one pass.
/// Edges touching a removed node are removed with it.
pub fn build_cooccurrence(
    records: &[Record],
    field: EntityField,
    min_frequency: u32,
) -> CooccurrenceGraph {
    let mut graph: UnGraph<EntityNode, u32> = UnGraph::new_undirected();
    let mut indices: HashMap<String, NodeIndex> = HashMap::new();

    for record in records {
        let mut entities: Vec<&str> = Vec::new();
        for value in field.values(record) {
            if !entities.contains(&value.as_str()) {
                entities.push(value);
            }
        }

        let ids: Vec<NodeIndex> = entities
            .iter()
            .map(|label| {
                *indices.entry((*label).to_string()).or_insert_with(|| {
                    graph.add_node(EntityNode {
                        label: (*label).to_string(),
                        frequency: 0,
                        community: None,
                    })
                })
            })
            .collect();

        for &ix in &ids {
            graph[ix].frequency += 1;
        }

        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                match graph.find_edge(ids[i], ids[j]) {
                    Some(edge) => graph[edge] += 1,
                    None => {
                        graph.add_edge(ids[i], ids[j], 1);
                    }
                }
            }
        }
    }

    if field.prunes_by_frequency() {
        graph.retain_nodes(|g, ix| g[ix].frequency >= min_frequency);
    } else {
        // Removing a node lowers its neighbors' degrees, so iterate until
        // every survivor clears the threshold.
        loop {
            let doomed: Vec<NodeIndex> = graph
                .node_indices()
                .filter(|&ix| (graph.neighbors(ix).count() as u32) < min_frequency)
                .collect();
            if doomed.is_empty() {
                break;
            }
            for ix in doomed.into_iter().rev() {
                graph.remove_node(ix);
            }
        }
    }

    let indices = graph
        .node_indices()
        .map(|ix| (graph[ix].label.clone(), ix))
        .collect();

    CooccurrenceGraph {
        graph,
        indices,
        field,
    }
}

/// Ranked entity frequency over the full (unpruned) record set: how many
/// records each entity appears in, sorted by count descending with ties
/// broken by label.
pub fn frequency_series(records: &[Record], field: EntityField) -> Vec<(String, u32)> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for record in records {
        let mut seen: Vec<&str> = Vec::new();
        for value in field.values(record) {
            if !seen.contains(&value.as_str()) {
                seen.push(value);
                *counts.entry(value).or_insert(0) += 1;
            }
        }
    }
    let mut series: Vec<(String, u32)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    series.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    series
}
