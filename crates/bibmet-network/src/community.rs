//! Community partitioning over co-occurrence graphs
//!
//! Two modularity-based strategies behind one trait, selected at
//! construction time: [`Louvain`] (the preferred multi-level algorithm) and
//! [`GreedyModularity`] (agglomerative fallback). Both are deterministic:
//! nodes are swept in stable index order and ties break toward the smallest
//! community id, so no seeding is needed for reproducible results.

use std::collections::{BTreeMap, HashMap};

use petgraph::visit::EdgeRef;

use crate::graph::CooccurrenceGraph;

/// Strategy interface for assigning each node a cluster id.
pub trait CommunityDetector {
    /// Partition the graph; cluster ids are contiguous from 0, enumerated
    /// in order of each community's first member (by node insertion order).
    fn detect(&self, graph: &CooccurrenceGraph) -> BTreeMap<String, usize>;
}

/// Runs a community detector and optionally writes the result back onto the
/// graph's nodes. The mapping is the primary output; annotation is a
/// convenience for exports.
pub struct CommunityPartitioner {
    detector: Box<dyn CommunityDetector>,
}

impl Default for CommunityPartitioner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityPartitioner {
    /// Partitioner with the preferred strategy (Louvain).
    pub fn new() -> Self {
        Self::with_detector(Box::new(Louvain::default()))
    }

    /// Partitioner with the greedy-modularity fallback strategy.
    pub fn greedy() -> Self {
        Self::with_detector(Box::new(GreedyModularity))
    }

    pub fn with_detector(detector: Box<dyn CommunityDetector>) -> Self {
        Self { detector }
    }

    pub fn partition(&self, graph: &CooccurrenceGraph) -> BTreeMap<String, usize> {
        self.detector.detect(graph)
    }

    /// Partition and annotate each node with its cluster id.
    pub fn annotate(&self, graph: &mut CooccurrenceGraph) -> BTreeMap<String, usize> {
        let partition = self.partition(graph);
        for (label, id) in &partition {
            graph.set_community(label, *id);
        }
        partition
    }
}

/// Multi-level modularity optimization.
#[derive(Clone, Debug)]
pub struct Louvain {
    /// Modularity resolution; 1.0 is the classic objective.
    pub resolution: f64,
    /// Upper bound on coarsening levels.
    pub max_levels: usize,
}

impl Default for Louvain {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_levels: 10,
        }
    }
}

impl CommunityDetector for Louvain {
    fn detect(&self, graph: &CooccurrenceGraph) -> BTreeMap<String, usize> {
        let labels: Vec<String> = graph.labels().map(str::to_string).collect();
        let n = labels.len();
        if n == 0 {
            return BTreeMap::new();
        }

        let mut work = WorkGraph::from_graph(graph);
        // Original node -> current working node
        let mut assignment: Vec<usize> = (0..n).collect();

        for _ in 0..self.max_levels {
            let (comm, improved) = local_move(&work, self.resolution);
            if !improved {
                break;
            }
            let (aggregated, mapping) = work.aggregate(&comm);
            for slot in assignment.iter_mut() {
                *slot = mapping[*slot];
            }
            let stalled = aggregated.len() == work.len();
            work = aggregated;
            if stalled {
                break;
            }
        }

        renumbered(&labels, &assignment)
    }
}

/// Agglomerative modularity maximization: repeatedly merge the connected
/// community pair with the best modularity gain until no merge improves it.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyModularity;

impl CommunityDetector for GreedyModularity {
    fn detect(&self, graph: &CooccurrenceGraph) -> BTreeMap<String, usize> {
        let labels: Vec<String> = graph.labels().map(str::to_string).collect();
        let n = labels.len();
        if n == 0 {
            return BTreeMap::new();
        }

        let work = WorkGraph::from_graph(graph);
        let m = work.total_weight;
        let mut assignment: Vec<usize> = (0..n).collect();
        if m == 0.0 {
            return renumbered(&labels, &assignment);
        }

        let mut strength: Vec<f64> = (0..n).map(|i| work.strength(i)).collect();
        // Inter-community weights, keyed (smaller id, larger id) for
        // deterministic iteration
        let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for i in 0..n {
            for &(j, w) in &work.adj[i] {
                if i < j {
                    *between.entry((i, j)).or_insert(0.0) += w;
                }
            }
        }

        loop {
            let mut best: Option<((usize, usize), f64)> = None;
            for (&pair, &weight) in &between {
                let (a, b) = pair;
                let gain = weight / m - strength[a] * strength[b] / (2.0 * m * m);
                let better = match best {
                    None => gain > 0.0,
                    Some((_, best_gain)) => gain > best_gain + 1e-12,
                };
                if better {
                    best = Some((pair, gain));
                }
            }
            let Some(((a, b), _)) = best else {
                break;
            };

            // Merge b into a
            strength[a] += strength[b];
            for slot in assignment.iter_mut() {
                if *slot == b {
                    *slot = a;
                }
            }
            let edges: Vec<((usize, usize), f64)> = between
                .range((b, 0)..(b + 1, 0))
                .map(|(&k, &v)| (k, v))
                .chain(
                    between
                        .iter()
                        .filter(|(&(_, hi), _)| hi == b)
                        .map(|(&k, &v)| (k, v)),
                )
                .collect();
            for ((lo, hi), weight) in edges {
                between.remove(&(lo, hi));
                let other = if lo == b { hi } else { lo };
                if other == a {
                    continue;
                }
                let key = (other.min(a), other.max(a));
                *between.entry(key).or_insert(0.0) += weight;
            }
        }

        renumbered(&labels, &assignment)
    }
}

/// Weighted modularity of a partition.
///
/// Q = sum over communities of [ w_in/m - (s_c / 2m)^2 ], where w_in is the
/// intra-community edge weight, s_c the summed node strengths, and m the
/// total edge weight. Empty or edgeless graphs score 0.
pub fn modularity(graph: &CooccurrenceGraph, partition: &BTreeMap<String, usize>) -> f64 {
    let m: f64 = graph.edges().map(|(_, _, w)| w as f64).sum();
    if m == 0.0 {
        return 0.0;
    }

    let mut intra: HashMap<usize, f64> = HashMap::new();
    let mut strength: HashMap<usize, f64> = HashMap::new();
    for (a, b, w) in graph.edges() {
        let (ca, cb) = match (partition.get(a), partition.get(b)) {
            (Some(&ca), Some(&cb)) => (ca, cb),
            _ => continue,
        };
        *strength.entry(ca).or_insert(0.0) += w as f64;
        *strength.entry(cb).or_insert(0.0) += w as f64;
        if ca == cb {
            *intra.entry(ca).or_insert(0.0) += w as f64;
        }
    }

    strength
        .iter()
        .map(|(community, s)| {
            let w_in = intra.get(community).copied().unwrap_or(0.0);
            w_in / m - (s / (2.0 * m)).powi(2)
        })
        .sum()
}

/// Flat weighted adjacency used by both detectors.
///
/// Node ids are the graph's compact indices; each undirected edge is stored
/// in both directions. Self-loop weights only appear on aggregated levels.
struct WorkGraph {
    adj: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
    total_weight: f64,
}

impl WorkGraph {
    fn from_graph(graph: &CooccurrenceGraph) -> Self {
        let n = graph.node_count();
        let mut adj = vec![Vec::new(); n];
        let mut total = 0.0;
        for edge in graph.inner().edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            let w = *edge.weight() as f64;
            adj[a].push((b, w));
            adj[b].push((a, w));
            total += w;
        }
        Self {
            adj,
            self_loops: vec![0.0; n],
            total_weight: total,
        }
    }

    fn len(&self) -> usize {
        self.adj.len()
    }

    /// Weighted degree including twice the self-loop weight.
    fn strength(&self, node: usize) -> f64 {
        let link: f64 = self.adj[node].iter().map(|&(_, w)| w).sum();
        link + 2.0 * self.self_loops[node]
    }

    /// Collapse communities into nodes. Returns the aggregated graph and
    /// the node -> aggregated-node mapping, with aggregated ids numbered in
    /// order of first appearance.
    fn aggregate(&self, comm: &[usize]) -> (WorkGraph, Vec<usize>) {
        let mut renumber: HashMap<usize, usize> = HashMap::new();
        let mut mapping = Vec::with_capacity(comm.len());
        for &c in comm {
            let next = renumber.len();
            mapping.push(*renumber.entry(c).or_insert(next));
        }

        let nc = renumber.len();
        let mut weights: Vec<HashMap<usize, f64>> = vec![HashMap::new(); nc];
        let mut self_loops = vec![0.0; nc];
        for i in 0..self.len() {
            let ci = mapping[i];
            self_loops[ci] += self.self_loops[i];
            for &(j, w) in &self.adj[i] {
                if j <= i {
                    continue;
                }
                let cj = mapping[j];
                if ci == cj {
                    self_loops[ci] += w;
                } else {
                    *weights[ci].entry(cj).or_insert(0.0) += w;
                    *weights[cj].entry(ci).or_insert(0.0) += w;
                }
            }
        }

        let adj = weights
            .into_iter()
            .map(|neighbors| {
                let mut list: Vec<(usize, f64)> = neighbors.into_iter().collect();
                list.sort_unstable_by_key(|&(j, _)| j);
                list
            })
            .collect();

        (
            WorkGraph {
                adj,
                self_loops,
                total_weight: self.total_weight,
            },
            mapping,
        )
    }
}

/// One Louvain level: sweep nodes in index order, moving each to the
/// neighboring community with the best modularity gain, until a full sweep
/// makes no move.
fn local_move(work: &WorkGraph, resolution: f64) -> (Vec<usize>, bool) {
    let n = work.len();
    let mut comm: Vec<usize> = (0..n).collect();
    let strength: Vec<f64> = (0..n).map(|i| work.strength(i)).collect();
    let mut community_strength = strength.clone();
    let two_m = 2.0 * work.total_weight;
    if two_m == 0.0 {
        return (comm, false);
    }

    let mut improved = false;
    loop {
        let mut moved = false;
        for node in 0..n {
            let current = comm[node];

            let mut links: BTreeMap<usize, f64> = BTreeMap::new();
            for &(nbr, w) in &work.adj[node] {
                if nbr != node {
                    *links.entry(comm[nbr]).or_insert(0.0) += w;
                }
            }

            community_strength[current] -= strength[node];
            let mut best_comm = current;
            let mut best_gain = links.get(&current).copied().unwrap_or(0.0)
                - resolution * community_strength[current] * strength[node] / two_m;

            for (&candidate, &link) in &links {
                if candidate == current {
                    continue;
                }
                let gain =
                    link - resolution * community_strength[candidate] * strength[node] / two_m;
                if gain > best_gain + 1e-12 {
                    best_gain = gain;
                    best_comm = candidate;
                }
            }

            community_strength[best_comm] += strength[node];
            if best_comm != current {
                comm[node] = best_comm;
                moved = true;
                improved = true;
            }
        }
        if !moved {
            break;
        }
    }
    (comm, improved)
}

/// Label map with cluster ids renumbered contiguously in order of first
/// appearance over node insertion order.
fn renumbered(labels: &[String], assignment: &[usize]) -> BTreeMap<String, usize> {
    let mut renumber: HashMap<usize, usize> = HashMap::new();
    let mut result = BTreeMap::new();
    for (node, &community) in assignment.iter().enumerate() {
        let next = renumber.len();
        let id = *renumber.entry(community).or_insert(next);
        result.insert(labels[node].clone(), id);
    }
    result
}
