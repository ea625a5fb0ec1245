//! Proximity dependency graph between families.
//!
//! An edge `B -> A` stored under `B` means "B waits for A": both families
//! are within the proximity threshold of each other and A is nearer to the
//! disaster. Evacuating A first keeps the access path to B clear.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::{debug, trace};

use crate::core::distance::distance_km;
use crate::models::{DisasterReport, Edge, Family};

/// Families closer than this to each other are graph-adjacent
pub const PROXIMITY_THRESHOLD_KM: f64 = 2.0;

/// Family id -> ordered outgoing edges
///
/// Nodes are family ids, edge weights are the pairwise distance in km.
/// Nodes are never removed, so `NodeIndex` order is first-insertion order and
/// traversal over a given graph is reproducible across runs.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, f64>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with no edges. Existing nodes keep their position and edges.
    pub fn add_node(&mut self, id: impl Into<String>) -> NodeIndex {
        let id = id.into();
        if let Some(&idx) = self.node_map.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_map.insert(id, idx);
        idx
    }

    /// Append an edge `from -> to`, inserting either endpoint if missing.
    pub fn add_edge(&mut self, from: &str, to: &str, distance_km: f64) {
        let from_idx = self.add_node(from);
        let to_idx = self.add_node(to);
        self.graph.add_edge(from_idx, to_idx, distance_km);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Outgoing edges of `id` in insertion order, `None` if the node does not exist
    pub fn edges(&self, id: &str) -> Option<Vec<Edge>> {
        let idx = *self.node_map.get(id)?;
        let mut edges: Vec<Edge> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| Edge {
                neighbor_id: self.graph[e.target()].clone(),
                distance_km: *e.weight(),
            })
            .collect();
        // petgraph walks adjacency newest-first
        edges.reverse();
        Some(edges)
    }

    /// Node ids in enumeration order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(move |idx| self.graph[idx].as_str())
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn inner(&self) -> &DiGraph<String, f64> {
        &self.graph
    }
}

/// Collapse duplicate ids.
///
/// Each id keeps the position of its first occurrence and the payload of its
/// last occurrence (last write wins).
pub fn dedupe_families(families: &[Family]) -> Vec<Family> {
    let mut position: HashMap<&str, usize> = HashMap::with_capacity(families.len());
    let mut unique: Vec<Family> = Vec::with_capacity(families.len());

    for family in families {
        match position.get(family.id.as_str()) {
            Some(&idx) => unique[idx] = family.clone(),
            None => {
                position.insert(family.id.as_str(), unique.len());
                unique.push(family.clone());
            }
        }
    }

    unique
}

/// Concatenate family lists from several radius queries (e.g. 5/10/50 km)
/// into one list without duplicate ids.
pub fn merge_radius_bands(bands: Vec<Vec<Family>>) -> Vec<Family> {
    let all: Vec<Family> = bands.into_iter().flatten().collect();
    dedupe_families(&all)
}

/// Build the dependency graph with the default 2 km threshold
pub fn build_graph(families: &[Family], disaster: &DisasterReport) -> DependencyGraph {
    build_graph_with_threshold(families, disaster, PROXIMITY_THRESHOLD_KM)
}

/// Build the dependency graph with a custom proximity threshold
///
/// For each pair `i < j` (node order) within `threshold_km` of each other the
/// farther family gets an edge to the nearer one. When both are exactly as
/// far from the disaster, the later family points at the earlier one.
pub fn build_graph_with_threshold(
    families: &[Family],
    disaster: &DisasterReport,
    threshold_km: f64,
) -> DependencyGraph {
    let families = dedupe_families(families);
    let mut graph = DependencyGraph::new();

    // Step 1: ranking key
    let to_disaster: Vec<f64> = families
        .iter()
        .map(|f| {
            graph.add_node(f.id.as_str());
            distance_km(f.location, disaster.location)
        })
        .collect();

    // Step 2: pairwise proximity
    for i in 0..families.len() {
        for j in (i + 1)..families.len() {
            let (f1, f2) = (&families[i], &families[j]);
            let mutual = distance_km(f1.location, f2.location);
            if mutual.is_nan() || mutual > threshold_km {
                continue;
            }

            let (from, to) = if to_disaster[i] > to_disaster[j] {
                (f1, f2)
            } else {
                (f2, f1)
            };
            trace!("edge {} -> {} ({:.3} km)", from.id, to.id, mutual);
            graph.add_edge(&from.id, &to.id, mutual);
        }
    }

    debug!(
        "Built dependency graph: {} nodes, {} edges (threshold {} km)",
        graph.len(),
        graph.edge_count(),
        threshold_km
    );

    graph
}
