use std::collections::HashMap;

use crate::core::{
    distance::distance_km,
    graph::{build_graph_with_threshold, dedupe_families, PROXIMITY_THRESHOLD_KM},
    ordering::topological_order_with_stats,
};
use crate::models::{DisasterReport, Family, PriorityResult};

/// Evacuation priority orchestrator
///
/// # Pipeline Stages
/// 1. Rank families by distance to the disaster
/// 2. Link families within the proximity threshold, farther -> nearer
/// 3. Cycle-tolerant topological ordering
///
/// Holds only configuration; every call builds and discards its own graph.
#[derive(Debug, Clone, Copy)]
pub struct PriorityEngine {
    proximity_threshold_km: f64,
}

impl PriorityEngine {
    pub fn new(proximity_threshold_km: f64) -> Self {
        Self { proximity_threshold_km }
    }

    pub fn proximity_threshold_km(&self) -> f64 {
        self.proximity_threshold_km
    }

    /// Compute the evacuation order and per-family distance to the disaster
    ///
    /// The distance map is computed directly from the family locations and is
    /// independent of the ordering. Duplicate ids collapse with the last
    /// occurrence winning.
    pub fn compute_priority(&self, families: &[Family], disaster: &DisasterReport) -> PriorityResult {
        let graph = build_graph_with_threshold(families, disaster, self.proximity_threshold_km);
        let outcome = topological_order_with_stats(&graph);

        let distances: HashMap<String, f64> = dedupe_families(families)
            .into_iter()
            .map(|f| {
                let km = distance_km(f.location, disaster.location);
                (f.id, km)
            })
            .collect();

        tracing::debug!(
            "Computed priority for {} families ({} edges, {} cyclic edges skipped)",
            outcome.order.len(),
            graph.edge_count(),
            outcome.skipped_edges
        );

        PriorityResult {
            order: outcome.order,
            distances,
            skipped_edges: outcome.skipped_edges,
        }
    }
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::new(PROXIMITY_THRESHOLD_KM)
    }
}

/// Compute the priority with the default 2 km proximity threshold
pub fn compute_priority(families: &[Family], disaster: &DisasterReport) -> PriorityResult {
    PriorityEngine::default().compute_priority(families, disaster)
}
