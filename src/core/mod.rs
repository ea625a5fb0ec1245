// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod graph;
pub mod ordering;

pub use distance::{bounding_box, distance_km, families_within, within_radius, EARTH_RADIUS_KM};
pub use engine::{compute_priority, PriorityEngine};
pub use graph::{build_graph, build_graph_with_threshold, dedupe_families, merge_radius_bands, DependencyGraph, PROXIMITY_THRESHOLD_KM};
pub use ordering::{topological_order, topological_order_with_stats, OrderOutcome};
