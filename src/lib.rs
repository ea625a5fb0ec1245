//! Evac Priority - evacuation ordering engine for disaster response
//!
//! Given a disaster location and the families around it, this library builds
//! a proximity dependency graph between families and orders it so that
//! families nearer the disaster, which sit on the access path to others, are
//! evacuated first.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use self::core::{build_graph, compute_priority, distance_km, topological_order, DependencyGraph, PriorityEngine};
pub use models::{DisasterReport, Family, GeoPoint, PriorityOrder, PriorityResult, RankedFamily};
