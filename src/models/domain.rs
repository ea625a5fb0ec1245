use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Geographic coordinate, longitude first
///
/// The order is kept exactly as supplied by callers. Values are not range
/// checked here; see the request types for validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(p: GeoPoint) -> Self {
        geo::Point::new(p.longitude, p.latitude)
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(p: geo::Point<f64>) -> Self {
        GeoPoint::new(p.x(), p.y())
    }
}

/// A household awaiting evacuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(rename = "memberCount", default)]
    pub member_count: u32,
    pub location: GeoPoint,
}

impl Family {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, member_count: u32, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            member_count,
            location,
        }
    }
}

/// Disaster report; only `location` feeds the ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterReport {
    pub location: GeoPoint,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl DisasterReport {
    pub fn at(location: GeoPoint) -> Self {
        Self {
            location,
            id: None,
            kind: None,
            description: None,
        }
    }
}

/// Outgoing dependency edge: the owning family waits for `neighbor_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "neighborId")]
    pub neighbor_id: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Ordered family ids, each exactly once
pub type PriorityOrder = Vec<String>;

/// Output of one priority computation
#[derive(Debug, Clone, Default)]
pub struct PriorityResult {
    pub order: PriorityOrder,
    /// Family id -> distance to the disaster, for display only
    pub distances: HashMap<String, f64>,
    /// Cyclic edges ignored during ordering
    pub skipped_edges: usize,
}

impl PriorityResult {
    /// Join the order with family payloads into presentation rows.
    ///
    /// When `families` holds duplicate ids the last occurrence supplies the
    /// payload. Ids in the order with no matching family are skipped.
    pub fn ranked(&self, families: &[Family]) -> Vec<RankedFamily> {
        let by_id: HashMap<&str, &Family> = families
            .iter()
            .map(|f| (f.id.as_str(), f))
            .collect();

        self.order
            .iter()
            .filter_map(|id| by_id.get(id.as_str()))
            .enumerate()
            .map(|(idx, family)| RankedFamily {
                rank: idx + 1,
                id: family.id.clone(),
                display_name: family.display_name.clone(),
                member_count: family.member_count,
                distance_km: self.distances.get(&family.id).copied().unwrap_or(f64::NAN),
            })
            .collect()
    }
}

/// One row of the ranked evacuation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFamily {
    pub rank: usize,
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "memberCount")]
    pub member_count: u32,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lon
            && point.longitude <= self.max_lon
    }
}
