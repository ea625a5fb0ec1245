use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{DisasterReport, Family, GeoPoint};

/// Coordinate as received over the wire, range checked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct GeoPointInput {
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
}

impl From<GeoPointInput> for GeoPoint {
    fn from(p: GeoPointInput) -> Self {
        GeoPoint::new(p.longitude, p.latitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DisasterInput {
    #[validate(nested)]
    pub location: GeoPointInput,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<DisasterInput> for DisasterReport {
    fn from(d: DisasterInput) -> Self {
        DisasterReport {
            location: d.location.into(),
            id: d.id,
            kind: d.kind,
            description: d.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FamilyInput {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(alias = "display_name", rename = "displayName", default)]
    pub display_name: String,
    #[serde(alias = "member_count", rename = "memberCount", default)]
    pub member_count: u32,
    #[validate(nested)]
    pub location: GeoPointInput,
}

impl From<FamilyInput> for Family {
    fn from(f: FamilyInput) -> Self {
        Family {
            id: f.id,
            display_name: f.display_name,
            member_count: f.member_count,
            location: f.location.into(),
        }
    }
}

/// Request to compute an evacuation priority ordering
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ComputePriorityRequest {
    #[validate(nested)]
    pub disaster: DisasterInput,
    #[serde(default)]
    #[validate(nested)]
    pub families: Vec<FamilyInput>,
    #[serde(alias = "max_radius_km", rename = "maxRadiusKm", default)]
    #[validate(range(exclusive_min = 0.0))]
    pub max_radius_km: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(lon: f64, lat: f64) -> ComputePriorityRequest {
        ComputePriorityRequest {
            disaster: DisasterInput {
                location: GeoPointInput { longitude: 0.0, latitude: 0.0 },
                id: None,
                kind: None,
                description: None,
            },
            families: vec![FamilyInput {
                id: "f1".to_string(),
                display_name: "F1".to_string(),
                member_count: 2,
                location: GeoPointInput { longitude: lon, latitude: lat },
            }],
            max_radius_km: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request(12.0, 41.0).validate().is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert!(request(12.0, 95.0).validate().is_err());
    }

    #[test]
    fn test_empty_family_id_rejected() {
        let mut req = request(12.0, 41.0);
        req.families[0].id.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let mut req = request(12.0, 41.0);
        req.max_radius_km = Some(0.0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_conversion_keeps_axis_order() {
        let family: Family = request(12.0, 41.0).families.remove(0).into();
        assert_eq!(family.location.longitude, 12.0);
        assert_eq!(family.location.latitude, 41.0);
    }
}
