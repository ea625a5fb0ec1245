// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, DisasterReport, Edge, Family, GeoPoint, PriorityOrder, PriorityResult, RankedFamily};
pub use requests::{ComputePriorityRequest, DisasterInput, FamilyInput, GeoPointInput};
pub use responses::{ErrorResponse, HealthResponse, PriorityResponse};
