use serde::{Deserialize, Serialize};
use crate::models::domain::RankedFamily;

/// Response for the compute priority endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "computedAt")]
    pub computed_at: chrono::DateTime<chrono::Utc>,
    pub order: Vec<String>,
    pub families: Vec<RankedFamily>,
    #[serde(rename = "skippedCyclicEdges")]
    pub skipped_cyclic_edges: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
