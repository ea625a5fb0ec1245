use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::core::{families_within, PriorityEngine};
use crate::models::{ComputePriorityRequest, DisasterReport, Family, HealthResponse, PriorityResponse};
use crate::routes::error::ApiError;

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: PriorityEngine,
    pub max_families: usize,
}

/// Configure all priority-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/priority/compute", web::post().to(compute_priority));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Compute evacuation priority endpoint
///
/// POST /api/v1/priority/compute
///
/// Request body:
/// ```json
/// {
///   "disaster": { "location": { "longitude": 0.0, "latitude": 0.0 } },
///   "families": [
///     { "id": "f1", "displayName": "Rossi", "memberCount": 4,
///       "location": { "longitude": 0.0, "latitude": 0.01 } }
///   ],
///   "maxRadiusKm": 50.0
/// }
/// ```
async fn compute_priority(
    state: web::Data<AppState>,
    req: web::Json<ComputePriorityRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for compute_priority request: {:?}", errors);
        return Err(ApiError::Validation(errors));
    }

    if req.families.len() > state.max_families {
        return Err(ApiError::TooManyFamilies {
            count: req.families.len(),
            limit: state.max_families,
        });
    }

    let disaster: DisasterReport = req.disaster.into();
    let mut families: Vec<Family> = req.families.into_iter().map(Family::from).collect();

    if let Some(radius_km) = req.max_radius_km {
        let before = families.len();
        families = families_within(families, disaster.location, radius_km);
        tracing::debug!("Radius filter {} km kept {} of {} families", radius_km, families.len(), before);
    }

    tracing::info!(
        "Computing priority for {} families (disaster {:?})",
        families.len(),
        disaster.id
    );

    // CPU-bound O(n²) work stays off the async workers
    let engine = state.engine;
    let (result, families) = tokio::task::spawn_blocking(move || {
        let result = engine.compute_priority(&families, &disaster);
        (result, families)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    let response = PriorityResponse {
        request_id: uuid::Uuid::new_v4().to_string(),
        computed_at: chrono::Utc::now(),
        families: result.ranked(&families),
        skipped_cyclic_edges: result.skipped_edges,
        order: result.order,
    };

    tracing::info!(
        "Returning priority order of {} families (request {})",
        response.order.len(),
        response.request_id
    );

    Ok(HttpResponse::Ok().json(response))
}
