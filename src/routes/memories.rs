use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    AlbumNearbyQuery, Coordinate, DistanceRequest, DistanceResponse, ErrorResponse, HealthResponse,
    NearbyMemoriesRequest, NearbyMemoriesResponse, NearbyQuery, ResultOrder,
};
use crate::services::DocumentStoreClient;
use crate::core::{distance_km, MemoryLocator};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStoreClient>,
    pub locator: MemoryLocator,
    pub max_radius_km: f64,
}

/// Configure all memory-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/memories/nearby", web::post().to(nearby_memories))
        .route("/albums/{album_id}/memories/nearby", web::get().to(album_nearby_memories))
        .route("/geo/distance", web::post().to(distance));
}

fn error_response(status: StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find memories near a point
///
/// POST /api/v1/memories/nearby
///
/// Request body:
/// ```json
/// {
///   "latitude": 40.7128,
///   "longitude": -74.0060,
///   "radiusKm": 25,
///   "albumId": "string",
///   "limit": 50,
///   "orderBy": "encounter|distance"
/// }
/// ```
async fn nearby_memories(
    state: web::Data<AppState>,
    req: web::Json<NearbyMemoriesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    let center = match req.center() {
        Ok(center) => center,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_coordinate", e.to_string()),
    };

    search(
        &state,
        center,
        req.radius_km,
        req.album_id.as_deref(),
        req.limit,
        req.order_by,
    )
    .await
}

/// Find memories of one album near a point
///
/// GET /api/v1/albums/{albumId}/memories/nearby?latitude=..&longitude=..&radiusKm=..
async fn album_nearby_memories(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<AlbumNearbyQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    let center = match Coordinate::new(query.latitude, query.longitude) {
        Ok(center) => center,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_coordinate", e.to_string()),
    };

    let album_id = path.into_inner();
    search(&state, center, query.radius_km, Some(album_id.as_str()), query.limit, query.order_by).await
}

async fn search(
    state: &AppState,
    center: Coordinate,
    radius_km: f64,
    album_id: Option<&str>,
    limit: Option<u16>,
    order: ResultOrder,
) -> HttpResponse {
    // NaN and negative radii pass through untouched and match nothing;
    // f64::min would turn NaN into the cap
    let radius_km = if radius_km > state.max_radius_km {
        state.max_radius_km
    } else {
        radius_km
    };

    tracing::info!(
        "Searching memories within {} km of ({}, {}), album: {:?}",
        radius_km,
        center.latitude(),
        center.longitude(),
        album_id
    );

    let memories = match state.store.list_memories(album_id).await {
        Ok(memories) => memories,
        Err(e) => {
            tracing::error!("Failed to list memories: {}", e);
            return error_response(StatusCode::BAD_GATEWAY, "store_unavailable", e.to_string());
        }
    };

    let query = NearbyQuery {
        center,
        radius_km,
        limit: limit.map(usize::from),
        order,
    };
    let result = state.locator.find_nearby(&query, memories);

    tracing::info!(
        "Returning {} memories (from {} candidates)",
        result.memories.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(NearbyMemoriesResponse {
        memories: result.memories,
        total_candidates: result.total_candidates,
        radius_km,
    })
}

/// Great-circle distance between two points
///
/// POST /api/v1/geo/distance
///
/// Request body:
/// ```json
/// {
///   "from": {"latitude": 0.0, "longitude": 0.0},
///   "to": {"latitude": 0.0, "longitude": 90.0}
/// }
/// ```
async fn distance(req: web::Json<DistanceRequest>) -> impl Responder {
    HttpResponse::Ok().json(DistanceResponse {
        distance_km: distance_km(req.from, req.to),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_distance_endpoint() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/geo/distance")
            .set_json(serde_json::json!({
                "from": {"latitude": 0.0, "longitude": 0.0},
                "to": {"latitude": 0.0, "longitude": 90.0}
            }))
            .to_request();
        let resp: DistanceResponse = test::call_and_read_body_json(&app, req).await;

        assert!((resp.distance_km - 10007.5).abs() < 1.0);
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.status, "healthy");
    }
}
