use serde::{Deserialize, Serialize};
use crate::models::domain::NearbyMemory;

/// Response for the nearby memories endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyMemoriesResponse {
    pub memories: Vec<NearbyMemory>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
}

/// Response for the distance endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
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
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
