use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Coordinate, GeoError, ResultOrder};

/// Request to find memories near a point
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyMemoriesRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: f64,
    #[validate(length(min = 1))]
    #[serde(alias = "album_id", rename = "albumId", default)]
    pub album_id: Option<String>,
    #[validate(range(min = 1, max = 500))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(alias = "order_by", rename = "orderBy", default)]
    pub order_by: ResultOrder,
}

impl NearbyMemoriesRequest {
    pub fn center(&self) -> Result<Coordinate, GeoError> {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Query string for the album-scoped nearby search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AlbumNearbyQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: f64,
    #[validate(range(min = 1, max = 500))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(alias = "order_by", rename = "orderBy", default)]
    pub order_by: ResultOrder,
}

/// Request to measure the distance between two points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceRequest {
    pub from: Coordinate,
    pub to: Coordinate,
}
