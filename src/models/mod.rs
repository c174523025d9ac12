// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinate, GeoError, GeoTagged, Location, Memory, NearbyMemory, BoundingBox, NearbyQuery, ResultOrder};
pub use requests::{NearbyMemoriesRequest, AlbumNearbyQuery, DistanceRequest};
pub use responses::{NearbyMemoriesResponse, DistanceResponse, HealthResponse, ErrorResponse};
