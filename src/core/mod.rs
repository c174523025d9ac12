// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod locator;

pub use distance::{haversine_distance, distance_km, calculate_bounding_box, is_within_bounding_box, EARTH_RADIUS_KM};
pub use filters::{filter_within_radius, is_within_radius};
pub use locator::{MemoryLocator, NearbyResult};
