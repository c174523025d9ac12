//! Lono Geo - proximity search for shared memories
//!
//! Provides haversine distance and radius filtering over geo-tagged items,
//! plus the HTTP service that finds memories near a point.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance_km, filter_within_radius, MemoryLocator, NearbyResult};
pub use crate::models::{Coordinate, GeoError, GeoTagged, Memory, NearbyMemory, NearbyQuery};
