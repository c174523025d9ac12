use crate::models::{GeoTagged, Memory, NearbyMemory, NearbyQuery, ResultOrder};
use crate::core::{
    distance::{calculate_bounding_box, distance_km},
    filters::filter_within_radius,
};

/// Result of a proximity search
#[derive(Debug)]
pub struct NearbyResult {
    pub memories: Vec<NearbyMemory>,
    pub total_candidates: usize,
}

/// Finds memories near a point
///
/// # Pipeline Stages
/// 1. Bounding box pre-filter (optional)
/// 2. Haversine radius filter
/// 3. Distance ordering (optional) and limit
#[derive(Debug, Clone, Copy)]
pub struct MemoryLocator {
    prefilter: bool,
}

impl MemoryLocator {
    pub fn new(prefilter: bool) -> Self {
        Self { prefilter }
    }

    /// Keep the memories within the query radius
    ///
    /// Survivors keep the order the store returned them in unless the query
    /// asks for distance ordering.
    pub fn find_nearby(&self, query: &NearbyQuery, memories: Vec<Memory>) -> NearbyResult {
        let total_candidates = memories.len();

        if query.radius_km.is_nan() || query.radius_km < 0.0 {
            tracing::debug!("Radius {} matches nothing", query.radius_km);
            return NearbyResult {
                memories: Vec::new(),
                total_candidates,
            };
        }

        let bbox = calculate_bounding_box(query.center, query.radius_km);
        let prefilter = self.prefilter;

        let candidates = memories.into_iter().filter(|memory| {
            // Stage 1: cheap rejection; untagged memories fall through to stage 2
            !prefilter || memory.coordinate().map_or(true, |point| bbox.contains(point))
        });

        // Stage 2: exact radius test
        let mut nearby: Vec<NearbyMemory> = filter_within_radius(query.center, query.radius_km, candidates)
            .filter_map(|memory| {
                let point = memory.coordinate()?;
                Some(NearbyMemory {
                    distance_km: distance_km(query.center, point),
                    memory,
                })
            })
            .collect();

        // Stage 3: ordering and limit
        if query.order == ResultOrder::Distance {
            // stable, so equal distances keep store order
            nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        }

        if let Some(limit) = query.limit {
            nearby.truncate(limit);
        }

        tracing::debug!(
            "{} of {} memories within {} km of ({}, {})",
            nearby.len(),
            total_candidates,
            query.radius_km,
            query.center.latitude(),
            query.center.longitude()
        );

        NearbyResult {
            memories: nearby,
            total_candidates,
        }
    }
}

impl Default for MemoryLocator {
    fn default() -> Self {
        Self::new(true)
    }
}
