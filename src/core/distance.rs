use crate::models::{BoundingBox, Coordinate};

/// Earth's mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Slack added to bounding box spans so points sitting exactly on the
/// radius survive floating point rounding
const BOX_MARGIN_DEG: f64 = 1e-9;

/// Great-circle distance in kilometers between two points given in raw degrees
///
/// Callers are expected to pass in-range values; [`distance_km`] is the
/// checked entry point.
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // rounding can push `a` a hair past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two coordinates in kilometers
#[inline]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    haversine_distance(a.latitude(), a.longitude(), b.latitude(), b.longitude())
}

/// Calculate a bounding box around a center point
///
/// The box contains every point whose haversine distance from `center` is at
/// most `radius_km`, so it can reject candidates before the trigonometric
/// test without losing matches. When the circle reaches a pole the box spans
/// every longitude.
pub fn calculate_bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let radius = radius_km.max(0.0);
    let angular = radius / EARTH_RADIUS_KM;

    let lat_delta = angular.to_degrees() + BOX_MARGIN_DEG;
    let min_lat = center.latitude() - lat_delta;
    let max_lat = center.latitude() + lat_delta;

    let full_span = BoundingBox {
        min_lat: min_lat.max(-90.0),
        max_lat: max_lat.min(90.0),
        min_lon: -180.0,
        max_lon: 180.0,
    };

    if max_lat >= 90.0 || min_lat <= -90.0 || angular >= std::f64::consts::FRAC_PI_2 {
        return full_span;
    }

    // Widest longitude offset on a small circle: asin(sin(r) / cos(lat))
    let ratio = angular.sin() / center.latitude().to_radians().cos();
    if ratio >= 1.0 {
        return full_span;
    }
    let lon_delta = ratio.asin().to_degrees() + BOX_MARGIN_DEG;
    if lon_delta >= 180.0 {
        return full_span;
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon: center.longitude() - lon_delta,
        max_lon: center.longitude() + lon_delta,
    }
}

impl BoundingBox {
    /// Check if a point is within the box, wrapping across the antimeridian
    #[inline]
    pub fn contains(&self, point: Coordinate) -> bool {
        let lat = point.latitude();
        if lat < self.min_lat || lat > self.max_lat {
            return false;
        }

        let lon = point.longitude();
        let in_lon = |l: f64| l >= self.min_lon && l <= self.max_lon;
        in_lon(lon) || in_lon(lon + 360.0) || in_lon(lon - 360.0)
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: Coordinate, bbox: &BoundingBox) -> bool {
    bbox.contains(point)
}
