// Unit tests for Lono Geo

use lono_geo::core::{
    distance::{calculate_bounding_box, distance_km, haversine_distance, EARTH_RADIUS_KM},
    filters::filter_within_radius,
};
use lono_geo::models::{Coordinate, GeoError, GeoTagged};

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

fn sample_points() -> Vec<Coordinate> {
    let lats = [-90.0, -89.5, -60.0, -33.3, 0.0, 12.5, 45.0, 78.9, 90.0];
    let lons = [-180.0, -120.5, -45.0, 0.0, 30.25, 100.0, 179.99, 180.0];
    lats.iter()
        .flat_map(|&lat| lons.iter().map(move |&lon| coord(lat, lon)))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct Place {
    name: &'static str,
    at: Option<Coordinate>,
}

impl GeoTagged for Place {
    fn coordinate(&self) -> Option<Coordinate> {
        self.at
    }
}

fn place(name: &'static str, lat: f64, lon: f64) -> Place {
    Place { name, at: Some(coord(lat, lon)) }
}

#[test]
fn test_distance_to_self_is_zero() {
    for p in sample_points() {
        assert!(distance_km(p, p).abs() < 1e-9, "{:?}", p);
    }
}

#[test]
fn test_distance_is_symmetric() {
    let points = sample_points();
    for &a in &points {
        for &b in &points {
            assert_eq!(distance_km(a, b), distance_km(b, a), "{:?} {:?}", a, b);
        }
    }
}

#[test]
fn test_triangle_inequality() {
    let points = sample_points();
    for &a in points.iter().step_by(3) {
        for &b in points.iter().step_by(2) {
            for &c in points.iter().step_by(5) {
                let direct = distance_km(a, c);
                let detour = distance_km(a, b) + distance_km(b, c);
                assert!(direct <= detour + 1e-6, "{:?} {:?} {:?}", a, b, c);
            }
        }
    }
}

#[test]
fn test_distance_is_bounded_by_half_circumference() {
    let half = EARTH_RADIUS_KM * std::f64::consts::PI;
    let points = sample_points();
    for &a in &points {
        for &b in &points {
            let d = distance_km(a, b);
            assert!(d >= 0.0 && d <= half + 1e-6);
        }
    }
}

#[test]
fn test_quarter_great_circle() {
    let distance = distance_km(coord(0.0, 0.0), coord(0.0, 90.0));
    assert!((distance - 10007.5).abs() < 1.0, "got {}", distance);
}

#[test]
fn test_matches_reference_haversine() {
    use geo::{point, HaversineDistance};

    let points = sample_points();
    for &a in points.iter().step_by(4) {
        for &b in points.iter().step_by(3) {
            let ours = distance_km(a, b);
            // the reference uses asin, which loses precision near antipodes
            if ours > 15_000.0 {
                continue;
            }
            let reference = point!(x: a.longitude(), y: a.latitude())
                .haversine_distance(&point!(x: b.longitude(), y: b.latitude()))
                / 1000.0;
            // geo uses a 6371.0088 km radius
            assert!((ours - reference).abs() <= reference * 1e-5 + 1e-6, "{} vs {}", ours, reference);
        }
    }
}

#[test]
fn test_raw_degrees_agree_with_coordinates() {
    let a = coord(51.5074, -0.1278);
    let b = coord(48.8566, 2.3522);
    assert_eq!(
        distance_km(a, b),
        haversine_distance(51.5074, -0.1278, 48.8566, 2.3522)
    );
}

#[test]
fn test_invalid_coordinates_rejected() {
    for (lat, lon) in [(f64::NAN, 0.0), (0.0, f64::NAN), (91.0, 0.0), (-90.5, 0.0), (0.0, -181.0), (0.0, f64::NEG_INFINITY)] {
        match Coordinate::new(lat, lon) {
            Err(GeoError::InvalidArgument(_)) => {}
            other => panic!("expected InvalidArgument for ({}, {}), got {:?}", lat, lon, other),
        }
    }
}

#[test]
fn test_boundary_point_is_included() {
    let center = coord(10.0, 20.0);
    let edge = place("edge", 10.5, 20.7);
    let radius = distance_km(center, edge.at.unwrap());

    let kept: Vec<_> = filter_within_radius(center, radius, vec![edge.clone()]).collect();
    assert_eq!(kept, vec![edge]);
}

#[test]
fn test_negative_radius_is_empty() {
    let center = coord(40.7128, -74.0060);
    let places = vec![place("here", 40.7128, -74.0060), place("near", 40.72, -74.0)];

    assert_eq!(filter_within_radius(center, -5.0, places).count(), 0);
}

#[test]
fn test_untagged_items_never_returned() {
    let untagged = Place { name: "untagged", at: None };
    for center in sample_points().into_iter().step_by(7) {
        for radius in [0.0, 1.0, 1000.0, 30_000.0] {
            let kept: Vec<_> = filter_within_radius(center, radius, [&untagged]).collect();
            assert!(kept.is_empty());
        }
    }
}

#[test]
fn test_order_is_preserved() {
    let center = coord(0.0, 0.0);
    let places = vec![
        place("x1", 0.0, 0.3),
        place("x2", 0.1, 0.0),
        place("x3", 0.0, 0.2),
    ];

    let names: Vec<_> = filter_within_radius(center, 100.0, &places).map(|p| p.name).collect();
    assert_eq!(names, vec!["x1", "x2", "x3"]);
}

#[test]
fn test_new_york_scenario() {
    let center = coord(40.7128, -74.0060);
    let places = vec![
        place("manhattan", 40.7306, -73.9352),
        place("boston", 42.3601, -71.0589),
        place("los_angeles", 34.0522, -118.2437),
    ];

    let names: Vec<_> = filter_within_radius(center, 500.0, &places).map(|p| p.name).collect();
    assert_eq!(names, vec!["manhattan", "boston"]);

    let boston = distance_km(center, places[1].at.unwrap());
    assert!((boston - 306.0).abs() < 5.0, "got {}", boston);
    let la = distance_km(center, places[2].at.unwrap());
    assert!((la - 3936.0).abs() < 10.0, "got {}", la);
}

#[test]
fn test_bounding_box_is_conservative() {
    let centers = [
        coord(0.0, 0.0),
        coord(40.7128, -74.0060),
        coord(-33.9, 151.2),
        coord(64.1, -21.9),
        coord(85.0, 10.0),
        coord(-88.0, 179.0),
        coord(12.0, 179.8),
        coord(-5.0, -179.9),
    ];
    let lats: Vec<f64> = (-180..=180).map(|i| i as f64 * 0.5).collect();
    let lons: Vec<f64> = (-180..=180).map(|i| i as f64).collect();

    for center in centers {
        for radius in [1.0, 50.0, 500.0, 2500.0, 9000.0] {
            let bbox = calculate_bounding_box(center, radius);
            for &lat in &lats {
                for &lon in &lons {
                    let p = coord(lat, lon);
                    if distance_km(center, p) <= radius {
                        assert!(bbox.contains(p), "{:?} r={} misses {:?}", center, radius, p);
                    }
                }
            }
        }
    }
}
