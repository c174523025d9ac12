// Criterion benchmarks for Lono Geo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lono_geo::core::{calculate_bounding_box, distance_km, filter_within_radius, MemoryLocator};
use lono_geo::models::{Coordinate, Location, Memory, NearbyQuery};

fn create_memory(id: usize, lat: f64, lon: f64) -> Memory {
    Memory {
        id: id.to_string(),
        app_id: None,
        user_id: "user_1".to_string(),
        title: format!("Memory {}", id),
        description: String::new(),
        date: None,
        album_id: Some("album_1".to_string()),
        image_urls: vec![],
        tags: vec!["trip".to_string()],
        // every tenth memory has no place
        location: (id % 10 != 0).then(|| Location { latitude: lat, longitude: lon, name: None }),
        likes: vec![],
        created_at: None,
        updated_at: None,
        document_created_at: None,
        document_updated_at: None,
    }
}

fn create_memories(count: usize) -> Vec<Memory> {
    (0..count)
        .map(|i| {
            // Spread memories around New York, up to ~1000km out
            let lat = 40.7128 + ((i % 200) as f64 - 100.0) * 0.09;
            let lon = -74.0060 + ((i / 200 % 200) as f64 - 100.0) * 0.09;
            create_memory(i, lat, lon)
        })
        .collect()
}

fn new_york() -> Coordinate {
    Coordinate::new(40.7128, -74.0060).unwrap()
}

fn bench_distance_km(c: &mut Criterion) {
    let a = new_york();
    let b = Coordinate::new(42.3601, -71.0589).unwrap();
    c.bench_function("distance_km", |bench| {
        bench.iter(|| distance_km(black_box(a), black_box(b)));
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    let center = new_york();
    c.bench_function("bounding_box_calculation", |bench| {
        bench.iter(|| calculate_bounding_box(black_box(center), black_box(50.0)));
    });
}

fn bench_filter_within_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_within_radius");
    let center = new_york();

    for size in [100, 1000, 10000].iter() {
        let memories = create_memories(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &memories, |bench, memories| {
            bench.iter(|| filter_within_radius(center, black_box(100.0), memories).count());
        });
    }

    group.finish();
}

fn bench_locator(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_nearby");
    let query = NearbyQuery::new(new_york(), 100.0);

    for prefilter in [true, false] {
        let locator = MemoryLocator::new(prefilter);
        let memories = create_memories(10000);
        group.bench_with_input(
            BenchmarkId::new("prefilter", prefilter),
            &memories,
            |bench, memories| {
                bench.iter(|| locator.find_nearby(black_box(&query), memories.clone()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_distance_km,
    bench_bounding_box,
    bench_filter_within_radius,
    bench_locator
);
criterion_main!(benches);
