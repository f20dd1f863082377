use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qci_client::services::geo::{normalize_ring, to_polygon_feature_from_any};
use serde_json::{json, Value};

/// Closed circle-ish ring with `n` vertices around Mexico City, `[lat, lng]` order.
fn lat_lng_ring(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            json!([19.43 + 0.05 * t.sin(), -99.13 + 0.05 * t.cos()])
        })
        .collect()
}

fn benchmark_normalize(c: &mut Criterion) {
    let ring = lat_lng_ring(500);
    let lng_lat: Vec<Value> = ring
        .iter()
        .map(|p| json!([p[1].clone(), p[0].clone()]))
        .collect();

    let geojson_polygon = json!({"type": "Polygon", "coordinates": [lng_lat]});
    let raw_record = json!({"nombre": "Comunidad", "poligono": [[ring]]});
    let objects: Vec<Value> = lat_lng_ring(500)
        .iter()
        .map(|p| json!({"lat": p[0], "lng": p[1]}))
        .collect();
    let objects = Value::Array(objects);

    let mut group = c.benchmark_group("normalize_ring");

    group.bench_function("geojson_polygon", |b| {
        b.iter(|| normalize_ring(black_box(&geojson_polygon)))
    });

    group.bench_function("nested_raw_property", |b| {
        b.iter(|| normalize_ring(black_box(&raw_record)))
    });

    group.bench_function("lat_lng_objects", |b| {
        b.iter(|| normalize_ring(black_box(&objects)))
    });

    group.bench_function("feature_from_record", |b| {
        b.iter(|| to_polygon_feature_from_any(black_box(&raw_record), Default::default()))
    });

    group.finish();
}

criterion_group!(benches, benchmark_normalize);
criterion_main!(benches);
