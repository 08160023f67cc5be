//! Benchmarks for the tolerance-aware sweep, compared against a brute
//! force O(n^2) baseline across a few representative input shapes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geo_types::Coord;
use rand::prelude::*;
use sweep_tol::{intersect, on_segment, segment_intersect, Intersection, Segment};

const TOL: f64 = 1e-9;

fn generate_random_segments(count: usize, rng: &mut impl Rng) -> Vec<(Coord<f64>, Coord<f64>)> {
    (0..count)
        .map(|_| {
            let a = Coord { x: rng.gen_range(-100.0..100.0), y: rng.gen_range(-100.0..100.0) };
            let b = Coord { x: rng.gen_range(-100.0..100.0), y: rng.gen_range(-100.0..100.0) };
            (a, b)
        })
        .collect()
}

fn brute_force_count(raw: &[(Coord<f64>, Coord<f64>)]) -> usize {
    let segs: Vec<Segment> = raw
        .iter()
        .enumerate()
        .filter_map(|(i, &(a, b))| Segment::from_endpoints(i, a, b).ok())
        .collect();
    let mut count = 0;
    for i in 0..segs.len() {
        for j in (i + 1)..segs.len() {
            if !matches!(segment_intersect(&segs[i], &segs[j], TOL), Intersection::None) {
                count += 1;
            }
        }
    }
    black_box(count)
}

fn bench_performance_comparison(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);

    for (n, sample_size) in [(10, None), (100, None), (1_000, Some(20))] {
        let mut group = c.benchmark_group(format!("Performance Comparison ({n} segments)"));
        if let Some(sample_size) = sample_size {
            group.sample_size(sample_size);
        }

        let segments = generate_random_segments(n, &mut rng);

        group.bench_function("brute_force", |b| {
            b.iter(|| brute_force_count(&segments));
        });

        group.bench_function("sweep", |b| {
            b.iter(|| {
                let result = intersect(&segments, TOL);
                black_box(result.ok());
            });
        });

        group.finish();
    }
}

fn bench_dense_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dense Grid Intersections");
    group.sample_size(10);

    let n = 200;
    let mut segments = Vec::with_capacity(n);
    for i in 0..n / 2 {
        let pos = (i as f64) * 2.0 - (n as f64 / 2.0);
        segments.push((Coord { x: -50.0, y: pos }, Coord { x: 50.0, y: pos }));
        segments.push((Coord { x: pos, y: -50.0 }, Coord { x: pos, y: 50.0 }));
    }

    group.bench_function("brute_force_dense", |b| {
        b.iter(|| brute_force_count(&segments));
    });

    group.bench_function("sweep_dense", |b| {
        b.iter(|| black_box(intersect(&segments, TOL).ok()));
    });

    group.finish();
}

fn bench_near_miss_cluster(c: &mut Criterion) {
    let mut group = c.benchmark_group("Near-Miss Cluster");
    group.sample_size(10);

    let n = 200;
    let mut segments = Vec::with_capacity(n);
    for i in 0..n {
        let jitter = (i as f64) * 1e-10;
        segments.push((Coord { x: jitter, y: 0.0 }, Coord { x: 10.0, y: 10.0 + jitter }));
    }

    group.bench_function("sweep_near_miss", |b| {
        b.iter(|| black_box(intersect(&segments, 1e-6).ok()));
    });

    group.finish();
}

fn bench_primitive_on_segment(c: &mut Criterion) {
    let s = Segment::from_endpoints(0, Coord { x: 0.0, y: 0.0 }, Coord { x: 100.0, y: 100.0 }).unwrap();
    c.bench_function("on_segment tube test", |b| {
        b.iter(|| black_box(on_segment(Coord { x: 50.0, y: 50.000001 }, &s, TOL)));
    });
}

criterion_group!(
    benches,
    bench_performance_comparison,
    bench_dense_grid,
    bench_near_miss_cluster,
    bench_primitive_on_segment
);
criterion_main!(benches);
