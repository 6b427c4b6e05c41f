//! Benchmark for lens traversal over nested structures.
//!
//! Measures `get` and `set_copy` at increasing depths, and the wildcard
//! fan-out over sequences of increasing width.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use treelens::prelude::*;

fn nested(depth: usize) -> (Structure, Lens) {
    let mut tree = Structure::from(0);
    let mut steps = Vec::new();
    for level in (0..depth).rev() {
        tree = Structure::mapping([(format!("level{level}"), tree)]);
        steps.insert(0, PathKey::from(format!("level{level}")));
    }
    (tree, lens(steps))
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for depth in [2, 8, 32] {
        let (tree, focus) = nested(depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &depth, |bencher, _| {
            bencher.iter(|| black_box(focus.get(black_box(&tree)).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// set_copy Benchmark
// =============================================================================

fn benchmark_set_copy(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_copy");

    for depth in [2, 8, 32] {
        let (tree, focus) = nested(depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &depth, |bencher, _| {
            bencher.iter(|| black_box(focus.set_copy(black_box(&tree), Structure::from(1)).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Wildcard Benchmark
// =============================================================================

fn benchmark_wildcard(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("wildcard");

    for width in [10, 100, 1000] {
        let rows = Structure::sequence(
            (0..width).map(|index| Structure::mapping([("v", Structure::from(index))])),
        );
        let values = lens([PathKey::Wildcard, PathKey::from("v")]);
        group.bench_with_input(BenchmarkId::new("get", width), &width, |bencher, _| {
            bencher.iter(|| black_box(values.get(black_box(&rows)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("set_copy", width), &width, |bencher, _| {
            bencher.iter(|| black_box(values.set_copy(black_box(&rows), Structure::from(0)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_get, benchmark_set_copy, benchmark_wildcard);
criterion_main!(benches);
