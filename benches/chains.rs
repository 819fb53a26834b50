//! Benchmarks for chain extraction.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point2;
use trichain::prelude::*;

/// An n-by-n grid of integer points split into 2n² triangles, as one batch.
fn create_grid_collection(n: usize) -> BatchCollection {
    let mut points = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            points.push(Point2::new(i as f64, j as f64));
        }
    }

    let mut collection = BatchCollection::new();
    collection.assign_points(&points);
    collection.reserve_batch(n * n * 2);
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            collection.add_triangle(v00, v10, v11).unwrap();
            collection.add_triangle(v00, v11, v01).unwrap();
        }
    }
    collection
}

fn quantize(collection: &BatchCollection, n: usize) -> QuantizedPoints {
    collection.quantize(Point2::new(0, 0), Point2::new(n as u32, n as u32), |p| {
        Point2::new(p.x as u32, p.y as u32)
    })
}

fn bench_graph_construction(c: &mut Criterion) {
    c.bench_function("build_grid_50x50", |b| {
        b.iter(|| create_grid_collection(50));
    });
}

fn bench_chain_extraction(c: &mut Criterion) {
    let n = 50;
    let collection = create_grid_collection(n);
    let points = quantize(&collection, n);
    let graph = &collection.batches()[0];

    c.bench_function("chain_grid_50x50_greedy", |b| {
        b.iter(|| build_chain(graph, &points, TraversalOrder::Greedy).unwrap());
    });

    c.bench_function("chain_grid_50x50_discovery", |b| {
        b.iter(|| build_chain(graph, &points, TraversalOrder::Discovery).unwrap());
    });
}

fn bench_process(c: &mut Criterion) {
    let n = 50;
    let collection = create_grid_collection(n);
    let points = quantize(&collection, n);

    c.bench_function("process_grid_50x50", |b| {
        b.iter(|| {
            let mut steps = 0;
            collection
                .process(&points, &ProcessOptions::default(), |_, chain| {
                    steps += chain.steps().len();
                })
                .unwrap();
            steps
        });
    });
}

criterion_group!(
    benches,
    bench_graph_construction,
    bench_chain_extraction,
    bench_process
);
criterion_main!(benches);
