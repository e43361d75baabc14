//! Graph construction benchmarks.
//!
//! `sample_and_build` covers sampling, edge formation and every property
//! pass; `from_points` reuses a fixed point cloud so the timing isolates edge
//! formation and the traversals.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use rgg_benches::{error::BenchSetupError, fixtures::point_cloud, params::GraphBenchParams};
use rgg_core::{GeometricGraph, MeasureModel, PositionSampler};

/// Seed used for all sampling in this benchmark.
const SEED: u64 = 42;

/// Graph sizes to benchmark.
const VERTEX_COUNTS: &[usize] = &[50, 200, 800];

/// Thresholds spanning sparse to dense graphs.
const THRESHOLDS: &[f64] = &[0.05, 0.2];

fn sample_and_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_and_build");
    group.sample_size(20);

    for &vertex_count in VERTEX_COUNTS {
        for &xi in THRESHOLDS {
            let params = GraphBenchParams {
                vertex_count,
                xi,
                dimensions: 2,
            };
            group.bench_with_input(BenchmarkId::from_parameter(params), &params, |b, params| {
                let mut sampler = PositionSampler::seeded(SEED);
                b.iter(|| {
                    GeometricGraph::new(params.vertex_count, params.xi, params.dimensions, &mut sampler)
                });
            });
        }
    }

    group.finish();
}

fn from_points_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("from_points");
    group.sample_size(20);

    for &vertex_count in VERTEX_COUNTS {
        let points = point_cloud(vertex_count, 3, SEED)?;
        let params = GraphBenchParams {
            vertex_count,
            xi: 0.2,
            dimensions: 3,
        };
        group.bench_with_input(BenchmarkId::from_parameter(params), &points, |b, points| {
            b.iter(|| GeometricGraph::from_points(points.clone(), params.xi, MeasureModel::Ball));
        });
    }

    group.finish();
    Ok(())
}

fn from_points(c: &mut Criterion) {
    if let Err(err) = from_points_impl(c) {
        panic!("from_points benchmark setup failed: {err}");
    }
}

criterion_group!(benches, sample_and_build, from_points);
criterion_main!(benches);
