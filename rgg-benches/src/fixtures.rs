//! Deterministic inputs shared by the benchmarks.

use rgg_core::{Point, PositionSampler, SamplingRange, SweepConfig, ThresholdRange, VertexRange};

use crate::error::BenchSetupError;

/// Samples `count` points in the unit hypercube from a seeded sampler.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when `count` or `dimensions` is
/// zero.
///
/// # Examples
/// ```
/// use rgg_benches::fixtures::point_cloud;
///
/// let points = point_cloud(16, 3, 7)?;
/// assert_eq!(points.len(), 16);
/// assert!(points.iter().all(|point| point.dimensions() == 3));
/// # Ok::<(), rgg_benches::error::BenchSetupError>(())
/// ```
pub fn point_cloud(
    count: usize,
    dimensions: usize,
    seed: u64,
) -> Result<Vec<Point>, BenchSetupError> {
    if count == 0 {
        return Err(BenchSetupError::ZeroValue { context: "count" });
    }
    if dimensions == 0 {
        return Err(BenchSetupError::ZeroValue {
            context: "dimensions",
        });
    }
    let mut sampler = PositionSampler::seeded(seed);
    let points = (0..count)
        .map(|_| Point::sample(dimensions, SamplingRange::UNIT, &mut sampler))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(points)
}

/// A one-point sweep configuration realising `trials` graphs of
/// `vertex_count` points at threshold `xi`.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when the configuration is rejected.
#[expect(
    clippy::float_arithmetic,
    reason = "a step of one past xi bounds the single-threshold range"
)]
pub fn single_point_sweep(
    vertex_count: usize,
    xi: f64,
    trials: usize,
    seed: u64,
) -> Result<SweepConfig, BenchSetupError> {
    let config = SweepConfig::builder()
        .with_vertices(VertexRange::new(vertex_count, vertex_count, 1))
        .with_thresholds(ThresholdRange::new(xi, xi + 1.0, 1.0))
        .with_trials(trials)
        .with_seed(seed)
        .build()?;
    Ok(config)
}
