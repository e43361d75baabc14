//! Trial realisation benchmarks.
//!
//! Compares sequential and rayon-backed realisation of the trials behind one
//! grid point, followed by the cross-trial average.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use rgg_benches::{error::BenchSetupError, fixtures::single_point_sweep, params::TrialBenchParams};
use rgg_core::{AverageProperties, Execution, GridPoint, SweepConfig, run_trials};

/// Base seed shared by every configuration.
const SEED: u64 = 7;

/// Trials per grid point.
const TRIALS: usize = 16;

/// Graph sizes to benchmark.
const VERTEX_COUNTS: &[usize] = &[50, 200];

fn realise_and_average(
    config: &SweepConfig,
    point: GridPoint,
) -> Result<AverageProperties, BenchSetupError> {
    let trials = run_trials(config, point, SEED)?;
    Ok(AverageProperties::from_trials(&trials)?)
}

fn trial_sweep_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("trial_sweep");
    group.sample_size(10);

    for &vertex_count in VERTEX_COUNTS {
        let base = single_point_sweep(vertex_count, 0.15, TRIALS, SEED)?;
        let point = base
            .grid()
            .next()
            .ok_or(BenchSetupError::ZeroValue { context: "grid points" })?;
        let params = TrialBenchParams {
            vertex_count,
            trials: TRIALS,
        };

        for (label, execution) in [
            ("sequential", Execution::Sequential),
            ("parallel", Execution::Parallel),
        ] {
            let config = SweepConfig::builder()
                .with_vertices(base.vertices())
                .with_thresholds(base.thresholds())
                .with_trials(TRIALS)
                .with_seed(SEED)
                .with_execution(execution)
                .build()?;
            group.bench_with_input(BenchmarkId::new(label, params), &config, |b, config| {
                b.iter(|| realise_and_average(config, point));
            });
        }
    }

    group.finish();
    Ok(())
}

fn trial_sweep(c: &mut Criterion) {
    if let Err(err) = trial_sweep_impl(c) {
        panic!("trial_sweep benchmark setup failed: {err}");
    }
}

criterion_group!(benches, trial_sweep);
criterion_main!(benches);
