//! Sweep scenarios exercised through the public API.

use rgg_core::{
    AverageProperties, Execution, GraphError, Report, SweepConfig, TableWriter, ThresholdRange,
    VertexRange, collect_sweep, run_sweep,
};
use rgg_test_support::tracing::capture;
use rstest::{fixture, rstest};

#[fixture]
fn config() -> SweepConfig {
    SweepConfig::builder()
        .with_vertices(VertexRange::new(6, 12, 3))
        .with_thresholds(ThresholdRange::new(0.2, 0.6, 0.2))
        .with_trials(4)
        .with_execution(Execution::Sequential)
        .with_seed(31)
        .build()
        .expect("valid sweep")
}

#[rstest]
fn averages_follow_the_vertex_major_grid(config: SweepConfig) {
    let averages = collect_sweep(&config).expect("sweep succeeds");
    let visited: Vec<(usize, f64)> = averages
        .iter()
        .map(|average| (average.vertex_count, average.xi))
        .collect();
    let expected: Vec<(usize, f64)> = config
        .grid()
        .map(|point| (point.vertex_count, point.xi))
        .collect();
    assert_eq!(visited, expected);
    assert_eq!(averages.len(), 3 * 2);
    for average in &averages {
        assert_eq!(average.trials, 4);
        assert!((0.0..=1.0).contains(&average.connected_probability));
        assert!(average.component_count >= 1.0);
    }
}

#[rstest]
fn table_rows_match_the_header_width(config: SweepConfig) {
    let averages = collect_sweep(&config).expect("sweep succeeds");
    let mut table = TableWriter::new(Vec::new());
    table
        .write_header::<AverageProperties>()
        .expect("in-memory write");
    for average in &averages {
        table.write_row(average).expect("in-memory write");
    }
    let text = String::from_utf8(table.into_inner()).expect("utf-8 table");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + averages.len());
    let columns = AverageProperties::fields().len();
    for line in lines {
        assert_eq!(line.split(';').count(), columns + 1);
        assert!(line.ends_with(';'));
    }
}

#[rstest]
fn repeated_sweeps_with_one_seed_agree(config: SweepConfig) {
    let first = collect_sweep(&config).expect("sweep succeeds");
    let second = collect_sweep(&config).expect("sweep succeeds");
    assert_eq!(first, second);
}

#[cfg(feature = "parallel")]
#[rstest]
fn parallel_trials_reproduce_sequential_averages(config: SweepConfig) {
    let parallel = SweepConfig::builder()
        .with_vertices(config.vertices())
        .with_thresholds(config.thresholds())
        .with_trials(config.trials())
        .with_execution(Execution::Parallel)
        .with_seed(31)
        .build()
        .expect("valid sweep");
    assert_eq!(
        collect_sweep(&config).expect("sweep succeeds"),
        collect_sweep(&parallel).expect("sweep succeeds")
    );
}

#[rstest]
fn sweep_span_records_the_base_seed(config: SweepConfig) {
    let (result, layer) = capture(|| {
        run_sweep(&config, |_| Ok::<(), GraphError>(()))
    });
    assert_eq!(result.expect("sweep succeeds"), 6);
    let spans = layer.spans_named("core.sweep");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].field("base_seed"), Some("31"));
    assert_eq!(spans[0].field("grid_points"), Some("6"));
    assert_eq!(layer.spans_named("core.average").len(), 6);
    assert_eq!(layer.events_with_message("grid point averaged").len(), 6);
    let finished = layer.events_with_message("sweep finished");
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].field("rows"), Some("6"));
}
