//! Unit tests for argument parsing and command execution.

use super::commands::{create_output, sweep_config};
use super::{Cli, CliError, Command, GraphArgs, MeasureArg, SweepArgs, TableArgs, run_cli};

use std::fs;

use clap::{CommandFactory, Parser};
use rgg_core::{Execution, GraphError, MeasureModel};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use rgg_test_support::tracing::capture;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn small_sweep() -> SweepArgs {
    SweepArgs {
        min_vertices: 5,
        max_vertices: 10,
        vertex_step: 5,
        min_xi: 0.1,
        max_xi: 0.3,
        xi_step: 0.1,
        trials: 3,
        dimensions: 2,
        seed: Some(2024),
        measure: MeasureArg::Ball,
        sequential: false,
        output: None,
        table: TableArgs::default(),
    }
}

fn run_to_string(command: Command) -> Result<String, Box<dyn std::error::Error>> {
    let mut out = Vec::new();
    run_cli(Cli { command }, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn clap_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn sweep_defaults_mirror_the_historical_grid() -> TestResult {
    let cli = Cli::try_parse_from(["rgg", "sweep"])?;
    let Command::Sweep(args) = cli.command else {
        panic!("expected the sweep command");
    };
    let config = sweep_config(&args)?;
    assert_eq!(config.grid_len(), 100);
    assert_eq!(config.trials(), 10);
    assert_eq!(config.measure_model(), MeasureModel::Ball);
    assert_eq!(config.seed(), None);
    assert_eq!(args.table.delimiter, ";");
    assert_eq!(args.table.precision, 9);
    Ok(())
}

#[test]
fn sweep_flags_reach_the_configuration() -> TestResult {
    let cli = Cli::try_parse_from([
        "rgg",
        "sweep",
        "--min-vertices",
        "20",
        "--max-vertices",
        "40",
        "--trials",
        "2",
        "--measure",
        "planar",
        "--seed",
        "9",
        "--sequential",
    ])?;
    let Command::Sweep(args) = cli.command else {
        panic!("expected the sweep command");
    };
    let config = sweep_config(&args)?;
    assert_eq!(config.vertices().values().collect::<Vec<_>>(), vec![20, 30, 40]);
    assert_eq!(config.measure_model(), MeasureModel::Planar);
    assert_eq!(config.execution(), Execution::Sequential);
    assert_eq!(config.seed(), Some(9));
    Ok(())
}

#[rstest]
fn sweep_writes_header_and_one_row_per_grid_point(small_sweep: SweepArgs) -> TestResult {
    let text = run_to_string(Command::Sweep(small_sweep))?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 4);
    assert!(lines[0].starts_with("Dimensions;Vertices;Edge probability;"));
    let width = lines[0].split(';').count();
    for line in &lines {
        assert!(line.ends_with(';'), "line must end with the delimiter: {line}");
        assert_eq!(line.split(';').count(), width);
    }
    assert!(lines[1].starts_with("2;5;0.100000000;"));
    Ok(())
}

#[rstest]
fn seeded_sweeps_are_identical_across_execution_modes(small_sweep: SweepArgs) -> TestResult {
    let parallel = run_to_string(Command::Sweep(small_sweep.clone()))?;
    let sequential = run_to_string(Command::Sweep(SweepArgs {
        sequential: true,
        ..small_sweep
    }))?;
    assert_eq!(parallel, sequential);
    Ok(())
}

#[rstest]
fn sweep_honours_custom_delimiter_and_precision(small_sweep: SweepArgs) -> TestResult {
    let text = run_to_string(Command::Sweep(SweepArgs {
        table: TableArgs {
            delimiter: ",".to_owned(),
            precision: 2,
        },
        ..small_sweep
    }))?;
    let row = text.lines().nth(1).ok_or("missing data row")?;
    assert!(row.starts_with("2,5,0.10,"), "unexpected row: {row}");
    Ok(())
}

#[rstest]
fn sweep_writes_to_output_file(small_sweep: SweepArgs) -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("table.txt");
    let mut stdout = Vec::new();
    let summary = run_cli(
        Cli {
            command: Command::Sweep(SweepArgs {
                output: Some(path.clone()),
                ..small_sweep
            }),
        },
        &mut stdout,
    )?;
    assert!(stdout.is_empty());
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.output.as_deref(), Some(path.as_path()));
    assert_eq!(fs::read_to_string(&path)?.lines().count(), 5);
    Ok(())
}

#[test]
fn create_output_reports_the_failing_path() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("missing").join("table.txt");
    let err = create_output(&path).expect_err("parent directory does not exist");
    assert!(matches!(err, CliError::Io { path: ref failed, .. } if *failed == path));
    Ok(())
}

#[rstest]
fn invalid_sweeps_surface_core_errors(small_sweep: SweepArgs) {
    let mut out = Vec::new();
    let err = run_cli(
        Cli {
            command: Command::Sweep(SweepArgs {
                min_vertices: 1,
                ..small_sweep
            }),
        },
        &mut out,
    )
    .expect_err("one vertex is not a graph");
    assert!(matches!(err, CliError::Core(GraphError::InvalidSweep { .. })));
    assert!(out.is_empty());
}

#[rstest]
#[case(4, 2.0, "2;4;2.000000000;1;6;")]
#[case(5, 0.0, "2;5;0.000000000;0;0;")]
fn graph_reports_extreme_thresholds(
    #[case] vertices: usize,
    #[case] xi: f64,
    #[case] prefix: &str,
) -> TestResult {
    let text = run_to_string(Command::Graph(GraphArgs {
        vertices,
        xi,
        dimensions: 2,
        seed: Some(1),
        measure: MeasureArg::Ball,
        table: TableArgs::default(),
    }))?;
    let row = text.lines().nth(1).ok_or("missing data row")?;
    assert!(row.starts_with(prefix), "unexpected row: {row}");
    Ok(())
}

#[test]
fn graph_rejects_single_vertex() {
    let cli = Cli::try_parse_from(["rgg", "graph", "--vertices", "1", "--xi", "0.2"])
        .expect("arguments parse");
    let err = run_cli(cli, Vec::new()).expect_err("one vertex is not a graph");
    assert!(matches!(
        err,
        CliError::Core(GraphError::InvalidVertexCount { got: 1 })
    ));
}

#[rstest]
fn run_cli_records_command_span(small_sweep: SweepArgs) {
    let (result, layer) = capture(|| run_cli(Cli { command: Command::Sweep(small_sweep) }, Vec::new()));
    result.expect("sweep succeeds");
    let spans = layer.spans_named("cli.run");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].field("command"), Some("sweep"));
    let sweep = layer.spans_named("core.sweep");
    assert_eq!(sweep.len(), 1);
    assert_eq!(sweep[0].field("base_seed"), Some("2024"));
    assert_eq!(layer.events_with_message("sweep completed").len(), 1);
}
