//! Command implementations and argument parsing for the `rgg` CLI.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rgg_core::{
    AverageProperties, DEFAULT_DELIMITER, DEFAULT_PRECISION, Execution, GeometricGraph,
    GeometricGraphBuilder, GraphError, MeasureModel, PositionSampler, SweepConfig,
    TableWriter, ThresholdRange, VertexRange, run_sweep,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "rgg",
    about = "Generate random geometric graphs and tabulate their properties."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Average many trials over a grid of vertex counts and thresholds.
    Sweep(SweepArgs),
    /// Build one graph and print its properties.
    Graph(GraphArgs),
}

/// Options accepted by the `sweep` command.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Smallest vertex count.
    #[arg(long, default_value_t = 10)]
    pub min_vertices: usize,

    /// Largest vertex count (inclusive).
    #[arg(long, default_value_t = 100)]
    pub max_vertices: usize,

    /// Increment between vertex counts.
    #[arg(long, default_value_t = 10)]
    pub vertex_step: usize,

    /// Smallest threshold.
    #[arg(long, default_value_t = 0.0)]
    pub min_xi: f64,

    /// Threshold bound (exclusive).
    #[arg(long, default_value_t = 0.5)]
    pub max_xi: f64,

    /// Increment between thresholds.
    #[arg(long, default_value_t = 0.05)]
    pub xi_step: f64,

    /// Trials averaged per grid point.
    #[arg(long, default_value_t = 10)]
    pub trials: usize,

    /// Coordinates per point.
    #[arg(long, default_value_t = rgg_core::DEFAULT_DIMENSIONS)]
    pub dimensions: usize,

    /// Base seed; drawn from entropy and logged when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge-probability model for the estimates.
    #[arg(long, value_enum, default_value_t = MeasureArg::Ball)]
    pub measure: MeasureArg,

    /// Realise trials on the calling thread only.
    #[arg(long)]
    pub sequential: bool,

    /// Write the table to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Table formatting.
    #[command(flatten)]
    pub table: TableArgs,
}

/// Options accepted by the `graph` command.
#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Number of points.
    #[arg(long)]
    pub vertices: usize,

    /// Edge threshold.
    #[arg(long)]
    pub xi: f64,

    /// Coordinates per point.
    #[arg(long, default_value_t = rgg_core::DEFAULT_DIMENSIONS)]
    pub dimensions: usize,

    /// Sampler seed; drawn from entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge-probability model for the estimates.
    #[arg(long, value_enum, default_value_t = MeasureArg::Ball)]
    pub measure: MeasureArg,

    /// Table formatting.
    #[command(flatten)]
    pub table: TableArgs,
}

/// Delimited table formatting shared by every command.
#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    /// Column separator; also terminates every line.
    #[arg(long, default_value = DEFAULT_DELIMITER)]
    pub delimiter: String,

    /// Decimal places for non-integer columns.
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,
}

impl Default for TableArgs {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_owned(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl TableArgs {
    fn writer<W: Write>(&self, writer: W) -> TableWriter<W> {
        TableWriter::new(writer)
            .with_delimiter(self.delimiter.as_str())
            .with_precision(self.precision)
    }
}

/// Command-line names of [`MeasureModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MeasureArg {
    /// Volume of the d-ball of radius xi.
    Ball,
    /// Area of the disk of radius xi in every dimension.
    Planar,
}

impl From<MeasureArg> for MeasureModel {
    fn from(value: MeasureArg) -> Self {
        match value {
            MeasureArg::Ball => Self::Ball,
            MeasureArg::Planar => Self::Planar,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The output file could not be created.
    #[error("failed to create `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing the table failed.
    #[error("failed to write table: {0}")]
    Write(#[source] io::Error),
    /// Graph construction, averaging or sweep configuration failed.
    #[error(transparent)]
    Core(#[from] GraphError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Name of the executed command.
    pub command: &'static str,
    /// Number of data rows written, excluding the header.
    pub rows: usize,
    /// File the table went to, or `None` for the supplied writer.
    pub output: Option<PathBuf>,
}

/// Executes `cli`, writing tables to `stdout` unless the command names an
/// output file.
///
/// # Errors
/// Returns [`CliError`] when configuration, graph construction or writing
/// fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use rgg_cli::cli::{Cli, Command, GraphArgs, MeasureArg, TableArgs, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Graph(GraphArgs {
///         vertices: 12,
///         xi: 0.3,
///         dimensions: 2,
///         seed: Some(5),
///         measure: MeasureArg::Ball,
///         table: TableArgs::default(),
///     }),
/// };
/// let mut out = Vec::new();
/// let summary = run_cli(cli, &mut out)?;
/// assert_eq!(summary.rows, 1);
/// assert_eq!(String::from_utf8(out)?.lines().count(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli, stdout),
    fields(command = field::Empty),
)]
pub fn run_cli<W: Write>(cli: Cli, stdout: W) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Sweep(args) => {
            Span::current().record("command", field::display("sweep"));
            run_sweep_command(&args, stdout)
        }
        Command::Graph(args) => {
            Span::current().record("command", field::display("graph"));
            run_graph_command(&args, stdout)
        }
    }
}

pub(super) fn sweep_config(args: &SweepArgs) -> Result<SweepConfig, GraphError> {
    let mut builder = SweepConfig::builder()
        .with_vertices(VertexRange::new(
            args.min_vertices,
            args.max_vertices,
            args.vertex_step,
        ))
        .with_thresholds(ThresholdRange::new(args.min_xi, args.max_xi, args.xi_step))
        .with_trials(args.trials)
        .with_dimensions(args.dimensions)
        .with_measure_model(args.measure.into());
    if args.sequential {
        builder = builder.with_execution(Execution::Sequential);
    }
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    builder.build()
}

#[instrument(
    name = "cli.sweep",
    err,
    skip(args, stdout),
    fields(grid_points = field::Empty, output = field::Empty),
)]
pub(super) fn run_sweep_command<W: Write>(
    args: &SweepArgs,
    stdout: W,
) -> Result<ExecutionSummary, CliError> {
    let config = sweep_config(args)?;
    let span = Span::current();
    span.record("grid_points", config.grid_len());

    let rows = match &args.output {
        Some(path) => {
            span.record("output", field::display(path.display()));
            let file = create_output(path)?;
            write_sweep(&config, &args.table, BufWriter::new(file))?
        }
        None => {
            span.record("output", "stdout");
            write_sweep(&config, &args.table, stdout)?
        }
    };

    info!(rows, "sweep completed");
    Ok(ExecutionSummary {
        command: "sweep",
        rows,
        output: args.output.clone(),
    })
}

fn write_sweep<W: Write>(
    config: &SweepConfig,
    table: &TableArgs,
    writer: W,
) -> Result<usize, CliError> {
    let mut table = table.writer(writer);
    table
        .write_header::<AverageProperties>()
        .map_err(CliError::Write)?;
    let rows = run_sweep(config, |average| {
        table.write_row(&average).map_err(CliError::Write)
    })?;
    table.flush().map_err(CliError::Write)?;
    Ok(rows)
}

#[instrument(
    name = "cli.graph",
    err,
    skip(args, stdout),
    fields(vertices = args.vertices, xi = args.xi, seeded = args.seed.is_some()),
)]
pub(super) fn run_graph_command<W: Write>(
    args: &GraphArgs,
    stdout: W,
) -> Result<ExecutionSummary, CliError> {
    let mut sampler = args
        .seed
        .map_or_else(PositionSampler::from_entropy, PositionSampler::seeded);
    let graph = GeometricGraphBuilder::new(args.vertices, args.xi)
        .with_dimensions(args.dimensions)
        .with_measure_model(args.measure.into())
        .build(&mut sampler)?;

    let mut table = args.table.writer(stdout);
    table
        .write_header::<GeometricGraph>()
        .map_err(CliError::Write)?;
    table.write_row(&graph).map_err(CliError::Write)?;
    table.flush().map_err(CliError::Write)?;

    let exact = graph.exact_properties();
    info!(
        edges = exact.edge_count,
        connected = exact.is_connected,
        components = exact.component_count,
        "graph completed"
    );
    Ok(ExecutionSummary {
        command: "graph",
        rows: 1,
        output: None,
    })
}

#[instrument(name = "cli.create_output", err, fields(path = field::Empty))]
pub(super) fn create_output(path: &Path) -> Result<File, CliError> {
    Span::current().record("path", field::display(path.display()));
    File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}
