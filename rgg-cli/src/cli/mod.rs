//! Command-line interface orchestration for the `rgg` binary.
//!
//! `sweep` averages trials over a grid of vertex counts and thresholds and
//! writes one delimited row per grid point; `graph` builds a single graph and
//! writes its properties in the same column layout.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GraphArgs, MeasureArg, SweepArgs, TableArgs,
    run_cli,
};

#[cfg(test)]
mod tests;
