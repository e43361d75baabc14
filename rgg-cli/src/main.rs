//! CLI entry point for random geometric graph sweeps.
//!
//! Parses arguments with clap, runs the command against a buffered stdout and
//! maps failures to a non-zero exit code. Logging is initialised first so
//! every step emits structured diagnostics on stderr.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use rgg_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field, info};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let summary = run_cli(cli, &mut writer).context("failed to execute command")?;
    writer.flush().context("failed to flush output")?;
    info!(
        command = summary.command,
        rows = summary.rows,
        output = summary.output.as_ref().map(|path| field::display(path.display())),
        "command finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err.downcast_ref::<CliError>().and_then(|cli_error| match cli_error {
            CliError::Core(core) => Some(core.code()),
            _ => None,
        });

        error!(
            error = %err,
            code = code.map(|code| field::display(code.as_str())),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
