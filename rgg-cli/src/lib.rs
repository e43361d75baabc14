//! Support library for the `rgg` binary.
//!
//! Exposes the CLI and logging modules so doctests and integration tests can
//! drive commands without spawning a subprocess.

pub mod cli;
pub mod logging;
