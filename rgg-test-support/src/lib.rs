//! Shared test utilities used across the rgg crates.
//!
//! [`tracing`] captures spans and events so instrumentation can be asserted,
//! and [`ci`] holds the environment-driven knobs shared by property suites.

pub mod ci;
pub mod tracing;
