//! Benchmark support crate for rgg.
//!
//! Provides deterministic point clouds and parameter types used by the
//! Criterion benchmarks for graph construction and trial sweeps.

pub mod error;
pub mod fixtures;
pub mod params;
