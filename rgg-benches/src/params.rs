//! Benchmark parameter types.
//!
//! Each type renders as a compact Criterion parameter label.

use std::fmt;

/// Parameters for a single-graph construction run.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of points.
    pub vertex_count: usize,
    /// Edge threshold.
    pub xi: f64,
    /// Coordinates per point.
    pub dimensions: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},xi={},d={}",
            self.vertex_count, self.xi, self.dimensions
        )
    }
}

/// Parameters for a batch of trials at one grid point.
#[derive(Clone, Copy, Debug)]
pub struct TrialBenchParams {
    /// Number of points per trial.
    pub vertex_count: usize,
    /// Number of trials realised per iteration.
    pub trials: usize,
}

impl fmt::Display for TrialBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},trials={}", self.vertex_count, self.trials)
    }
}
