//! Parameter sweeps over vertex counts and thresholds.
//!
//! A sweep visits every `(n, xi)` grid point in vertex-major order, realises
//! a fixed number of trials per point and averages them. Every trial draws
//! from its own sampler, seeded from the sweep's base seed and the trial's
//! position in the grid, so sequential and parallel runs produce identical
//! results for the same base seed.

use tracing::{Span, debug, field, info, instrument};

use crate::{
    average::AverageProperties,
    error::{GraphError, Result},
    graph::{DEFAULT_DIMENSIONS, GeometricGraph, GeometricGraphBuilder},
    measure::MeasureModel,
    sampler::{PositionSampler, SamplingRange},
};

/// How trials for a grid point are realised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Execution {
    /// One trial after another on the calling thread.
    Sequential,
    /// Trials spread across the rayon thread pool. Requires the `parallel`
    /// feature.
    Parallel,
}

impl Default for Execution {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            Self::Parallel
        } else {
            Self::Sequential
        }
    }
}

/// Inclusive range of vertex counts visited by a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexRange {
    start: usize,
    end: usize,
    step: usize,
}

impl VertexRange {
    /// Describes `start, start + step, ...` up to and including `end`. Checked
    /// by [`SweepConfigBuilder::build`].
    #[must_use]
    pub const fn new(start: usize, end: usize, step: usize) -> Self {
        Self { start, end, step }
    }

    /// The vertex counts in ascending order.
    pub fn values(&self) -> impl Iterator<Item = usize> + use<> {
        (self.start..=self.end).step_by(self.step.max(1))
    }

    fn validate(&self) -> Result<()> {
        if self.start < 2 {
            return Err(invalid(format!(
                "vertex counts must start at 2 or more (got {})",
                self.start
            )));
        }
        if self.step == 0 {
            return Err(invalid("vertex step must be positive".to_owned()));
        }
        if self.start > self.end {
            return Err(invalid(format!(
                "vertex range {}..={} is empty",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl Default for VertexRange {
    fn default() -> Self {
        Self::new(10, 100, 10)
    }
}

/// Half-open range of thresholds visited by a sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdRange {
    start: f64,
    end: f64,
    step: f64,
}

impl ThresholdRange {
    /// Describes `start + i·step` for every `i` whose value stays below
    /// `end`. Checked by [`SweepConfigBuilder::build`].
    #[must_use]
    pub const fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Number of thresholds in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        if !self.step.is_finite() || self.step <= 0.0 || !self.end.is_finite() {
            return 0;
        }
        // Values within a tiny fraction of a step below `end` count as `end`.
        let limit = self.end - self.step * 1e-9;
        if self.start.is_nan() || self.start >= limit {
            return 0;
        }
        let mut count = ((limit - self.start) / self.step).ceil() as usize;
        while count > 0 && self.start + (count - 1) as f64 * self.step >= limit {
            count -= 1;
        }
        while self.start + count as f64 * self.step < limit {
            count += 1;
        }
        count
    }

    /// Whether the range yields no thresholds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The thresholds in ascending order.
    pub fn values(&self) -> impl Iterator<Item = f64> + use<> {
        let Self { start, step, .. } = *self;
        (0..self.len()).map(move |i| start + i as f64 * step)
    }

    fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || self.start < 0.0 {
            return Err(invalid(format!(
                "thresholds must start at a finite non-negative value (got {})",
                self.start
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(invalid(format!(
                "threshold step must be finite and positive (got {})",
                self.step
            )));
        }
        if !self.end.is_finite() || self.is_empty() {
            return Err(invalid(format!(
                "threshold range {}..{} is empty",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl Default for ThresholdRange {
    fn default() -> Self {
        Self::new(0.0, 0.5, 0.05)
    }
}

fn invalid(reason: String) -> GraphError {
    GraphError::InvalidSweep { reason }
}

/// One `(n, xi)` configuration of a sweep together with its position in the
/// grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    /// Zero-based position in vertex-major order.
    pub index: usize,
    /// Number of points per trial.
    pub vertex_count: usize,
    /// Edge threshold.
    pub xi: f64,
}

/// Validated sweep configuration.
///
/// # Examples
/// ```
/// use rgg_core::{SweepConfig, ThresholdRange, VertexRange};
///
/// let config = SweepConfig::builder()
///     .with_vertices(VertexRange::new(10, 30, 10))
///     .with_thresholds(ThresholdRange::new(0.0, 0.2, 0.1))
///     .with_trials(3)
///     .with_seed(42)
///     .build()?;
/// let grid: Vec<_> = config.grid().map(|point| (point.vertex_count, point.xi)).collect();
/// assert_eq!(grid.len(), 6);
/// assert_eq!(grid[1], (10, 0.1));
/// # Ok::<(), rgg_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SweepConfig {
    vertices: VertexRange,
    thresholds: ThresholdRange,
    trials: usize,
    dimensions: usize,
    range: SamplingRange,
    measure_model: MeasureModel,
    seed: Option<u64>,
    execution: Execution,
}

impl SweepConfig {
    /// Starts from the defaults: 10 to 100 vertices in steps of 10,
    /// thresholds 0 to 0.5 in steps of 0.05, ten trials, two dimensions.
    #[must_use]
    pub fn builder() -> SweepConfigBuilder {
        SweepConfigBuilder::default()
    }

    /// Vertex counts visited.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> VertexRange { self.vertices }

    /// Thresholds visited.
    #[must_use]
    #[rustfmt::skip]
    pub fn thresholds(&self) -> ThresholdRange { self.thresholds }

    /// Trials per grid point.
    #[must_use]
    #[rustfmt::skip]
    pub fn trials(&self) -> usize { self.trials }

    /// Coordinates per point.
    #[must_use]
    #[rustfmt::skip]
    pub fn dimensions(&self) -> usize { self.dimensions }

    /// Coordinate interval.
    #[must_use]
    #[rustfmt::skip]
    pub fn range(&self) -> SamplingRange { self.range }

    /// Edge-probability model.
    #[must_use]
    #[rustfmt::skip]
    pub fn measure_model(&self) -> MeasureModel { self.measure_model }

    /// Base seed, or `None` when each run draws one from entropy.
    #[must_use]
    #[rustfmt::skip]
    pub fn seed(&self) -> Option<u64> { self.seed }

    /// How trials are realised.
    #[must_use]
    #[rustfmt::skip]
    pub fn execution(&self) -> Execution { self.execution }

    /// Grid points in vertex-major order.
    pub fn grid(&self) -> impl Iterator<Item = GridPoint> + use<> {
        let thresholds = self.thresholds;
        self.vertices
            .values()
            .flat_map(move |vertex_count| thresholds.values().map(move |xi| (vertex_count, xi)))
            .enumerate()
            .map(|(index, (vertex_count, xi))| GridPoint {
                index,
                vertex_count,
                xi,
            })
    }

    /// Number of grid points.
    #[must_use]
    pub fn grid_len(&self) -> usize {
        self.vertices.values().count() * self.thresholds.len()
    }
}

/// Configures and validates [`SweepConfig`] instances.
#[derive(Clone, Debug)]
pub struct SweepConfigBuilder {
    vertices: VertexRange,
    thresholds: ThresholdRange,
    trials: usize,
    dimensions: usize,
    range: SamplingRange,
    measure_model: MeasureModel,
    seed: Option<u64>,
    execution: Execution,
}

impl Default for SweepConfigBuilder {
    fn default() -> Self {
        Self {
            vertices: VertexRange::default(),
            thresholds: ThresholdRange::default(),
            trials: 10,
            dimensions: DEFAULT_DIMENSIONS,
            range: SamplingRange::UNIT,
            measure_model: MeasureModel::default(),
            seed: None,
            execution: Execution::default(),
        }
    }
}

impl SweepConfigBuilder {
    /// Overrides the vertex counts.
    #[must_use]
    pub fn with_vertices(mut self, vertices: VertexRange) -> Self {
        self.vertices = vertices;
        self
    }

    /// Overrides the thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ThresholdRange) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Overrides the number of trials per grid point.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Overrides the number of coordinates per point.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Overrides the coordinate interval.
    #[must_use]
    pub fn with_range(mut self, range: SamplingRange) -> Self {
        self.range = range;
        self
    }

    /// Overrides the edge-probability model.
    #[must_use]
    pub fn with_measure_model(mut self, model: MeasureModel) -> Self {
        self.measure_model = model;
        self
    }

    /// Fixes the base seed so runs are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides how trials are realised.
    #[must_use]
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidSweep`] for an empty or malformed grid or
    /// zero trials, and [`GraphError::ZeroDimension`] for zero dimensions.
    pub fn build(self) -> Result<SweepConfig> {
        self.vertices.validate()?;
        self.thresholds.validate()?;
        if self.trials == 0 {
            return Err(invalid("at least one trial per grid point is required".to_owned()));
        }
        if self.dimensions == 0 {
            return Err(GraphError::ZeroDimension);
        }
        Ok(SweepConfig {
            vertices: self.vertices,
            thresholds: self.thresholds,
            trials: self.trials,
            dimensions: self.dimensions,
            range: self.range,
            measure_model: self.measure_model,
            seed: self.seed,
            execution: self.execution,
        })
    }
}

/// Realises every trial of `point`.
///
/// Trial `t` of grid point `i` samples from
/// `PositionSampler::for_worker(base_seed, i * trials + t)`.
///
/// # Errors
/// Returns [`GraphError::BackendUnavailable`] when parallel execution is
/// requested without the `parallel` feature, and propagates graph
/// construction failures.
pub fn run_trials(
    config: &SweepConfig,
    point: GridPoint,
    base_seed: u64,
) -> Result<Vec<GeometricGraph>> {
    let build = |trial: usize| {
        let mut sampler =
            PositionSampler::for_worker(base_seed, point.index * config.trials + trial);
        GeometricGraphBuilder::new(point.vertex_count, point.xi)
            .with_dimensions(config.dimensions)
            .with_range(config.range)
            .with_measure_model(config.measure_model)
            .build(&mut sampler)
    };

    match config.execution {
        Execution::Sequential => (0..config.trials).map(build).collect(),
        #[cfg(feature = "parallel")]
        Execution::Parallel => {
            use rayon::prelude::*;
            (0..config.trials).into_par_iter().map(build).collect()
        }
        #[cfg(not(feature = "parallel"))]
        Execution::Parallel => Err(GraphError::BackendUnavailable),
    }
}

/// Runs the sweep and hands each grid point's average to `sink` in grid
/// order. Returns the number of averages emitted.
///
/// # Errors
/// Stops at the first failure from trial construction, averaging or `sink`.
///
/// # Examples
/// ```
/// use rgg_core::{GraphError, SweepConfig, ThresholdRange, VertexRange, run_sweep};
///
/// let config = SweepConfig::builder()
///     .with_vertices(VertexRange::new(5, 5, 1))
///     .with_thresholds(ThresholdRange::new(0.1, 0.3, 0.1))
///     .with_trials(2)
///     .with_seed(7)
///     .build()?;
/// let mut thresholds = Vec::new();
/// let rows = run_sweep(&config, |average| {
///     thresholds.push(average.xi);
///     Ok::<(), GraphError>(())
/// })?;
/// assert_eq!(rows, 2);
/// assert_eq!(thresholds.len(), 2);
/// # Ok::<(), GraphError>(())
/// ```
#[instrument(
    name = "core.sweep",
    skip(config, sink),
    fields(
        grid_points = config.grid_len(),
        trials = config.trials,
        base_seed = field::Empty
    ),
)]
pub fn run_sweep<F, E>(config: &SweepConfig, mut sink: F) -> core::result::Result<usize, E>
where
    F: FnMut(AverageProperties) -> core::result::Result<(), E>,
    E: From<GraphError>,
{
    let base_seed = config.seed.unwrap_or_else(rand::random);
    Span::current().record("base_seed", base_seed);
    info!(base_seed, "sweep started");

    let mut emitted = 0;
    for point in config.grid() {
        let trials = run_trials(config, point, base_seed)?;
        let average = AverageProperties::from_trials(&trials)?;
        debug!(
            index = point.index,
            vertices = point.vertex_count,
            xi = point.xi,
            connected_probability = average.connected_probability,
            "grid point averaged"
        );
        sink(average)?;
        emitted += 1;
    }

    info!(rows = emitted, "sweep finished");
    Ok(emitted)
}

/// Runs the sweep and collects every average in grid order.
///
/// # Errors
/// See [`run_sweep`].
pub fn collect_sweep(config: &SweepConfig) -> Result<Vec<AverageProperties>> {
    let mut averages = Vec::with_capacity(config.grid_len());
    run_sweep(config, |average| {
        averages.push(average);
        Ok::<(), GraphError>(())
    })?;
    Ok(averages)
}
