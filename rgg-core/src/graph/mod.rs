//! Random geometric graph construction.
//!
//! A [`GeometricGraph`] is built in one step: points are sampled (or supplied),
//! every unordered pair within the threshold becomes an edge, and the exact and
//! approximate property sets are computed. The graph is immutable afterwards.

mod properties;
mod traversal;

use tracing::{debug, instrument};

use crate::{
    error::{GraphError, Result},
    measure::MeasureModel,
    point::Point,
    sampler::{PositionSampler, SamplingRange},
};

pub use self::properties::{ApproximateProperties, ExactProperties};
use self::properties::EdgeFormation;

/// Default dimensionality of sampled points.
pub const DEFAULT_DIMENSIONS: usize = 2;

/// Configures and constructs [`GeometricGraph`] instances.
///
/// # Examples
/// ```
/// use rgg_core::{GeometricGraphBuilder, MeasureModel, PositionSampler, SamplingRange};
///
/// let mut sampler = PositionSampler::seeded(9);
/// let graph = GeometricGraphBuilder::new(20, 0.3)
///     .with_dimensions(3)
///     .with_range(SamplingRange::new(0.0, 2.0)?)
///     .with_measure_model(MeasureModel::Planar)
///     .build(&mut sampler)?;
/// assert_eq!(graph.vertex_count(), 20);
/// assert_eq!(graph.dimensions(), 3);
/// # Ok::<(), rgg_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GeometricGraphBuilder {
    vertex_count: usize,
    xi: f64,
    dimensions: usize,
    range: SamplingRange,
    measure_model: MeasureModel,
}

impl GeometricGraphBuilder {
    /// Creates a builder for `vertex_count` points joined within `xi`, in the
    /// unit square with the default measure model.
    #[must_use]
    pub fn new(vertex_count: usize, xi: f64) -> Self {
        Self {
            vertex_count,
            xi,
            dimensions: DEFAULT_DIMENSIONS,
            range: SamplingRange::UNIT,
            measure_model: MeasureModel::default(),
        }
    }

    /// Overrides the number of coordinates per point.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Overrides the interval every coordinate is drawn from.
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

    /// Validates the configuration, samples the points and builds the graph.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidVertexCount`] for fewer than two points,
    /// [`GraphError::ZeroDimension`] for zero dimensions and
    /// [`GraphError::InvalidThreshold`] for a negative or non-finite `xi`.
    pub fn build(self, sampler: &mut PositionSampler) -> Result<GeometricGraph> {
        validate_vertex_count(self.vertex_count)?;
        validate_threshold(self.xi)?;
        if self.dimensions == 0 {
            return Err(GraphError::ZeroDimension);
        }
        let points = (0..self.vertex_count)
            .map(|_| Point::sample(self.dimensions, self.range, sampler))
            .collect::<Result<Vec<_>>>()?;
        GeometricGraph::assemble(points, self.xi, Some(self.range), self.measure_model)
    }
}

/// A random geometric graph together with its exact and approximate
/// properties.
///
/// # Examples
/// ```
/// use rgg_core::{GeometricGraph, PositionSampler};
///
/// let mut sampler = PositionSampler::seeded(1);
/// let complete = GeometricGraph::new(4, 2.0, 2, &mut sampler)?;
/// let exact = complete.exact_properties();
/// assert_eq!(exact.edge_count, 6);
/// assert_eq!(exact.density, 1.0);
/// assert!(exact.is_connected);
/// # Ok::<(), rgg_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GeometricGraph {
    xi: f64,
    dimensions: usize,
    range: Option<SamplingRange>,
    measure_model: MeasureModel,
    points: Vec<Point>,
    exact: ExactProperties,
    approximate: ApproximateProperties,
}

impl GeometricGraph {
    /// Samples `vertex_count` points in the unit hypercube of `dimensions`
    /// dimensions and joins every pair within `xi`.
    ///
    /// # Errors
    /// See [`GeometricGraphBuilder::build`].
    pub fn new(
        vertex_count: usize,
        xi: f64,
        dimensions: usize,
        sampler: &mut PositionSampler,
    ) -> Result<Self> {
        GeometricGraphBuilder::new(vertex_count, xi)
            .with_dimensions(dimensions)
            .build(sampler)
    }

    /// Like [`GeometricGraph::new`] but draws coordinates from `range`.
    ///
    /// # Errors
    /// See [`GeometricGraphBuilder::build`].
    pub fn with_range(
        vertex_count: usize,
        xi: f64,
        dimensions: usize,
        range: SamplingRange,
        sampler: &mut PositionSampler,
    ) -> Result<Self> {
        GeometricGraphBuilder::new(vertex_count, xi)
            .with_dimensions(dimensions)
            .with_range(range)
            .build(sampler)
    }

    /// Builds a graph over explicit points. Any neighbours already recorded
    /// on the points are discarded. The points were not sampled, so
    /// [`GeometricGraph::range`] reports `None`.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidVertexCount`] for fewer than two points,
    /// [`GraphError::InvalidThreshold`] for a negative or non-finite `xi` and
    /// [`GraphError::DimensionMismatch`] when the points disagree on their
    /// dimension.
    pub fn from_points(points: Vec<Point>, xi: f64, measure_model: MeasureModel) -> Result<Self> {
        validate_vertex_count(points.len())?;
        validate_threshold(xi)?;
        let dimensions = points[0].dimensions();
        if let Some(other) = points.iter().find(|point| point.dimensions() != dimensions) {
            return Err(GraphError::DimensionMismatch {
                left: dimensions,
                right: other.dimensions(),
            });
        }
        let points = points
            .into_iter()
            .map(|point| Point::from_coordinates(point.coordinates().to_vec()))
            .collect::<Result<Vec<_>>>()?;
        Self::assemble(points, xi, None, measure_model)
    }

    #[instrument(
        name = "core.graph.build",
        skip(points, range, measure_model),
        fields(
            vertices = points.len(),
            dimensions = points[0].dimensions(),
            model = measure_model.as_str()
        ),
    )]
    fn assemble(
        mut points: Vec<Point>,
        xi: f64,
        range: Option<SamplingRange>,
        measure_model: MeasureModel,
    ) -> Result<Self> {
        let dimensions = points[0].dimensions();
        let formation = form_edges(&mut points, xi);
        debug!(
            edges = formation.edge_count,
            surely_disconnected = formation.surely_disconnected,
            "edge formation completed"
        );

        #[cfg(feature = "metrics")]
        {
            metrics::counter!("graphs_built").increment(1);
            metrics::counter!("edges_formed").increment(formation.edge_count as u64);
        }

        let edge_measure = measure_model.edge_measure(dimensions, xi);
        let approximate =
            ApproximateProperties::compute(points.len(), xi, dimensions, measure_model);
        let exact = ExactProperties::compute(&points, formation, xi, edge_measure, &approximate);

        Ok(Self {
            xi,
            dimensions,
            range,
            measure_model,
            points,
            exact,
            approximate,
        })
    }

    /// Number of points.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Edge threshold.
    #[must_use]
    #[rustfmt::skip]
    pub fn xi(&self) -> f64 { self.xi }

    /// Number of coordinates per point.
    #[must_use]
    #[rustfmt::skip]
    pub fn dimensions(&self) -> usize { self.dimensions }

    /// Interval the coordinates were drawn from; `None` for graphs built
    /// from explicit points.
    #[must_use]
    #[rustfmt::skip]
    pub fn range(&self) -> Option<SamplingRange> { self.range }

    /// Edge-probability model used by the property estimates.
    #[must_use]
    #[rustfmt::skip]
    pub fn measure_model(&self) -> MeasureModel { self.measure_model }

    /// All points in index order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The point at `index`, if any.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Iterates over every edge once as `(i, j)` with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.points.iter().enumerate().flat_map(|(i, point)| {
            point
                .neighbours()
                .iter()
                .copied()
                .filter(move |&j| j > i)
                .map(move |j| (i, j))
        })
    }

    /// Properties measured on this realisation.
    #[must_use]
    pub fn exact_properties(&self) -> &ExactProperties {
        &self.exact
    }

    /// Properties predicted by the model for this configuration.
    #[must_use]
    pub fn approximate_properties(&self) -> &ApproximateProperties {
        &self.approximate
    }

    /// Breadth-first hop counts from `root` to every point; `None` marks
    /// unreachable points.
    ///
    /// # Errors
    /// Returns [`GraphError::PointOutOfBounds`] when `root` is not a point of
    /// the graph.
    pub fn shortest_path_lengths(&self, root: usize) -> Result<Vec<Option<usize>>> {
        if root >= self.points.len() {
            return Err(GraphError::PointOutOfBounds {
                index: root,
                len: self.points.len(),
            });
        }
        Ok(traversal::hop_distances(&self.points, root))
    }
}

fn form_edges(points: &mut [Point], xi: f64) -> EdgeFormation {
    let mut formation = EdgeFormation::default();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if points[i].distance_unchecked(&points[j]) <= xi {
                points[i].add_neighbour(j);
                points[j].add_neighbour(i);
                formation.degree_sum += 2;
                formation.edge_count += 1;
            }
        }
    }
    formation.surely_disconnected = points.iter().any(|point| point.degree() == 0);
    formation
}

fn validate_vertex_count(vertex_count: usize) -> Result<()> {
    if vertex_count < 2 {
        return Err(GraphError::InvalidVertexCount { got: vertex_count });
    }
    Ok(())
}

fn validate_threshold(xi: f64) -> Result<()> {
    if !xi.is_finite() || xi < 0.0 {
        return Err(GraphError::InvalidThreshold { xi });
    }
    Ok(())
}
