//! Geometric points with adjacency lists.

use crate::{
    error::{GraphError, Result},
    sampler::{PositionSampler, SamplingRange},
};

/// A vertex of a geometric graph: a fixed-dimension position plus the indices
/// of its neighbours within the owning graph.
///
/// # Examples
/// ```
/// use rgg_core::Point;
///
/// let a = Point::from_coordinates(vec![0.0, 0.0])?;
/// let b = Point::from_coordinates(vec![3.0, 4.0])?;
/// assert_eq!(a.distance_to(&b)?, 5.0);
/// assert_eq!(a.degree(), 0);
/// # Ok::<(), rgg_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    coordinates: Vec<f64>,
    neighbours: Vec<usize>,
}

impl Point {
    /// Samples a point with `dimensions` coordinates drawn from `range`.
    ///
    /// Coordinate `i` is drawn from the sampler's distribution for axis `i`.
    ///
    /// # Errors
    /// Returns [`GraphError::ZeroDimension`] when `dimensions` is zero.
    pub fn sample(
        dimensions: usize,
        range: SamplingRange,
        sampler: &mut PositionSampler,
    ) -> Result<Self> {
        if dimensions == 0 {
            return Err(GraphError::ZeroDimension);
        }
        let coordinates = (0..dimensions)
            .map(|axis| sampler.sample_in(range, axis))
            .collect();
        Ok(Self::with_coordinates(coordinates))
    }

    /// Builds a point at an explicit position.
    ///
    /// # Errors
    /// Returns [`GraphError::ZeroDimension`] for an empty coordinate vector and
    /// [`GraphError::NonFiniteCoordinate`] when a coordinate is NaN or
    /// infinite.
    pub fn from_coordinates(coordinates: Vec<f64>) -> Result<Self> {
        if coordinates.is_empty() {
            return Err(GraphError::ZeroDimension);
        }
        if let Some(axis) = coordinates.iter().position(|value| !value.is_finite()) {
            return Err(GraphError::NonFiniteCoordinate { axis });
        }
        Ok(Self::with_coordinates(coordinates))
    }

    fn with_coordinates(coordinates: Vec<f64>) -> Self {
        Self {
            coordinates,
            neighbours: Vec::new(),
        }
    }

    /// Euclidean distance to `other`.
    ///
    /// # Errors
    /// Returns [`GraphError::DimensionMismatch`] when the points have different
    /// dimensions.
    pub fn distance_to(&self, other: &Self) -> Result<f64> {
        if self.dimensions() != other.dimensions() {
            return Err(GraphError::DimensionMismatch {
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        Ok(self.distance_unchecked(other))
    }

    /// Distance for points already known to share a dimension.
    pub(crate) fn distance_unchecked(&self, other: &Self) -> f64 {
        self.coordinates
            .iter()
            .zip(&other.coordinates)
            .map(|(left, right)| {
                let diff = right - left;
                diff * diff
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Appends `index` to the neighbour list.
    ///
    /// The caller keeps adjacency symmetric by adding the reverse entry on the
    /// other point.
    pub fn add_neighbour(&mut self, index: usize) {
        self.neighbours.push(index);
    }

    /// Number of neighbours.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.neighbours.len()
    }

    /// Neighbour indices in insertion order.
    #[must_use]
    pub fn neighbours(&self) -> &[usize] {
        &self.neighbours
    }

    /// Position of the point.
    #[must_use]
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Number of coordinates.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.coordinates.len()
    }
}
