//! Edge-probability model shared by the exact and approximate estimates.

use std::f64::consts::PI;

use crate::combinatorics::ball_volume;

/// Formula giving the probability that two uniformly placed points lie within
/// `xi` of each other, ignoring boundary effects.
///
/// # Examples
/// ```
/// use rgg_core::MeasureModel;
///
/// let xi = 0.1;
/// let planar = MeasureModel::Planar.edge_measure(3, xi);
/// let ball = MeasureModel::Ball.edge_measure(3, xi);
/// assert!((planar - std::f64::consts::PI * xi * xi).abs() < 1e-15);
/// assert!(ball < planar);
/// assert_eq!(MeasureModel::Ball.edge_measure(2, xi), MeasureModel::Planar.edge_measure(2, xi));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum MeasureModel {
    /// Volume of the `d`-ball of radius `xi`.
    #[default]
    Ball,
    /// Area of the disk of radius `xi` regardless of dimension. Reproduces the
    /// historical output of the planar model.
    Planar,
}

impl MeasureModel {
    /// Raw measure of the neighbourhood of a point. May exceed one for large
    /// thresholds; callers clamp it where a probability is required.
    #[must_use]
    pub fn edge_measure(self, dimensions: usize, xi: f64) -> f64 {
        match self {
            Self::Ball if dimensions == 2 => PI * xi * xi,
            Self::Ball => ball_volume(dimensions, xi),
            Self::Planar => PI * xi * xi,
        }
    }

    /// Stable lowercase name used in logs and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ball => "ball",
            Self::Planar => "planar",
        }
    }
}
