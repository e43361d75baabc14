//! Exact and approximate property sets of a geometric graph.

use crate::{
    combinatorics::{binomial_distribution, poisson_distribution},
    measure::MeasureModel,
    point::Point,
};

use super::traversal;

/// Running totals gathered while forming edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct EdgeFormation {
    pub(super) edge_count: usize,
    pub(super) degree_sum: usize,
    pub(super) surely_disconnected: bool,
}

/// Properties obtained by inspecting and traversing a realised graph.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ExactProperties {
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Degree sum divided by the number of points.
    pub average_degree: f64,
    /// Fraction of possible edges that are present.
    pub density: f64,
    /// Whether every point is reachable from every other point.
    pub is_connected: bool,
    /// Number of connected components.
    pub component_count: usize,
    /// Twice the sum of finite hop distances over unordered pairs divided by
    /// `n·(n−1)`.
    pub average_path_length: f64,
    /// Connected neighbour pairs summed over all points, divided by `n`.
    pub grouping_factor: f64,
    /// Binomial degree distribution, one value per degree `k` in `0..n`.
    pub vertex_probability: Vec<f64>,
    /// Closed-form degree variance `p·(1 − xi²)·(n − 1)`, where `p` is the
    /// raw edge measure of the graph's [`MeasureModel`]. The `(1 − xi²)`
    /// factor comes from the planar model and is applied unchanged in every
    /// dimension, so under [`MeasureModel::Ball`] with `d ≠ 2` only `p`
    /// follows the d-ball volume.
    pub degree_variance: f64,
    /// Mean squared deviation of the normalised degree from its mean.
    pub normalized_degree_variance: f64,
    /// Mean of the per-degree differences between the exact and approximate
    /// distributions.
    pub average_vertex_probability: f64,
    /// Variance of the same per-degree differences.
    pub vertex_probability_variance: f64,
}

impl ExactProperties {
    pub(super) fn compute(
        points: &[Point],
        formation: EdgeFormation,
        xi: f64,
        edge_measure: f64,
        approximate: &ApproximateProperties,
    ) -> Self {
        let n = points.len();
        let n_f = n as f64;
        let pairs = n * (n - 1) / 2;

        let average_degree = formation.degree_sum as f64 / n_f;
        let density = 2.0 * formation.edge_count as f64 / (n_f * (n_f - 1.0));
        let vertex_probability = binomial_distribution(n - 1, edge_measure.min(1.0));
        let degree_variance = edge_measure * (1.0 - xi * xi) * (n_f - 1.0);

        let is_connected = traversal::is_connected(
            points,
            formation.surely_disconnected,
            formation.edge_count == pairs,
        );
        let component_count = if is_connected {
            1
        } else {
            traversal::count_components(points)
        };

        let mean_normalized = average_degree / (n_f - 1.0);
        let normalized_degree_variance = points
            .iter()
            .map(|point| {
                let deviation = point.degree() as f64 / (n_f - 1.0) - mean_normalized;
                deviation * deviation
            })
            .sum::<f64>()
            / n_f;

        let differences: Vec<f64> = vertex_probability
            .iter()
            .zip(&approximate.vertex_probability)
            .map(|(exact, approx)| exact - approx)
            .collect();
        let (average_vertex_probability, vertex_probability_variance) =
            mean_and_variance(&differences);

        Self {
            edge_count: formation.edge_count,
            average_degree,
            density,
            is_connected,
            component_count,
            average_path_length: traversal::average_path_length(points),
            grouping_factor: traversal::grouping_factor(points),
            vertex_probability,
            degree_variance,
            normalized_degree_variance,
            average_vertex_probability,
            vertex_probability_variance,
        }
    }
}

/// Properties predicted by closed-form formulas of the model; independent of
/// the realised positions.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ApproximateProperties {
    /// `(n−1)·p`.
    pub expected_value_of_degree: f64,
    /// `p·n·(n−1)/2`.
    pub expected_value_of_edge_count: f64,
    /// `p`.
    pub average_density: f64,
    /// Poisson degree distribution with mean `(n−1)·p`, one value per degree
    /// `k` in `0..n`.
    pub vertex_probability: Vec<f64>,
}

impl ApproximateProperties {
    /// Evaluates the closed-form estimates for `vertex_count` points in
    /// `dimensions` dimensions with threshold `xi`.
    ///
    /// # Examples
    /// ```
    /// use rgg_core::{ApproximateProperties, MeasureModel};
    ///
    /// let approx = ApproximateProperties::compute(5, 0.0, 2, MeasureModel::Ball);
    /// assert_eq!(approx.expected_value_of_edge_count, 0.0);
    /// assert_eq!(approx.vertex_probability, vec![1.0, 0.0, 0.0, 0.0, 0.0]);
    /// ```
    #[must_use]
    pub fn compute(vertex_count: usize, xi: f64, dimensions: usize, model: MeasureModel) -> Self {
        let measure = model.edge_measure(dimensions, xi);
        let n = vertex_count as f64;
        let lambda = (n - 1.0) * measure;
        Self {
            expected_value_of_degree: lambda,
            expected_value_of_edge_count: measure * n * (n - 1.0) / 2.0,
            average_density: measure,
            vertex_probability: poisson_distribution(lambda, vertex_count),
        }
    }
}

fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|value| {
            let deviation = value - mean;
            deviation * deviation
        })
        .sum::<f64>()
        / count;
    (mean, variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(&[1.0, 1.0, 1.0], 1.0, 0.0)]
    #[case(&[1.0, 3.0], 2.0, 1.0)]
    #[case(&[], 0.0, 0.0)]
    fn mean_and_variance_uses_population_variance(
        #[case] values: &[f64],
        #[case] mean: f64,
        #[case] variance: f64,
    ) {
        assert_eq!(mean_and_variance(values), (mean, variance));
    }

    #[test]
    fn approximate_properties_follow_planar_formulas() {
        let xi = 0.1_f64;
        let approx = ApproximateProperties::compute(11, xi, 2, MeasureModel::Planar);
        let p = std::f64::consts::PI * xi * xi;
        assert!((approx.expected_value_of_degree - 10.0 * p).abs() < 1e-12);
        assert!((approx.expected_value_of_edge_count - p * 55.0).abs() < 1e-12);
        assert_eq!(approx.average_density, p);
        assert_eq!(approx.vertex_probability.len(), 11);
    }
}
