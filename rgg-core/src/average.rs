//! Cross-trial averaging of graph properties.

use tracing::{debug, instrument};

use crate::{
    error::{GraphError, Result},
    graph::{ApproximateProperties, GeometricGraph},
    measure::MeasureModel,
};

/// Unweighted means of the exact properties of several trials sharing one
/// `(n, xi, d)` configuration, plus the approximate properties they share.
///
/// # Examples
/// ```
/// use rgg_core::{AverageProperties, GeometricGraph, PositionSampler};
///
/// let mut sampler = PositionSampler::seeded(4);
/// let trials = (0..5)
///     .map(|_| GeometricGraph::new(10, 0.3, 2, &mut sampler))
///     .collect::<Result<Vec<_>, _>>()?;
/// let average = AverageProperties::from_trials(&trials)?;
/// assert_eq!(average.trials, 5);
/// assert!((0.0..=1.0).contains(&average.connected_probability));
/// # Ok::<(), rgg_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct AverageProperties {
    /// Number of coordinates per point.
    pub dimensions: usize,
    /// Number of points per trial.
    pub vertex_count: usize,
    /// Edge threshold shared by every trial.
    pub xi: f64,
    /// Edge-probability model shared by every trial.
    pub measure_model: MeasureModel,
    /// Number of averaged trials.
    pub trials: usize,
    /// Fraction of trials that were connected.
    pub connected_probability: f64,
    /// Mean edge count.
    pub edge_count: f64,
    /// Mean average degree.
    pub average_degree: f64,
    /// Mean density.
    pub density: f64,
    /// Mean average path length.
    pub average_path_length: f64,
    /// Mean grouping factor.
    pub grouping_factor: f64,
    /// Mean closed-form degree variance.
    pub degree_variance: f64,
    /// Mean normalised degree variance.
    pub normalized_degree_variance: f64,
    /// Mean of the average exact-minus-approximate probability difference.
    pub average_vertex_probability: f64,
    /// Mean of the probability difference variance.
    pub vertex_probability_variance: f64,
    /// Mean number of connected components.
    pub component_count: f64,
    /// Approximate properties of the shared configuration.
    pub approximate: ApproximateProperties,
}

impl AverageProperties {
    /// Averages the properties of `graphs`.
    ///
    /// # Errors
    /// Returns [`GraphError::EmptyTrialSet`] when `graphs` is empty and
    /// [`GraphError::MismatchedTrial`] when any graph differs from the first
    /// in vertex count, threshold, dimension or measure model.
    #[instrument(name = "core.average", skip(graphs), fields(trials = graphs.len()))]
    pub fn from_trials(graphs: &[GeometricGraph]) -> Result<Self> {
        let first = graphs.first().ok_or(GraphError::EmptyTrialSet)?;
        for (index, graph) in graphs.iter().enumerate().skip(1) {
            ensure_same_configuration(first, graph, index)?;
        }

        let mut average = Self {
            dimensions: first.dimensions(),
            vertex_count: first.vertex_count(),
            xi: first.xi(),
            measure_model: first.measure_model(),
            trials: graphs.len(),
            connected_probability: 0.0,
            edge_count: 0.0,
            average_degree: 0.0,
            density: 0.0,
            average_path_length: 0.0,
            grouping_factor: 0.0,
            degree_variance: 0.0,
            normalized_degree_variance: 0.0,
            average_vertex_probability: 0.0,
            vertex_probability_variance: 0.0,
            component_count: 0.0,
            approximate: first.approximate_properties().clone(),
        };

        // Running means stay exact when every trial reports the same value.
        for (seen, graph) in graphs.iter().enumerate() {
            let weight = 1.0 / (seen + 1) as f64;
            let exact = graph.exact_properties();
            let connected = if exact.is_connected { 1.0 } else { 0.0 };
            accumulate(&mut average.connected_probability, connected, weight);
            accumulate(&mut average.edge_count, exact.edge_count as f64, weight);
            accumulate(&mut average.average_degree, exact.average_degree, weight);
            accumulate(&mut average.density, exact.density, weight);
            accumulate(&mut average.average_path_length, exact.average_path_length, weight);
            accumulate(&mut average.grouping_factor, exact.grouping_factor, weight);
            accumulate(&mut average.degree_variance, exact.degree_variance, weight);
            accumulate(
                &mut average.normalized_degree_variance,
                exact.normalized_degree_variance,
                weight,
            );
            accumulate(
                &mut average.average_vertex_probability,
                exact.average_vertex_probability,
                weight,
            );
            accumulate(
                &mut average.vertex_probability_variance,
                exact.vertex_probability_variance,
                weight,
            );
            accumulate(&mut average.component_count, exact.component_count as f64, weight);
        }

        debug!(
            vertices = average.vertex_count,
            xi = average.xi,
            connected_probability = average.connected_probability,
            "trials averaged"
        );
        Ok(average)
    }
}

fn accumulate(mean: &mut f64, value: f64, weight: f64) {
    *mean += (value - *mean) * weight;
}

fn ensure_same_configuration(
    first: &GeometricGraph,
    graph: &GeometricGraph,
    index: usize,
) -> Result<()> {
    let parameter = if graph.vertex_count() != first.vertex_count() {
        "vertex_count"
    } else if graph.xi().to_bits() != first.xi().to_bits() {
        "xi"
    } else if graph.dimensions() != first.dimensions() {
        "dimensions"
    } else if graph.measure_model() != first.measure_model() {
        "measure_model"
    } else {
        return Ok(());
    };
    Err(GraphError::MismatchedTrial { index, parameter })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::sampler::PositionSampler;

    fn graph(vertices: usize, xi: f64, dimensions: usize, seed: u64) -> GeometricGraph {
        let mut sampler = PositionSampler::seeded(seed);
        GeometricGraph::new(vertices, xi, dimensions, &mut sampler).expect("valid graph")
    }

    #[test]
    fn rejects_empty_trial_sets() {
        assert_eq!(
            AverageProperties::from_trials(&[]),
            Err(GraphError::EmptyTrialSet)
        );
    }

    #[rstest]
    #[case(graph(6, 0.2, 2, 2), "vertex_count")]
    #[case(graph(5, 0.3, 2, 2), "xi")]
    #[case(graph(5, 0.2, 3, 2), "dimensions")]
    fn rejects_mismatched_trials(
        #[case] odd_one_out: GeometricGraph,
        #[case] parameter: &'static str,
    ) {
        let trials = vec![graph(5, 0.2, 2, 1), graph(5, 0.2, 2, 3), odd_one_out];
        let err = AverageProperties::from_trials(&trials).expect_err("configurations differ");
        assert_eq!(err, GraphError::MismatchedTrial { index: 2, parameter });
    }

    #[test]
    fn connected_probability_is_fraction_of_connected_trials() {
        let connected = graph(4, 2.0, 2, 1);
        let disconnected = graph(4, 0.0, 2, 2);
        let average =
            AverageProperties::from_trials(&[connected.clone(), disconnected, connected])
                .expect("homogeneous trials");
        assert!((average.connected_probability - 2.0 / 3.0).abs() < 1e-12);
        assert!((average.edge_count - 4.0).abs() < 1e-12);
    }
}
