//! Helpers shared by the `rgg-core` integration suites.

use proptest::test_runner::Config as ProptestConfig;
use rgg_core::{GeometricGraph, MeasureModel, Point};
use rgg_test_support::ci::property_test_profile::ProptestRunProfile;

/// Proptest configuration honouring `PROGTEST_CASES` and `RGG_PBT_FORK`.
#[must_use]
pub fn proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph over one-dimensional points at the given positions.
#[must_use]
pub fn line_graph(positions: &[f64], xi: f64) -> GeometricGraph {
    let points = positions
        .iter()
        .map(|&x| Point::from_coordinates(vec![x]).expect("finite coordinate"))
        .collect();
    GeometricGraph::from_points(points, xi, MeasureModel::Ball).expect("valid graph")
}
