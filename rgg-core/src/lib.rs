//! Random geometric graph construction and analysis.
//!
//! Points are sampled uniformly in a hypercube, joined whenever their
//! Euclidean distance is within a threshold `xi`, and the resulting graph is
//! measured both exactly (by traversal) and approximately (from the
//! closed-form model). Trials can be averaged, swept over a parameter grid and
//! written out as delimited tables.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod average;
mod combinatorics;
mod error;
mod graph;
mod measure;
mod point;
mod report;
mod sampler;
mod sweep;

#[cfg(test)]
mod test_utils;

pub use crate::{
    average::AverageProperties,
    combinatorics::{
        CombinatoricsError, CombinatoricsErrorCode, ball_volume, binomial_coefficient,
        binomial_distribution, divide_by_factorial, factorial, poisson_distribution, poisson_pmf,
    },
    error::{GraphError, GraphErrorCode, Result},
    graph::{
        ApproximateProperties, DEFAULT_DIMENSIONS, ExactProperties, GeometricGraph,
        GeometricGraphBuilder,
    },
    measure::MeasureModel,
    point::Point,
    report::{DEFAULT_DELIMITER, DEFAULT_PRECISION, Report, ReportValue, TableWriter},
    sampler::{PositionSampler, SamplingRange},
    sweep::{
        Execution, GridPoint, SweepConfig, SweepConfigBuilder, ThresholdRange, VertexRange,
        collect_sweep, run_sweep, run_trials,
    },
};
