//! Error types for the RGG core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Error type produced when building graphs, averaging trials or running sweeps.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// A graph needs at least two vertices for degree and density to be defined.
    #[error("vertex count must be at least 2 (got {got})")]
    InvalidVertexCount {
        /// The vertex count supplied by the caller.
        got: usize,
    },
    /// Points must live in at least one dimension.
    #[error("points must have positive dimension")]
    ZeroDimension,
    /// The edge threshold must be finite and non-negative.
    #[error("edge threshold must be finite and non-negative (got {xi})")]
    InvalidThreshold {
        /// The rejected threshold.
        xi: f64,
    },
    /// The sampling range was empty, inverted or non-finite.
    #[error("sampling range [{min}, {max}) is invalid")]
    InvalidRange {
        /// Lower bound of the rejected range.
        min: f64,
        /// Upper bound of the rejected range.
        max: f64,
    },
    /// A coordinate was NaN or infinite.
    #[error("coordinate on axis {axis} is not finite")]
    NonFiniteCoordinate {
        /// Axis holding the offending value.
        axis: usize,
    },
    /// Two points had different dimensions.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand point.
        left: usize,
        /// Dimensionality of the right-hand point.
        right: usize,
    },
    /// A point index was outside the graph.
    #[error("point {index} is out of bounds for a graph of {len} points")]
    PointOutOfBounds {
        /// The requested point.
        index: usize,
        /// Number of points in the graph.
        len: usize,
    },
    /// Averaging was requested over no trials.
    #[error("cannot average an empty set of trials")]
    EmptyTrialSet,
    /// A trial did not share the configuration of the first trial.
    #[error("trial {index} differs from the first trial in `{parameter}`")]
    MismatchedTrial {
        /// Position of the offending trial.
        index: usize,
        /// Name of the parameter that differed.
        parameter: &'static str,
    },
    /// A sweep grid parameter was invalid.
    #[error("invalid sweep configuration: {reason}")]
    InvalidSweep {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// The requested execution mode is not compiled into this build.
    #[error("parallel execution is not available in this build")]
    BackendUnavailable,
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A graph needs at least two vertices.
        InvalidVertexCount => InvalidVertexCount { .. } => "RGG_INVALID_VERTEX_COUNT",
        /// Points must live in at least one dimension.
        ZeroDimension => ZeroDimension => "RGG_ZERO_DIMENSION",
        /// The edge threshold must be finite and non-negative.
        InvalidThreshold => InvalidThreshold { .. } => "RGG_INVALID_THRESHOLD",
        /// The sampling range was invalid.
        InvalidRange => InvalidRange { .. } => "RGG_INVALID_RANGE",
        /// A coordinate was NaN or infinite.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "RGG_NON_FINITE_COORDINATE",
        /// Two points had different dimensions.
        DimensionMismatch => DimensionMismatch { .. } => "RGG_DIMENSION_MISMATCH",
        /// A point index was outside the graph.
        PointOutOfBounds => PointOutOfBounds { .. } => "RGG_POINT_OUT_OF_BOUNDS",
        /// Averaging was requested over no trials.
        EmptyTrialSet => EmptyTrialSet => "RGG_EMPTY_TRIAL_SET",
        /// A trial did not share the configuration of the first trial.
        MismatchedTrial => MismatchedTrial { .. } => "RGG_MISMATCHED_TRIAL",
        /// A sweep grid parameter was invalid.
        InvalidSweep => InvalidSweep { .. } => "RGG_INVALID_SWEEP",
        /// The requested execution mode is not compiled into this build.
        BackendUnavailable => BackendUnavailable => "RGG_BACKEND_UNAVAILABLE",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
