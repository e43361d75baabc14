//! Benchmark setup error type.
//!
//! Setup code propagates failures with `?` and the bench entry point turns
//! them into a single panic message.

use rgg_core::GraphError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Graph construction or sweep configuration failed.
    #[error("graph setup failed: {0}")]
    Graph(#[from] GraphError),
    /// A zero value was passed where a positive count was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
}
