//! Error types for the simulation engine.

use thiserror::Error;

/// Errors raised before or instead of running a replication.
///
/// A replication that starts never fails: every stochastic input comes from
/// the engine's own generator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The run duration is negative, NaN, or infinite.
    #[error("invalid duration: {0} minutes")]
    InvalidDuration(f64),

    /// The station parameters are out of range.
    #[error("invalid station config: {0}")]
    InvalidConfig(String),

    /// `run` was called on an engine that already ran.
    #[error("simulation already ran; create a fresh engine per replication")]
    AlreadyRun,
}
