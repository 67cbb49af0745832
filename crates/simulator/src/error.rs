//! Error types for the simulator.

use forecourt_simulation::SimulationError;
use std::path::PathBuf;
use thiserror::Error;

/// An experiment that cannot run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Replication duration is negative, NaN, or infinite.
    #[error("invalid experiment duration: {0} minutes")]
    InvalidDuration(f64),

    /// Station parameters are out of range.
    #[error(transparent)]
    Station(#[from] SimulationError),

    /// The plan expands to no experiments.
    #[error("experiment plan is empty")]
    EmptyPlan,
}

/// A report that could not be written.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure of the simulator.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
