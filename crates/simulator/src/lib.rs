//! Forecourt Simulator
//!
//! Experiment driver built on top of the station simulation.
//!
//! # Architecture
//!
//! The simulator builds on `forecourt-simulation` to provide:
//!
//! - **Experiments**: R replications of duration D with a base seed
//! - **Replication Driver**: fresh engine per replication, optionally on the rayon pool
//! - **Aggregation**: per-metric mean and population standard deviation
//! - **Reports**: CSV and JSON tables, console summary
//!
//! # Example
//!
//! ```ignore
//! use forecourt_simulator::{run_experiment, ExperimentConfig, ReportWriter};
//! use forecourt_types::SimTime;
//!
//! let config = ExperimentConfig::new(100, SimTime::from_days(1.0)).with_seed(42);
//! let result = run_experiment(&config)?;
//!
//! ReportWriter::new("out").write(&result)?;
//! result.print_summary();
//! ```

pub mod config;
pub mod error;
pub mod replication;
pub mod report;

pub use config::{ExperimentConfig, ExperimentPlan};
pub use error::{ConfigError, ReportError, SimulatorError};
pub use replication::{aggregate, run_experiment, run_plan, run_replication, ExperimentResult};
pub use report::ReportWriter;
