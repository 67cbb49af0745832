//! Replication driver.
//!
//! Runs R independent replications of one experiment and aggregates their
//! metrics. Each replication gets a fresh engine seeded from the experiment
//! seed and its index, so the table is the same whether replications run
//! sequentially or on the rayon pool.

use crate::config::{ExperimentConfig, ExperimentPlan};
use crate::SimulatorError;
use forecourt_simulation::{SimulationError, StationSimulation};
use forecourt_types::{Metric, Metrics, SimTime};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Aggregated result of one experiment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExperimentResult {
    /// Number of replications run.
    pub replications: usize,

    /// Simulated length of each replication.
    pub duration: SimTime,

    /// Base seed of the experiment.
    pub seed: u64,

    /// One metric mapping per replication, in replication order.
    pub rows: Vec<Metrics>,

    /// Per-metric arithmetic mean over the rows.
    pub average: Metrics,

    /// Per-metric population standard deviation over the rows.
    pub std_dev: Metrics,
}

impl ExperimentResult {
    /// Build a result from finished rows.
    pub fn from_rows(config: &ExperimentConfig, rows: Vec<Metrics>) -> Self {
        let (average, std_dev) = aggregate(&rows);
        Self {
            replications: config.replications,
            duration: config.duration,
            seed: config.seed,
            rows,
            average,
            std_dev,
        }
    }
}

/// Per-metric mean and population standard deviation.
///
/// With no rows both mappings are all zero.
pub fn aggregate(rows: &[Metrics]) -> (Metrics, Metrics) {
    if rows.is_empty() {
        return (Metrics::zeroed(), Metrics::zeroed());
    }
    let n = rows.len() as f64;

    let average = Metrics::from_fn(|metric| column(rows, metric).sum::<f64>() / n);
    let std_dev = Metrics::from_fn(|metric| {
        let mean = average.get(metric);
        let variance = column(rows, metric)
            .map(|x| (x - mean) * (x - mean))
            .sum::<f64>()
            / n;
        variance.sqrt()
    });
    (average, std_dev)
}

fn column(rows: &[Metrics], metric: Metric) -> impl Iterator<Item = f64> + '_ {
    rows.iter().map(move |row| row.get(metric))
}

/// Run one replication with its derived seed.
pub fn run_replication(config: &ExperimentConfig, index: usize) -> Result<Metrics, SimulationError> {
    let seed = config.replication_seed(index);
    let mut sim = StationSimulation::new(config.station.clone(), seed)?;
    let metrics = sim.run(config.duration)?;

    debug!(
        replication = index + 1,
        seed,
        events = sim.run_stats().events_processed,
        vehicles = sim.run_stats().vehicles_arrived,
        "Replication finished"
    );
    Ok(metrics)
}

/// Run every replication of an experiment and aggregate the results.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentResult, SimulatorError> {
    config.validate()?;

    info!(
        replications = config.replications,
        duration_minutes = config.duration.minutes(),
        seed = config.seed,
        parallel = config.parallel,
        "Running experiment"
    );
    let start = Instant::now();

    let rows: Vec<Metrics> = if config.parallel {
        (0..config.replications)
            .into_par_iter()
            .map(|i| run_replication(config, i))
            .collect::<Result<_, _>>()?
    } else {
        (0..config.replications)
            .map(|i| run_replication(config, i))
            .collect::<Result<_, _>>()?
    };

    let result = ExperimentResult::from_rows(config, rows);
    info!(
        replications = config.replications,
        duration_minutes = config.duration.minutes(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        pump_a_utilization = result.average.get(Metric::PumpAUtilization),
        "Experiment complete"
    );
    Ok(result)
}

/// Run every experiment of a plan, in plan order.
pub fn run_plan(
    plan: &ExperimentPlan,
    template: &ExperimentConfig,
) -> Result<Vec<ExperimentResult>, SimulatorError> {
    let experiments = plan.experiments(template)?;
    experiments.iter().map(run_experiment).collect()
}
