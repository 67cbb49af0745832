//! Configuration types for experiments.

use crate::ConfigError;
use forecourt_simulation::StationConfig;
use forecourt_types::SimTime;

/// Configuration for one experiment: R replications of duration D.
#[derive(Clone, Debug)]
pub struct ExperimentConfig {
    /// Number of independent replications.
    pub replications: usize,

    /// Simulated length of each replication.
    pub duration: SimTime,

    /// Base seed; each replication derives its own from it.
    pub seed: u64,

    /// Station parameters shared by every replication.
    pub station: StationConfig,

    /// Run replications across the rayon thread pool.
    pub parallel: bool,
}

impl ExperimentConfig {
    /// Create a new experiment configuration.
    pub fn new(replications: usize, duration: SimTime) -> Self {
        Self {
            replications,
            duration,
            seed: 12345,
            station: StationConfig::default(),
            parallel: true,
        }
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the station parameters.
    pub fn with_station(mut self, station: StationConfig) -> Self {
        self.station = station;
        self
    }

    /// Run replications one after another on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Seed of replication `index`.
    ///
    /// Depends only on the base seed and the index, so results do not
    /// depend on which thread runs which replication.
    pub fn replication_seed(&self, index: usize) -> u64 {
        self.seed
            .wrapping_add(index as u64)
            .wrapping_mul(0x517cc1b727220a95)
    }

    /// Check the experiment can run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration.is_valid_duration() {
            return Err(ConfigError::InvalidDuration(self.duration.minutes()));
        }
        self.station.validate()?;
        Ok(())
    }
}

/// A grid of experiments sharing station parameters and base seed.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentPlan {
    /// Replication counts, outer loop.
    pub replications: Vec<usize>,

    /// Durations, inner loop.
    pub durations: Vec<SimTime>,
}

impl ExperimentPlan {
    /// The classic table: {1, 10, 100, 300} replications of
    /// {1, 10, 30, 365} days.
    pub fn standard() -> Self {
        Self {
            replications: vec![1, 10, 100, 300],
            durations: [1.0, 10.0, 30.0, 365.0]
                .into_iter()
                .map(SimTime::from_days)
                .collect(),
        }
    }

    /// A plan with a single experiment.
    pub fn single(replications: usize, duration: SimTime) -> Self {
        Self {
            replications: vec![replications],
            durations: vec![duration],
        }
    }

    /// Number of experiments in the plan.
    pub fn len(&self) -> usize {
        self.replications.len() * self.durations.len()
    }

    /// Whether the plan has no experiments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand the plan into experiment configs, replications outermost.
    pub fn experiments(
        &self,
        template: &ExperimentConfig,
    ) -> Result<Vec<ExperimentConfig>, ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::EmptyPlan);
        }

        let experiments: Vec<ExperimentConfig> = self
            .replications
            .iter()
            .flat_map(|&replications| {
                self.durations.iter().map(move |&duration| ExperimentConfig {
                    replications,
                    duration,
                    ..template.clone()
                })
            })
            .collect();

        for experiment in &experiments {
            experiment.validate()?;
        }
        Ok(experiments)
    }
}
