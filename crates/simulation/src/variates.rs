//! Seeded random variates.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random variate source owned by one replication.
///
/// Every draw in a replication comes from this single stream, so a fixed
/// seed reproduces the whole run.
#[derive(Debug, Clone)]
pub struct VariateSource {
    rng: ChaCha8Rng,
    seed: u64,
}

impl VariateSource {
    /// Create a source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw on [0, 1).
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Exponential draw with the given mean, by inversion: `-mean * ln(1 - U)`.
    pub fn exponential(&mut self, mean: f64) -> f64 {
        -mean * (1.0 - self.uniform()).ln()
    }

    /// `true` with probability `p`.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.uniform() < p
    }
}
