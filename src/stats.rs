//! Online mean/std accumulator shared by every statistical field in the core.
//!
//! Exponential-moving-average form: new samples are weighted by `alpha`
//! against prior state, so old observations fade instead of accumulating.
//! The variance estimate is approximate (biased): the diff is taken against
//! the mean from before the update.

use serde::{Deserialize, Serialize};

/// EMA mean/standard-deviation pair with a fixed learning rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaStats {
    alpha: f64,
    mean: f64,
    std: f64,
    seeded: bool,
}

impl EmaStats {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            mean: 0.0,
            std: 0.0,
            seeded: false,
        }
    }

    /// Fold one sample into the running statistics. The first sample sets
    /// the mean exactly with zero std; later samples blend by `alpha`.
    pub fn update(&mut self, sample: f64) {
        if !self.seeded {
            self.mean = sample;
            self.std = 0.0;
            self.seeded = true;
            return;
        }
        let old_mean = self.mean;
        // mean' = alpha * sample + (1 - alpha) * mean, in delta form so a
        // sample equal to the current mean leaves it bit-exact (and a
        // constant input stream keeps std at exactly zero).
        self.mean += self.alpha * (sample - old_mean);
        let diff = sample - old_mean;
        self.std = (self.alpha * diff * diff + (1.0 - self.alpha) * self.std * self.std).sqrt();
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }
}
