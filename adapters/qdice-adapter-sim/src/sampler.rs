//! Sources of measurement randomness.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws one outcome index from a discrete probability distribution.
pub trait Sampler: Send + Sync {
    /// Draw a value uniformly from `[0, 1)`.
    fn draw(&self) -> f64;

    /// Pick an outcome index by inverse-CDF lookup of one draw.
    fn sample(&self, probabilities: &[f64]) -> usize {
        inverse_cdf(probabilities, self.draw())
    }
}

/// Index of the first outcome whose cumulative probability exceeds `r`.
///
/// Outcomes with zero probability are never returned unless every outcome
/// has zero probability.
pub(crate) fn inverse_cdf(probabilities: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return i;
        }
    }
    // Rounding left the total just below `r`.
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(0)
}

/// OS-seeded thread-local RNG. Used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSampler;

impl Sampler for ThreadRngSampler {
    fn draw(&self) -> f64 {
        rand::thread_rng().r#gen()
    }
}

/// Reproducible RNG seeded from a fixed value.
#[derive(Debug)]
pub struct SeededSampler {
    rng: Mutex<StdRng>,
}

impl SeededSampler {
    /// Create a sampler from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Sampler for SeededSampler {
    fn draw(&self) -> f64 {
        self.rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .r#gen()
    }
}

/// Always draws the same quantile.
///
/// With a single qubit in state `a|0> + b|1>`, a quantile `q` yields 0 when
/// `q < |a|^2` and 1 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct QuantileSampler(f64);

impl QuantileSampler {
    /// Create a sampler fixed at `quantile`, clamped into `[0, 1)`.
    pub fn new(quantile: f64) -> Self {
        let q = if quantile.is_nan() { 0.0 } else { quantile };
        Self(q.clamp(0.0, 1.0 - f64::EPSILON))
    }
}

impl Sampler for QuantileSampler {
    fn draw(&self) -> f64 {
        self.0
    }
}
