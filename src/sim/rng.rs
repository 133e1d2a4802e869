//! Random sample sources
//!
//! The universe draws every sample through the `RandomSource` trait so the
//! engine can be swapped at runtime without touching any other state.

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Uniform and normal sample capability
pub trait RandomSource {
    /// Uniform sample in [0, 1)
    fn unit(&mut self) -> f32;

    /// Sample from N(0, 1)
    fn standard_normal(&mut self) -> f32;

    /// Uniform sample between `lo` and `hi`. Inverted bounds are accepted.
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.unit()
    }

    /// Sample from N(mean, std²). A negative `std` mirrors the distribution.
    fn normal(&mut self, mean: f32, std: f32) -> f32 {
        mean + std * self.standard_normal()
    }
}

/// Adapts any `rand` engine to `RandomSource`
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn standard_normal(&mut self) -> f32 {
        self.rng.sample(StandardNormal)
    }
}

/// Deterministic engine, reproducible from its seed
pub type SeededSource = RngSource<Pcg32>;

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(Pcg32::seed_from_u64(seed))
    }
}

/// OS-reseeded cryptographic engine; not reproducible
pub type EntropySource = RngSource<ThreadRng>;

impl EntropySource {
    pub fn from_entropy() -> Self {
        Self::from_rng(rand::rng())
    }
}

/// Engine selection for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Seeded,
    Entropy,
}

impl EngineKind {
    /// Build a boxed source; `seed` is only used by the seeded engine
    pub fn build(self, seed: u64) -> Box<dyn RandomSource> {
        match self {
            EngineKind::Seeded => Box::new(SeededSource::new(seed)),
            EngineKind::Entropy => Box::new(EntropySource::from_entropy()),
        }
    }
}
