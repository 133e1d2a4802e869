//! Particle-life simulation engine
//!
//! Single-threaded and brute force: every step visits all ordered pairs.
//! - Seeded RNG by default, swappable at runtime
//! - Stable iteration order (storage index)
//! - No rendering or platform dependencies beyond the `Surface` trait

pub mod particle;
pub mod rng;
pub mod rules;
pub mod step;
pub mod types;
pub mod universe;

pub use particle::{Particle, ParticleSet};
pub use rng::{EngineKind, EntropySource, RandomSource, RngSource, SeededSource};
pub use rules::{RuleParams, randomize_particles, randomize_types};
pub use step::{accumulate_forces, integrate, pair_force, wrapped_delta};
pub use types::ParticleTypeTable;
pub use universe::Universe;
