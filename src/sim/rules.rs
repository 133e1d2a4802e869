//! Randomized rule generation and particle placement

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particle::ParticleSet;
use super::rng::RandomSource;
use super::types::ParticleTypeTable;
use crate::consts::DIAMETER;
use crate::hsv_to_rgb;

/// Parameters that fully determine a rule family (together with the engine seed)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleParams {
    pub attract_mean: f32,
    pub attract_std: f32,
    pub min_r_lower: f32,
    pub min_r_upper: f32,
    pub max_r_lower: f32,
    pub max_r_upper: f32,
    /// Velocity damping per step, in [0, 1)
    pub friction: f32,
    /// Constant attraction across the [minR, maxR] band instead of the triangular kernel
    pub flat_force: bool,
}

impl RuleParams {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        attract_mean: f32,
        attract_std: f32,
        min_r_lower: f32,
        min_r_upper: f32,
        max_r_lower: f32,
        max_r_upper: f32,
        friction: f32,
        flat_force: bool,
    ) -> Self {
        Self {
            attract_mean,
            attract_std,
            min_r_lower,
            min_r_upper,
            max_r_lower,
            max_r_upper,
            friction,
            flat_force,
        }
    }
}

/// Fill the type table with random rules.
///
/// Pairs are visited in row-major order and each visit mirrors its radii
/// onto (j, i), so the later visit of a pair wins and the radius matrices
/// end up symmetric. Attraction is drawn independently per ordered pair.
pub fn randomize_types(types: &mut ParticleTypeTable, params: &RuleParams, rng: &mut dyn RandomSource) {
    let n = types.size();

    for i in 0..n {
        let value = 0.5 + 0.5 * (i % 2) as f32;
        types.set_color(i, hsv_to_rgb(i as f32 / n as f32, 1.0, value));

        for j in 0..n {
            if i == j {
                let attract = -rng.normal(params.attract_mean, params.attract_std).abs();
                types.set_attract(i, j, attract);
                types.set_min_r(i, j, DIAMETER);
            } else {
                types.set_attract(i, j, rng.normal(params.attract_mean, params.attract_std));
                let min_r = rng.uniform(params.min_r_lower, params.min_r_upper).max(DIAMETER);
                types.set_min_r(i, j, min_r);
            }

            let max_r = rng
                .uniform(params.max_r_lower, params.max_r_upper)
                .max(types.min_r(i, j));
            types.set_max_r(i, j, max_r);

            // Keep radii symmetric
            types.set_max_r(j, i, types.max_r(i, j));
            types.set_min_r(j, i, types.min_r(i, j));
        }
    }

    log::debug!(
        "Generated rules for {} types (attract {:+.3} ± {:.3}, minR {}..{}, maxR {}..{})",
        n,
        params.attract_mean,
        params.attract_std,
        params.min_r_lower,
        params.min_r_upper,
        params.max_r_lower,
        params.max_r_upper
    );
}

/// Scatter particles over the central half of the world with small random velocities.
///
/// Types come from rounding a continuous draw over `[0, num_types - 1]`, so
/// the first and last type are picked about half as often as the others.
pub fn randomize_particles(
    particles: &mut ParticleSet,
    num_types: usize,
    world: Vec2,
    rng: &mut dyn RandomSource,
) {
    let max_kind = num_types.saturating_sub(1) as f32;

    for p in particles.iter_mut() {
        p.kind = (rng.uniform(0.0, max_kind).round() as usize).min(num_types.saturating_sub(1));
        p.pos.x = (rng.uniform(0.0, 1.0) * 0.5 + 0.25) * world.x;
        p.pos.y = (rng.uniform(0.0, 1.0) * 0.5 + 0.25) * world.y;
        p.vel.x = rng.normal(0.0, 1.0) * 0.2;
        p.vel.y = rng.normal(0.0, 1.0) * 0.2;
    }
}
