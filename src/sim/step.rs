//! Per-step force accumulation and integration
//!
//! A step is two passes. The force pass reads only positions and types and
//! adds into velocities; the integration pass then moves every particle.
//! Positions must not change until the force pass has visited every pair.

use glam::Vec2;

use super::particle::ParticleSet;
use super::types::ParticleTypeTable;
use crate::consts::{DIAMETER, NEAR_COINCIDENT_R2, R_SMOOTH};

/// Signed force magnitude between two particles at distance `r`.
///
/// The result scales the unit vector from `p` toward `q`: positive pulls `p`
/// in, negative pushes it away. Inside `min_r` it is never positive, growing
/// in magnitude as `r` shrinks and reaching zero at `min_r`.
#[inline]
pub fn pair_force(r: f32, min_r: f32, max_r: f32, attract: f32, flat_force: bool) -> f32 {
    if r > min_r {
        let band = max_r - min_r;
        // A zero-width band has no peak to shape; use the flat value.
        if flat_force || band <= 0.0 {
            attract
        } else {
            let numer = 2.0 * (r - 0.5 * (max_r + min_r)).abs();
            attract * (1.0 - numer / band)
        }
    } else {
        R_SMOOTH * min_r * (1.0 / (min_r + R_SMOOTH) - 1.0 / (r + R_SMOOTH))
    }
}

/// Shortest displacement on a torus of the given size
#[inline]
pub fn wrapped_delta(mut d: Vec2, world: Vec2) -> Vec2 {
    if d.x > world.x * 0.5 {
        d.x -= world.x;
    } else if d.x < -world.x * 0.5 {
        d.x += world.x;
    }
    if d.y > world.y * 0.5 {
        d.y -= world.y;
    } else if d.y < -world.y * 0.5 {
        d.y += world.y;
    }
    d
}

/// Force pass: add every in-range neighbour's pull to each particle's velocity
pub fn accumulate_forces(
    particles: &mut ParticleSet,
    types: &ParticleTypeTable,
    world: Vec2,
    wrap: bool,
    flat_force: bool,
) {
    for i in 0..particles.len() {
        let p = particles[i];
        let mut dv = Vec2::ZERO;

        for q in particles.iter() {
            let mut d = q.pos - p.pos;
            if wrap {
                d = wrapped_delta(d, world);
            }

            let r2 = d.length_squared();
            let min_r = types.min_r(p.kind, q.kind);
            let max_r = types.max_r(p.kind, q.kind);
            if r2 > max_r * max_r || r2 < NEAR_COINCIDENT_R2 {
                continue;
            }

            let r = r2.sqrt();
            let dir = d / r;
            let f = pair_force(r, min_r, max_r, types.attract(p.kind, q.kind), flat_force);
            dv += dir * f;
        }

        particles[i].vel += dv;
    }
}

#[inline]
fn wrap_coord(x: f32, dim: f32) -> f32 {
    let mut x = x;
    if x < 0.0 {
        x += dim;
    } else if x >= dim {
        x -= dim;
    }
    // Anything faster than one world per step needs a full reduction
    if !(0.0..dim).contains(&x) && x.is_finite() {
        x = x.rem_euclid(dim);
        if x >= dim {
            x = 0.0;
        }
    }
    x
}

#[inline]
fn reflect_coord(x: &mut f32, v: &mut f32, dim: f32) {
    if *x < DIAMETER {
        *v = -*v;
        *x = DIAMETER;
    } else if *x >= dim - DIAMETER {
        *v = -*v;
        *x = dim - DIAMETER;
    }
}

/// Integration pass: move, damp, then apply the boundary policy
pub fn integrate(particles: &mut ParticleSet, world: Vec2, wrap: bool, friction: f32) {
    let damping = 1.0 - friction;

    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.vel *= damping;

        if wrap {
            p.pos.x = wrap_coord(p.pos.x, world.x);
            p.pos.y = wrap_coord(p.pos.y, world.y);
        } else {
            reflect_coord(&mut p.pos.x, &mut p.vel.x, world.x);
            reflect_coord(&mut p.pos.y, &mut p.vel.y, world.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::particle::Particle;

    fn two_body(a: Vec2, b: Vec2, min_r: f32, max_r: f32, attract: f32) -> (ParticleSet, ParticleTypeTable) {
        let mut types = ParticleTypeTable::new(1);
        types.set_attract(0, 0, attract);
        types.set_min_r(0, 0, min_r);
        types.set_max_r(0, 0, max_r);

        let mut particles = ParticleSet::new(2);
        particles[0] = Particle::new(a, Vec2::ZERO, 0);
        particles[1] = Particle::new(b, Vec2::ZERO, 0);
        (particles, types)
    }

    #[test]
    fn test_triangular_kernel_peaks_at_midpoint() {
        let peak = pair_force(30.0, 20.0, 40.0, 1.0, false);
        assert!((peak - 1.0).abs() < 1e-6);
        assert!(pair_force(40.0, 20.0, 40.0, 1.0, false).abs() < 1e-6);
        assert!((pair_force(25.0, 20.0, 40.0, 1.0, false) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_flat_force_is_constant() {
        for r in [21.0, 30.0, 39.0] {
            assert_eq!(pair_force(r, 20.0, 40.0, -0.3, true), -0.3);
        }
    }

    #[test]
    fn test_inner_zone_repels() {
        let f = pair_force(5.0, 10.0, 40.0, 0.5, false);
        assert!(f < 0.0);
        assert!(pair_force(1.0, 10.0, 40.0, 0.5, false) < f);
        assert!(pair_force(10.0, 10.0, 40.0, 0.0, false).abs() < 1e-6);
    }

    #[test]
    fn test_zero_width_band_is_finite() {
        let f = pair_force(10.5, 10.0, 10.0, 0.7, false);
        assert_eq!(f, 0.7);
    }

    #[test]
    fn test_wrapped_delta_takes_short_way() {
        let world = Vec2::new(100.0, 50.0);
        let d = wrapped_delta(Vec2::new(90.0, -40.0), world);
        assert_eq!(d, Vec2::new(-10.0, 10.0));
        let d = wrapped_delta(Vec2::new(10.0, 5.0), world);
        assert_eq!(d, Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_out_of_range_pair_has_no_effect() {
        let (mut particles, types) = two_body(Vec2::new(100.0, 100.0), Vec2::new(125.0, 100.0), 10.0, 20.0, 1.0);
        accumulate_forces(&mut particles, &types, Vec2::splat(500.0), false, false);
        assert_eq!(particles[0].vel, Vec2::ZERO);
        assert_eq!(particles[1].vel, Vec2::ZERO);
    }

    #[test]
    fn test_coincident_pair_is_skipped() {
        let (mut particles, types) = two_body(Vec2::new(50.0, 50.0), Vec2::new(50.05, 50.0), 10.0, 40.0, 1.0);
        accumulate_forces(&mut particles, &types, Vec2::splat(500.0), false, false);
        assert_eq!(particles[0].vel, Vec2::ZERO);
        assert!(particles[1].vel.is_finite());
    }

    #[test]
    fn test_close_pair_repels() {
        let (mut particles, types) = two_body(Vec2::new(100.0, 100.0), Vec2::new(105.0, 100.0), 10.0, 40.0, -0.5);
        accumulate_forces(&mut particles, &types, Vec2::splat(500.0), false, false);
        assert!(particles[0].vel.x < 0.0);
        assert!(particles[1].vel.x > 0.0);
        assert!((particles[0].vel.x + particles[1].vel.x).abs() < 1e-6);
    }

    #[test]
    fn test_force_across_wrap_seam() {
        let (mut particles, types) = two_body(Vec2::new(2.0, 50.0), Vec2::new(98.0, 50.0), 10.0, 40.0, -0.5);
        accumulate_forces(&mut particles, &types, Vec2::splat(100.0), true, false);
        // 4 units apart across the seam: particle 0 is pushed toward +x
        assert!(particles[0].vel.x > 0.0);
        assert!(particles[1].vel.x < 0.0);
    }

    #[test]
    fn test_integrate_applies_friction() {
        let mut particles = ParticleSet::new(1);
        particles[0] = Particle::new(Vec2::new(50.0, 50.0), Vec2::new(2.0, -1.0), 0);
        integrate(&mut particles, Vec2::splat(100.0), false, 0.25);
        assert_eq!(particles[0].pos, Vec2::new(52.0, 49.0));
        assert_eq!(particles[0].vel, Vec2::new(1.5, -0.75));
    }

    #[test]
    fn test_integrate_reflects_at_walls() {
        let mut particles = ParticleSet::new(2);
        particles[0] = Particle::new(Vec2::new(11.0, 50.0), Vec2::new(-5.0, 0.0), 0);
        particles[1] = Particle::new(Vec2::new(50.0, 88.0), Vec2::new(0.0, 5.0), 0);
        integrate(&mut particles, Vec2::splat(100.0), false, 0.0);

        assert_eq!(particles[0].pos.x, DIAMETER);
        assert_eq!(particles[0].vel.x, 5.0);
        assert_eq!(particles[1].pos.y, 100.0 - DIAMETER);
        assert_eq!(particles[1].vel.y, -5.0);
    }

    #[test]
    fn test_integrate_wraps_around() {
        let mut particles = ParticleSet::new(2);
        particles[0] = Particle::new(Vec2::new(1.0, 50.0), Vec2::new(-3.0, 0.0), 0);
        particles[1] = Particle::new(Vec2::new(50.0, 99.0), Vec2::new(0.0, 2.0), 0);
        integrate(&mut particles, Vec2::splat(100.0), true, 0.0);

        assert_eq!(particles[0].pos.x, 98.0);
        assert_eq!(particles[1].pos.y, 1.0);
    }

    #[test]
    fn test_wrap_handles_large_jumps() {
        assert_eq!(wrap_coord(250.0, 100.0), 50.0);
        assert_eq!(wrap_coord(-150.0, 100.0), 50.0);
        let tiny = wrap_coord(-1e-9, 100.0);
        assert!((0.0..100.0).contains(&tiny));
    }
}
