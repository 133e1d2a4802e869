//! The universe: owns the type rules, the particles and the random engine

use glam::Vec2;

use super::particle::{Particle, ParticleSet};
use super::rng::{RandomSource, SeededSource};
use super::rules::{RuleParams, randomize_particles, randomize_types};
use super::step::{accumulate_forces, integrate};
use super::types::ParticleTypeTable;
use crate::camera::{Camera, first_within};
use crate::consts::{PICK_RADIUS, RADIUS};
use crate::renderer::Surface;

/// A 2D particle-life world
pub struct Universe {
    types: ParticleTypeTable,
    particles: ParticleSet,
    rng: Box<dyn RandomSource>,
    /// Seed of the engine installed at construction, if it was seeded
    seed: Option<u64>,
    world: Vec2,
    camera: Camera,
    params: RuleParams,
    wrap: bool,
}

impl std::fmt::Debug for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Universe")
            .field("types", &self.types.size())
            .field("particles", &self.particles.len())
            .field("seed", &self.seed)
            .field("world", &self.world)
            .field("camera", &self.camera)
            .field("params", &self.params)
            .field("wrap", &self.wrap)
            .finish()
    }
}

impl Universe {
    /// Create a universe with a freshly seeded deterministic engine.
    /// The seed is logged and available from `seed()`.
    pub fn new(num_types: usize, num_particles: usize, width: f32, height: f32) -> Self {
        Self::with_seed(num_types, num_particles, width, height, rand::random())
    }

    pub fn with_seed(num_types: usize, num_particles: usize, width: f32, height: f32, seed: u64) -> Self {
        log::info!("Universe seed: {}", seed);
        let mut universe = Self::with_source(
            num_types,
            num_particles,
            width,
            height,
            Box::new(SeededSource::new(seed)),
        );
        universe.seed = Some(seed);
        universe
    }

    /// Create a universe drawing from the given engine
    pub fn with_source(
        num_types: usize,
        num_particles: usize,
        width: f32,
        height: f32,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let world = Vec2::new(width, height);
        let mut universe = Self {
            types: ParticleTypeTable::default(),
            particles: ParticleSet::default(),
            rng,
            seed: None,
            world,
            camera: Camera::new(world),
            params: RuleParams::default(),
            wrap: false,
        };
        universe.set_population(num_types, num_particles);
        universe
    }

    /// Resize the type table and particle set in place, keeping existing prefixes.
    ///
    /// When the type count shrinks, particles of a removed type are moved to
    /// the last remaining type so `step` and `draw` stay in bounds.
    pub fn set_population(&mut self, num_types: usize, num_particles: usize) {
        let num_types = if num_types == 0 {
            log::warn!("A universe needs at least one particle type, using 1");
            1
        } else {
            num_types
        };
        self.types.resize(num_types);
        self.particles.resize(num_particles);

        let last = num_types - 1;
        for p in self.particles.iter_mut() {
            p.kind = p.kind.min(last);
        }
    }

    /// Change the world size. The camera is refitted to the new bounds.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.world = Vec2::new(width, height);
        self.camera.refit(self.world);
    }

    /// Store new rule parameters, then regenerate rules and particles
    pub fn re_seed(&mut self, params: RuleParams) {
        if params.min_r_lower > params.min_r_upper || params.max_r_lower > params.max_r_upper {
            log::warn!("Inverted radius range in {:?}", params);
        }
        self.params = params;
        self.set_random_types();
        self.set_random_particles();
        log::info!(
            "Re-seeded {} types / {} particles (friction {}, flat force {})",
            self.types.size(),
            self.particles.len(),
            params.friction,
            params.flat_force
        );
        self.log_params();
    }

    /// Regenerate the type rules from the current parameters
    pub fn set_random_types(&mut self) {
        randomize_types(&mut self.types, &self.params, self.rng.as_mut());
    }

    /// Regenerate particle types, positions and velocities without touching rules
    pub fn set_random_particles(&mut self) {
        randomize_particles(&mut self.particles, self.types.size(), self.world, self.rng.as_mut());
    }

    /// Swap the random engine. Only future draws change.
    pub fn set_random_source(&mut self, rng: Box<dyn RandomSource>) {
        self.rng = rng;
        self.seed = None;
    }

    /// Advance one step: forces for every pair first, then integration
    pub fn step(&mut self) {
        accumulate_forces(
            &mut self.particles,
            &self.types,
            self.world,
            self.wrap,
            self.params.flat_force,
        );
        integrate(&mut self.particles, self.world, self.wrap, self.params.friction);
    }

    /// Draw every particle through the camera at the given opacity
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, opacity: f32) {
        let radius = RADIUS * self.camera.zoom;
        for p in &self.particles {
            let center = self.camera.to_screen(p.pos, self.world);
            let color = self.types.color(p.kind).with_alpha(opacity);
            surface.fill_circle(center, radius, color);
        }
    }

    /// First particle (storage order) within the pick radius of a screen point
    pub fn get_index(&self, screen_x: f32, screen_y: f32) -> Option<usize> {
        let target = self.to_center(screen_x, screen_y);
        first_within(self.particles.iter().map(|p| p.pos), target, PICK_RADIUS)
    }

    pub fn particle_x(&self, index: usize) -> f32 {
        self.particles[index].pos.x
    }

    pub fn particle_y(&self, index: usize) -> f32 {
        self.particles[index].pos.y
    }

    /// Screen point to world point under the current camera
    pub fn to_center(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        self.camera.to_world(Vec2::new(screen_x, screen_y), self.world)
    }

    pub fn set_zoom(&mut self, cx: f32, cy: f32, zoom: f32) {
        self.camera.set_zoom(Vec2::new(cx, cy), zoom, self.world);
    }

    /// Dump the rule matrices at debug level
    pub fn log_params(&self) {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Type rules:\n{}", self.types);
        }
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    pub fn params(&self) -> &RuleParams {
        &self.params
    }

    /// Seed of the engine, if the current one was installed with a known seed
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn width(&self) -> f32 {
        self.world.x
    }

    pub fn height(&self) -> f32 {
        self.world.y
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn types(&self) -> &ParticleTypeTable {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut ParticleTypeTable {
        &mut self.types
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// Replace one particle
    pub fn set_particle(&mut self, index: usize, particle: Particle) {
        self.particles[index] = particle;
    }

    pub fn num_types(&self) -> usize {
        self.types.size()
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }
}
