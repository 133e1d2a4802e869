//! Particle Life - a 2D attraction/repulsion particle simulation
//!
//! Core modules:
//! - `sim`: Simulation engine (type rules, particles, force law, integration)
//! - `camera`: View center/zoom, screen-to-world mapping and picking
//! - `renderer`: Drawing surface contract and a software canvas
//! - `settings`: Preset catalog and run configuration

pub mod camera;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use camera::Camera;
pub use settings::{Preset, Settings, SettingsError};
pub use sim::{ParticleSet, ParticleTypeTable, RandomSource, RuleParams, Universe};

use serde::{Deserialize, Serialize};

/// Simulation constants
pub mod consts {
    /// Particle display radius
    pub const RADIUS: f32 = 5.0;
    /// Two touching radii. Minimum inner interaction radius and wall margin.
    pub const DIAMETER: f32 = 2.0 * RADIUS;
    /// Shapes the close-range repulsion term
    pub const R_SMOOTH: f32 = 2.0;
    /// World-space pick radius for `Universe::get_index`
    pub const PICK_RADIUS: f32 = RADIUS;
    /// Pairs closer than this (squared) are skipped to avoid dividing by ~0
    pub const NEAR_COINCIDENT_R2: f32 = 0.01;
}

/// RGBA color with float channels in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Convert HSV (all components in [0, 1]) to an opaque RGB color
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color {
    let h = h.rem_euclid(1.0) * 6.0;
    let h = if h >= 6.0 { 0.0 } else { h };
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Color::new(r, g, b, 1.0)
}
