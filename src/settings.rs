//! Presets and run settings
//!
//! Settings are stored as JSON. Every field has a default, so a settings
//! file only needs the values it changes.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::{EngineKind, RuleParams, Universe};

/// Named rule families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    Balanced,
    #[default]
    Chaos,
    Diversity,
    Frictionless,
    Gliders,
    Homogeneity,
    LargeClusters,
    MediumClusters,
    Quiescence,
    SmallClusters,
}

impl Preset {
    pub const ALL: [Preset; 10] = [
        Preset::Balanced,
        Preset::Chaos,
        Preset::Diversity,
        Preset::Frictionless,
        Preset::Gliders,
        Preset::Homogeneity,
        Preset::LargeClusters,
        Preset::MediumClusters,
        Preset::Quiescence,
        Preset::SmallClusters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Balanced => "Balanced",
            Preset::Chaos => "Chaos",
            Preset::Diversity => "Diversity",
            Preset::Frictionless => "Frictionless",
            Preset::Gliders => "Gliders",
            Preset::Homogeneity => "Homogeneity",
            Preset::LargeClusters => "Large Clusters",
            Preset::MediumClusters => "Medium Clusters",
            Preset::Quiescence => "Quiescence",
            Preset::SmallClusters => "Small Clusters",
        }
    }

    /// Case-insensitive; spaces, hyphens and underscores are ignored
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL.into_iter().find(|p| {
            p.as_str()
                .chars()
                .filter(|c| *c != ' ')
                .flat_map(char::to_lowercase)
                .eq(key.chars())
        })
    }

    /// (number of types, number of particles)
    pub fn population(&self) -> (usize, usize) {
        match self {
            Preset::Balanced => (9, 400),
            Preset::Chaos => (6, 400),
            Preset::Diversity => (12, 400),
            Preset::Frictionless => (6, 300),
            Preset::Gliders => (6, 400),
            Preset::Homogeneity => (4, 400),
            Preset::LargeClusters => (6, 400),
            Preset::MediumClusters => (6, 400),
            Preset::Quiescence => (6, 300),
            Preset::SmallClusters => (6, 600),
        }
    }

    pub fn rules(&self) -> RuleParams {
        match self {
            Preset::Balanced => RuleParams::new(-0.02, 0.06, 0.0, 20.0, 20.0, 70.0, 0.05, false),
            Preset::Chaos => RuleParams::new(0.02, 0.04, 0.0, 30.0, 30.0, 100.0, 0.01, false),
            Preset::Diversity => RuleParams::new(-0.01, 0.04, 0.0, 20.0, 10.0, 60.0, 0.05, true),
            Preset::Frictionless => RuleParams::new(0.01, 0.005, 10.0, 10.0, 10.0, 60.0, 0.0, true),
            Preset::Gliders => RuleParams::new(0.0, 0.06, 0.0, 20.0, 10.0, 50.0, 0.1, true),
            Preset::Homogeneity => RuleParams::new(0.0, 0.04, 10.0, 10.0, 10.0, 80.0, 0.05, true),
            Preset::LargeClusters => RuleParams::new(0.025, 0.02, 0.0, 30.0, 30.0, 100.0, 0.2, false),
            Preset::MediumClusters => RuleParams::new(0.02, 0.05, 0.0, 20.0, 20.0, 50.0, 0.05, false),
            Preset::Quiescence => RuleParams::new(-0.02, 0.1, 10.0, 20.0, 20.0, 60.0, 0.2, false),
            Preset::SmallClusters => RuleParams::new(-0.005, 0.01, 10.0, 10.0, 20.0, 50.0, 0.01, false),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to read or write a settings file
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rule family to start from
    pub preset: Preset,
    /// Overrides the preset's type count
    pub num_types: Option<usize>,
    /// Overrides the preset's particle count
    pub num_particles: Option<usize>,
    /// Overrides the preset's rule parameters
    pub rules: Option<RuleParams>,

    // === World ===
    pub width: f32,
    pub height: f32,
    /// Toroidal boundaries instead of reflecting walls
    pub wrap: bool,

    // === Randomness ===
    pub engine: EngineKind,
    /// Seed for the seeded engine (random when absent)
    pub seed: Option<u64>,

    // === Rendering ===
    /// Sub-steps composited per frame (1..=10)
    pub steps_per_frame: u32,
    /// Frames to run in headless mode
    pub frames: u32,
    pub cam_x: f32,
    pub cam_y: f32,
    pub cam_zoom: f32,
    /// Write the final frame here as a PPM image
    pub snapshot: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: Preset::Chaos,
            num_types: None,
            num_particles: None,
            rules: None,

            width: 1280.0,
            height: 720.0,
            wrap: false,

            engine: EngineKind::Seeded,
            seed: None,

            steps_per_frame: 1,
            frames: 600,
            cam_x: 640.0,
            cam_y: 360.0,
            cam_zoom: 1.0,
            snapshot: None,
        }
    }
}

impl Settings {
    /// Settings for a preset with everything else at defaults
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Switch preset, dropping any overrides
    pub fn apply_preset(&mut self, preset: Preset) {
        self.preset = preset;
        self.num_types = None;
        self.num_particles = None;
        self.rules = None;
    }

    /// Effective (types, particles)
    pub fn population(&self) -> (usize, usize) {
        let (types, particles) = self.preset.population();
        (self.num_types.unwrap_or(types), self.num_particles.unwrap_or(particles))
    }

    /// Effective rule parameters
    pub fn rule_params(&self) -> RuleParams {
        self.rules.unwrap_or_else(|| self.preset.rules())
    }

    /// Sub-steps clamped to the supported range
    pub fn effective_steps_per_frame(&self) -> u32 {
        self.steps_per_frame
            .clamp(1, crate::renderer::MAX_STEPS_PER_FRAME)
    }

    /// Build and seed a universe from these settings
    pub fn build_universe(&self) -> Universe {
        let (num_types, num_particles) = self.population();
        let seed = self.seed.unwrap_or_else(rand::random);

        let mut universe = match self.engine {
            EngineKind::Seeded => Universe::with_seed(num_types, num_particles, self.width, self.height, seed),
            EngineKind::Entropy => Universe::with_source(
                num_types,
                num_particles,
                self.width,
                self.height,
                self.engine.build(seed),
            ),
        };
        universe.set_wrap(self.wrap);
        universe.set_zoom(self.cam_x, self.cam_y, self.cam_zoom);
        log::info!("Preset: {}", self.preset);
        universe.re_seed(self.rule_params());
        universe
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
