//! Particle Life headless runner
//!
//! Usage: `particle-life [settings.json] [preset name]`
//!
//! Runs the configured number of frames with sub-stepping into a software
//! canvas and optionally writes the last frame as a PPM image.

use std::error::Error;
use std::path::Path;
use std::time::Instant;

use particle_life::renderer::{Canvas, render_frame};
use particle_life::{Color, Preset, Settings};

const BACKGROUND: Color = Color::new(0.0, 0.0, 0.0, 1.0);

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Particle Life (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(arg) if arg.ends_with(".json") => Settings::load(Path::new(&arg))?,
        Some(arg) => {
            let preset = Preset::from_str(&arg).ok_or_else(|| format!("unknown preset: {arg}"))?;
            Settings::from_preset(preset)
        }
        None => Settings::default(),
    };
    if let Some(name) = args.next() {
        let preset = Preset::from_str(&name).ok_or_else(|| format!("unknown preset: {name}"))?;
        settings.apply_preset(preset);
    }

    let mut universe = settings.build_universe();
    let mut canvas = Canvas::new(settings.width.max(1.0) as usize, settings.height.max(1.0) as usize);
    let steps = settings.effective_steps_per_frame();

    let start = Instant::now();
    for frame in 0..settings.frames {
        canvas.clear(BACKGROUND);
        render_frame(&mut universe, &mut canvas, steps);

        if (frame + 1) % 100 == 0 {
            let kinetic: f32 = universe.particles().iter().map(|p| p.vel.length_squared()).sum();
            log::info!(
                "Frame {}: mean speed² {:.4}, {:.1} frames/s",
                frame + 1,
                kinetic / universe.num_particles().max(1) as f32,
                (frame + 1) as f64 / start.elapsed().as_secs_f64().max(1e-9)
            );
        }
    }

    if let Some(path) = &settings.snapshot {
        canvas.save_ppm(Path::new(path))?;
        log::info!("Snapshot written to {}", path);
    }

    log::info!(
        "Done: {} frames x {} steps in {:.2?} (seed {:?})",
        settings.frames,
        steps,
        start.elapsed(),
        universe.seed()
    );
    Ok(())
}
