//! Drawing contract between the simulation and a 2D surface
//!
//! The universe only needs a filled circle primitive. `Canvas` is a small
//! software surface used by the headless runner.

pub mod canvas;

pub use canvas::Canvas;

use glam::Vec2;

use crate::Color;
use crate::sim::Universe;

/// A 2D target that can fill circles with an RGBA color
pub trait Surface {
    /// Fill a circle at `center` (screen space). `color.a` is the opacity.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Maximum sub-steps per frame
pub const MAX_STEPS_PER_FRAME: u32 = 10;

/// Advance `steps` sub-steps, drawing after each one.
///
/// Each sub-step is drawn at opacity `(i + 1) / steps`, so the newest state
/// is fully opaque and older ones fade out behind it.
pub fn render_frame<S: Surface + ?Sized>(universe: &mut Universe, surface: &mut S, steps: u32) {
    let steps = steps.clamp(1, MAX_STEPS_PER_FRAME);
    for i in 0..steps {
        let opacity = (i + 1) as f32 / steps as f32;
        universe.step();
        universe.draw(&mut *surface, opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Vec2, f32, Color)>,
    }

    impl Surface for Recorder {
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.calls.push((center, radius, color));
        }
    }

    #[test]
    fn test_render_frame_fades_in_substeps() {
        let mut universe = Universe::with_seed(2, 3, 200.0, 200.0, 17);
        let mut recorder = Recorder::default();
        render_frame(&mut universe, &mut recorder, 4);

        assert_eq!(recorder.calls.len(), 12);
        let alphas: Vec<f32> = recorder.calls.chunks(3).map(|c| c[0].2.a).collect();
        assert_eq!(alphas, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_render_frame_clamps_steps() {
        let mut universe = Universe::with_seed(1, 1, 200.0, 200.0, 3);
        let mut recorder = Recorder::default();
        render_frame(&mut universe, &mut recorder, 0);
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(recorder.calls[0].2.a, 1.0);
    }
}
