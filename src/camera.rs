//! View camera over the simulation world
//!
//! Display only: nothing here feeds back into the physics.

use glam::Vec2;

/// Center and zoom of the view. The viewport is the size of the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Vec2,
    pub zoom: f32,
}

impl Camera {
    /// Unzoomed camera centered on the world
    pub fn new(world: Vec2) -> Self {
        Self {
            center: world * 0.5,
            zoom: 1.0,
        }
    }

    /// Set center and zoom (at least 1), then pull the center in so the
    /// viewport stays inside the world
    pub fn set_zoom(&mut self, center: Vec2, zoom: f32, world: Vec2) {
        self.zoom = zoom.max(1.0);
        let half_view = world * (0.5 / self.zoom);
        self.center = center.clamp(half_view, world - half_view);
    }

    /// Screen coordinate to world coordinate
    #[inline]
    pub fn to_world(&self, screen: Vec2, world: Vec2) -> Vec2 {
        self.center + (screen - world * 0.5) / self.zoom
    }

    /// World coordinate to screen coordinate
    #[inline]
    pub fn to_screen(&self, pos: Vec2, world: Vec2) -> Vec2 {
        (pos - self.center) * self.zoom + world * 0.5
    }

    /// Keep the current view valid after the world is resized
    pub fn refit(&mut self, world: Vec2) {
        self.set_zoom(self.center, self.zoom, world);
    }
}

/// Index of the first point (storage order, not nearest) within `radius` of `target`
pub fn first_within<I>(points: I, target: Vec2, radius: f32) -> Option<usize>
where
    I: IntoIterator<Item = Vec2>,
{
    let r2 = radius * radius;
    points
        .into_iter()
        .position(|p| p.distance_squared(target) < r2)
}
