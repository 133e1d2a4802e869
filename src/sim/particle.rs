//! Particles and the resizable particle buffer

use glam::Vec2;

/// A point particle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Index into the type table, in `[0, num_types)`
    pub kind: usize,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, kind: usize) -> Self {
        Self { pos, vel, kind }
    }
}

/// Contiguous, index-addressed particle storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn new(len: usize) -> Self {
        Self {
            particles: vec![Particle::default(); len],
        }
    }

    /// Grow with default particles or truncate, keeping the existing prefix
    pub fn resize(&mut self, len: usize) {
        self.particles.resize(len, Particle::default());
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }
}

impl std::ops::Index<usize> for ParticleSet {
    type Output = Particle;

    fn index(&self, index: usize) -> &Particle {
        &self.particles[index]
    }
}

impl std::ops::IndexMut<usize> for ParticleSet {
    fn index_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
