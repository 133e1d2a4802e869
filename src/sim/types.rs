//! Per-type interaction rules
//!
//! N types give N² ordered pairs. Each pair has an attraction coefficient
//! and an inner/outer interaction radius, stored row-major by `size()`.

use std::fmt;

use crate::Color;

/// Interaction parameter matrices plus one display color per type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleTypeTable {
    colors: Vec<Color>,
    attract: Vec<f32>,
    min_r: Vec<f32>,
    max_r: Vec<f32>,
}

impl ParticleTypeTable {
    pub fn new(size: usize) -> Self {
        Self {
            colors: vec![Color::default(); size],
            attract: vec![0.0; size * size],
            min_r: vec![0.0; size * size],
            max_r: vec![0.0; size * size],
        }
    }

    /// Change the type count.
    ///
    /// Each backing buffer keeps its existing prefix and zero-fills new
    /// slots. Matrices are resized as flat buffers, so surviving entries
    /// are not re-indexed for the new row stride.
    pub fn resize(&mut self, size: usize) {
        self.colors.resize(size, Color::default());
        self.attract.resize(size * size, 0.0);
        self.min_r.resize(size * size, 0.0);
        self.max_r.resize(size * size, 0.0);
    }

    /// Number of types
    #[inline]
    pub fn size(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        i * self.colors.len() + j
    }

    #[inline]
    pub fn color(&self, i: usize) -> Color {
        self.colors[i]
    }

    #[inline]
    pub fn set_color(&mut self, i: usize, color: Color) {
        self.colors[i] = color;
    }

    #[inline]
    pub fn attract(&self, i: usize, j: usize) -> f32 {
        self.attract[self.index(i, j)]
    }

    #[inline]
    pub fn set_attract(&mut self, i: usize, j: usize, value: f32) {
        let idx = self.index(i, j);
        self.attract[idx] = value;
    }

    #[inline]
    pub fn min_r(&self, i: usize, j: usize) -> f32 {
        self.min_r[self.index(i, j)]
    }

    #[inline]
    pub fn set_min_r(&mut self, i: usize, j: usize, value: f32) {
        let idx = self.index(i, j);
        self.min_r[idx] = value;
    }

    #[inline]
    pub fn max_r(&self, i: usize, j: usize) -> f32 {
        self.max_r[self.index(i, j)]
    }

    #[inline]
    pub fn set_max_r(&mut self, i: usize, j: usize, value: f32) {
        let idx = self.index(i, j);
        self.max_r[idx] = value;
    }

    /// Flat row-major view of the attraction matrix
    pub fn attract_matrix(&self) -> &[f32] {
        &self.attract
    }

    pub fn min_r_matrix(&self) -> &[f32] {
        &self.min_r
    }

    pub fn max_r_matrix(&self) -> &[f32] {
        &self.max_r
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl fmt::Display for ParticleTypeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        let sections: [(&str, &[f32]); 3] = [
            ("Attract", &self.attract),
            ("MinR", &self.min_r),
            ("MaxR", &self.max_r),
        ];
        for (name, matrix) in sections {
            writeln!(f, "{name}:")?;
            for row in matrix.chunks(n.max(1)).take(n) {
                let cells: Vec<String> = row.iter().map(|v| format!("{v:>9.4}")).collect();
                writeln!(f, "{}", cells.join(" "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let table = ParticleTypeTable::new(3);
        assert_eq!(table.size(), 3);
        for i in 0..3 {
            assert_eq!(table.color(i), Color::default());
            for j in 0..3 {
                assert_eq!(table.attract(i, j), 0.0);
                assert_eq!(table.min_r(i, j), 0.0);
                assert_eq!(table.max_r(i, j), 0.0);
            }
        }
    }

    #[test]
    fn test_row_major_access() {
        let mut table = ParticleTypeTable::new(2);
        table.set_attract(0, 1, 0.5);
        table.set_attract(1, 0, -0.25);
        table.set_min_r(1, 1, 10.0);
        table.set_max_r(0, 1, 40.0);

        assert_eq!(table.attract_matrix(), &[0.0, 0.5, -0.25, 0.0]);
        assert_eq!(table.min_r_matrix()[3], 10.0);
        assert_eq!(table.max_r_matrix()[1], 40.0);
    }

    #[test]
    fn test_resize_grow_keeps_prefix() {
        let mut table = ParticleTypeTable::new(2);
        table.set_color(1, Color::new(1.0, 0.0, 0.0, 1.0));
        table.set_attract(1, 1, 0.75);

        table.resize(3);
        assert_eq!(table.size(), 3);
        assert_eq!(table.color(1), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(table.color(2), Color::default());
        // Flat prefix survives; index 3 was (1,1) under stride 2
        assert_eq!(table.attract_matrix()[3], 0.75);
        assert_eq!(table.attract_matrix().len(), 9);
        assert!(table.attract_matrix()[4..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_resize_shrink_truncates() {
        let mut table = ParticleTypeTable::new(3);
        table.set_attract(0, 0, 1.0);
        table.set_attract(0, 1, 2.0);
        table.resize(1);
        assert_eq!(table.size(), 1);
        assert_eq!(table.attract_matrix(), &[1.0]);
    }

    #[test]
    fn test_display_dumps_all_matrices() {
        let mut table = ParticleTypeTable::new(2);
        table.set_attract(0, 1, 0.125);
        let dump = table.to_string();
        assert!(dump.contains("Attract:"));
        assert!(dump.contains("MinR:"));
        assert!(dump.contains("MaxR:"));
        assert!(dump.contains("0.1250"));
    }
}
