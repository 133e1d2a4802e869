//! Software raster surface
//!
//! Alpha-blends filled circles into an RGB float buffer and can export the
//! result as a binary PPM (P6) image.

use std::io::{self, Write};
use std::path::Path;

use glam::Vec2;

use super::Surface;
use crate::Color;

/// RGB framebuffer with source-over blending
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 3]>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 3]; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fill every pixel with an opaque color
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill([color.r, color.g, color.b]);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[f32; 3]> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Encode as binary PPM
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let bytes: Vec<u8> = self
            .pixels
            .iter()
            .flat_map(|px| px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect();
        out.write_all(&bytes)
    }

    pub fn save_ppm(&self, path: &Path) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_ppm(io::BufWriter::new(file))
    }
}

impl Surface for Canvas {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 || color.a <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }

        let x0 = (center.x - radius).floor().max(0.0) as usize;
        let y0 = (center.y - radius).floor().max(0.0) as usize;
        let x1 = ((center.x + radius).ceil().max(0.0) as usize).min(self.width - 1);
        let y1 = ((center.y + radius).ceil().max(0.0) as usize).min(self.height - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let alpha = color.a.min(1.0);
        let r2 = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if d.length_squared() > r2 {
                    continue;
                }
                let px = &mut self.pixels[y * self.width + x];
                px[0] += (color.r - px[0]) * alpha;
                px[1] += (color.g - px[1]) * alpha;
                px[2] += (color.b - px[2]) * alpha;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_circle_opaque() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 3.0, Color::new(1.0, 0.5, 0.0, 1.0));
        assert_eq!(canvas.pixel(10, 10), Some([1.0, 0.5, 0.0]));
        assert_eq!(canvas.pixel(0, 0), Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_fill_circle_blends() {
        let mut canvas = Canvas::new(8, 8);
        canvas.clear(Color::new(0.0, 0.0, 1.0, 1.0));
        canvas.fill_circle(Vec2::new(4.0, 4.0), 2.0, Color::new(1.0, 0.0, 0.0, 0.5));
        let px = canvas.pixel(4, 4).unwrap_or_default();
        assert!((px[0] - 0.5).abs() < 1e-6);
        assert!((px[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_offscreen_circle_is_ignored() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_circle(Vec2::new(-50.0, -50.0), 3.0, Color::new(1.0, 1.0, 1.0, 1.0));
        canvas.fill_circle(Vec2::new(500.0, 4.0), 3.0, Color::new(1.0, 1.0, 1.0, 1.0));
        assert!((0..8).all(|y| (0..8).all(|x| canvas.pixel(x, y) == Some([0.0; 3]))));
    }

    #[test]
    fn test_ppm_header_and_size() {
        let canvas = Canvas::new(3, 2);
        let mut buf = Vec::new();
        canvas.write_ppm(&mut buf).unwrap();
        let header = b"P6\n3 2\n255\n";
        assert!(buf.starts_with(header));
        assert_eq!(buf.len(), header.len() + 3 * 2 * 3);
    }
}
