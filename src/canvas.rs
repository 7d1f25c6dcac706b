use glam::Vec2;

use crate::raster::fill_polygon;

/// Unpainted paper colour of a fresh canvas.
pub const PAPER_COLOR: [f32; 3] = [0.9, 0.9, 0.9];

/// The paper: fixed bounds plus the baked RGB pixel buffer that dried
/// splats are composited into.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[f32; 3]>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![PAPER_COLOR; width * height],
        }
    }

    /// Return true iff a point, in canvas coordinates, is inside the canvas.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.x <= self.width as f32
            && point.y >= 0.0
            && point.y <= self.height as f32
    }

    /// Clamp a point into the canvas so that truncating it always yields a
    /// valid cell index.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(
            Vec2::ZERO,
            Vec2::new((self.width - 1) as f32, (self.height - 1) as f32),
        )
    }

    /// Composite a filled polygon into the baked pixel buffer with
    /// source-over alpha blending.
    pub fn composite_polygon(&mut self, points: &[Vec2], color: [f32; 4]) {
        let width = self.width;
        let alpha = color[3];
        let pixels = &mut self.pixels;
        fill_polygon(points, self.width, self.height, |x, y| {
            let px = &mut pixels[y * width + x];
            for c in 0..3 {
                px[c] = (1.0 - alpha) * px[c] + alpha * color[c];
            }
        });
    }

    /// Reset to blank paper.
    pub fn clear(&mut self) {
        self.pixels.fill(PAPER_COLOR);
    }
}
