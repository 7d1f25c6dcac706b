use glam::Vec2;

use crate::raster::{fill_polygon, regular_polygon};

/// Per-cell moisture field driving splat advection.
///
/// Each cell carries a directional flow vector (two channels, stored
/// normalized to [0, 1]) and a wetness scalar in [0, 1]. Strokes deposit
/// wetness and flow under brush dabs, a uniform decay dries the canvas each
/// tick, and splat vertices sample the field to decide where pigment may
/// move.
#[derive(Debug, Clone)]
pub struct WetMap {
    pub width: usize,
    pub height: usize,
    pub flow_x: Vec<f32>,
    pub flow_y: Vec<f32>,
    pub wetness: Vec<f32>,
}

impl WetMap {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            flow_x: vec![0.0; size],
            flow_y: vec![0.0; size],
            wetness: vec![0.0; size],
        }
    }

    fn index(&self, point: Vec2) -> usize {
        // Nearest-cell lookup, indices clamped so a point on the canvas edge
        // still resolves to a valid cell
        let x = (point.x as usize).min(self.width - 1);
        let y = (point.y as usize).min(self.height - 1);
        y * self.width + x
    }

    /// Rasterize a polygon dab of `radius` around `center`: every covered
    /// cell gets wetness 1.0 and a flow vector pointing away from the centre
    /// (encoded to [0, 1] per channel).
    pub fn deposit(&mut self, center: Vec2, radius: f32, vertex_count: usize) {
        let dab = regular_polygon(center, radius, vertex_count);
        let width = self.width;
        let (flow_x, flow_y, wetness) = (&mut self.flow_x, &mut self.flow_y, &mut self.wetness);
        fill_polygon(&dab, width, self.height, |x, y| {
            let cell_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let dir = (cell_center - center).normalize_or_zero();
            let idx = y * width + x;
            flow_x[idx] = (dir.x + 1.0) / 2.0;
            flow_y[idx] = (dir.y + 1.0) / 2.0;
            wetness[idx] = 1.0;
        });
    }

    /// Uniformly dry the whole canvas by `rate`, floored at zero. Run once
    /// per simulation tick.
    pub fn decay(&mut self, rate: f32) {
        for w in &mut self.wetness {
            *w = (*w - rate).max(0.0);
        }
    }

    /// Nearest-cell sample of (flow vector, wetness) at a canvas point.
    pub fn sample(&self, point: Vec2) -> (Vec2, f32) {
        let idx = self.index(point);
        (
            Vec2::new(self.flow_x[idx], self.flow_y[idx]),
            self.wetness[idx],
        )
    }

    /// Wetness alone, for the advection gate.
    pub fn wetness_at(&self, point: Vec2) -> f32 {
        self.wetness[self.index(point)]
    }

    /// Fraction of cells with any moisture left.
    pub fn coverage(&self) -> f32 {
        let wet = self.wetness.iter().filter(|w| **w > 0.0).count();
        wet as f32 / self.wetness.len() as f32
    }

    pub fn clear(&mut self) {
        self.flow_x.fill(0.0);
        self.flow_y.fill(0.0);
        self.wetness.fill(0.0);
    }
}
