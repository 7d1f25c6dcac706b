use image::{ImageBuffer, Rgb, RgbImage};

use crate::painting::Painting;

/// Offline compositor: produces RGB images of the painting (baked canvas
/// plus live splats) or of the wet map, scaled to the output size by
/// nearest-neighbour lookup. Read-only over the simulation state.
pub struct Renderer {
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Composite the current painting into an image.
    pub fn render(&self, painting: &Painting) -> RgbImage {
        // Bake the live splats onto a scratch copy of the canvas; the real
        // canvas only ever receives fully dried splats
        let mut composited = painting.canvas.clone();
        for splat in &painting.history.live {
            composited.composite_polygon(&splat.boundary(), splat.color);
        }

        let mut img = ImageBuffer::new(self.width, self.height);
        let scale_x = self.width as f32 / composited.width as f32;
        let scale_y = self.height as f32 / composited.height as f32;

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let sim_x = (x as f32 / scale_x) as usize;
            let sim_y = (y as f32 / scale_y) as usize;

            if sim_x < composited.width && sim_y < composited.height {
                let [r, g, b] = composited.pixels[sim_y * composited.width + sim_x];
                *pixel = Rgb([
                    (r.clamp(0.0, 1.0) * 255.0) as u8,
                    (g.clamp(0.0, 1.0) * 255.0) as u8,
                    (b.clamp(0.0, 1.0) * 255.0) as u8,
                ]);
            } else {
                *pixel = Rgb([0, 0, 0]);
            }
        }

        img
    }

    /// Debug view of the wet map: flow channels in red/green, wetness in
    /// blue.
    pub fn render_wet_map(&self, painting: &Painting) -> RgbImage {
        let wet_map = &painting.wet_map;
        let mut img = ImageBuffer::new(self.width, self.height);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let sim_x = (x as f32 / self.width as f32 * wet_map.width as f32) as usize;
            let sim_y = (y as f32 / self.height as f32 * wet_map.height as f32) as usize;

            if sim_x < wet_map.width && sim_y < wet_map.height {
                let idx = sim_y * wet_map.width + sim_x;
                *pixel = Rgb([
                    (wet_map.flow_x[idx].clamp(0.0, 1.0) * 255.0) as u8,
                    (wet_map.flow_y[idx].clamp(0.0, 1.0) * 255.0) as u8,
                    (wet_map.wetness[idx].clamp(0.0, 1.0) * 255.0) as u8,
                ]);
            } else {
                *pixel = Rgb([0, 0, 0]);
            }
        }

        img
    }
}
