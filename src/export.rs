use std::path::Path;

use crate::painting::Painting;
use crate::render::Renderer;

/// PNG export of the composited painting and the wet map.
pub struct ImageExporter {
    renderer: Renderer,
}

impl ImageExporter {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
        }
    }

    pub fn export_png(
        &self,
        painting: &Painting,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let img = self.renderer.render(painting);
        img.save(path)?;
        Ok(())
    }

    pub fn export_wet_map_png(
        &self,
        painting: &Painting,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let img = self.renderer.render_wet_map(painting);
        img.save(path)?;
        Ok(())
    }

    /// Run the simulation and export one frame every `ticks_per_frame`
    /// ticks. Dried splats are baked between frames, as the GUI would.
    pub fn export_frame_sequence(
        &self,
        painting: &mut Painting,
        frames: usize,
        ticks_per_frame: usize,
        output_dir: &Path,
        prefix: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for frame in 0..frames {
            for _ in 0..ticks_per_frame {
                painting.tick();
            }
            painting.bake_dried();

            let filename = format!("{}_frame_{:04}.png", prefix, frame);
            self.export_png(painting, &output_dir.join(filename))?;
        }
        Ok(())
    }
}
