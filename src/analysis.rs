use serde::Serialize;

use crate::painting::Painting;

/// Per-frame snapshot of simulation health: splat lifecycle counts and
/// wet-map statistics.
#[derive(Debug, Clone, Serialize)]
pub struct PaintingMetrics {
    pub frame: usize,
    pub live_splats: usize,
    pub flowing_splats: usize,
    pub fixed_splats: usize,
    pub undone_splats: usize,
    pub mean_life: f32,
    pub wet_coverage: f32,
    pub mean_wetness: f32,
}

impl PaintingMetrics {
    pub fn analyze(painting: &Painting, frame: usize) -> Self {
        let live = &painting.history.live;
        let flowing = painting.history.flowing_count();
        let mean_life = if live.is_empty() {
            0.0
        } else {
            live.iter().map(|s| s.life as f32).sum::<f32>() / live.len() as f32
        };
        let wetness = &painting.wet_map.wetness;
        let mean_wetness = wetness.iter().sum::<f32>() / wetness.len() as f32;

        Self {
            frame,
            live_splats: live.len(),
            flowing_splats: flowing,
            fixed_splats: live.len() - flowing,
            undone_splats: painting.history.undone.len(),
            mean_life,
            wet_coverage: painting.wet_map.coverage(),
            mean_wetness,
        }
    }

    pub fn print_summary(&self) {
        println!("=== Frame {} ===", self.frame);
        println!(
            "  Splats: {} live ({} flowing, {} fixed), {} undone",
            self.live_splats, self.flowing_splats, self.fixed_splats, self.undone_splats
        );
        println!("  Mean life: {:.1} ticks", self.mean_life);
        println!(
            "  Wet map: {:.1}% covered, mean wetness {:.3}",
            self.wet_coverage * 100.0,
            self.mean_wetness
        );
    }
}

/// Records metrics over a run and reports overall trends.
#[derive(Debug, Default)]
pub struct AnalysisRecorder {
    frames: Vec<PaintingMetrics>,
}

impl AnalysisRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, painting: &Painting, frame: usize) {
        self.frames.push(PaintingMetrics::analyze(painting, frame));
    }

    pub fn frames(&self) -> &[PaintingMetrics] {
        &self.frames
    }

    pub fn print_trends(&self) {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            println!("No frames recorded");
            return;
        };

        println!("=== Trends over {} frames ===", self.frames.len());
        println!(
            "  Live splats: {} -> {}",
            first.live_splats, last.live_splats
        );
        println!(
            "  Flowing splats: {} -> {}",
            first.flowing_splats, last.flowing_splats
        );
        println!(
            "  Wet coverage: {:.1}% -> {:.1}%",
            first.wet_coverage * 100.0,
            last.wet_coverage * 100.0
        );
        println!(
            "  Mean wetness: {:.3} -> {:.3}",
            first.mean_wetness, last.mean_wetness
        );
    }

    /// Dump all recorded frames as JSON, one metrics object per frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.frames)
    }
}
