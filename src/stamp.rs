use glam::Vec2;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

use crate::canvas::Canvas;
use crate::splat::{uniform, Splat};
use crate::wet_map::WetMap;

/// Brush parameters shared by all stamp variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushSettings {
    pub color: [f32; 3],
    pub size: f32,
    pub roughness: f32,
    pub flow: f32,
    pub lifetime: i32,
    pub vertex_count: usize,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: [1.0, 0.0, 0.0],
            size: 10.0,
            roughness: 1.0,
            flow: 1.0,
            lifetime: 60,
            vertex_count: 25,
        }
    }
}

/// A stamp decides what a single brush dab produces: how the canvas gets
/// pre-wetted (`wet_canvas`) and which splats are created on top of the wet
/// region (`place`). The two footprints may differ, which is why they are
/// separate steps; `wet_canvas` always runs first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stamp {
    /// One splat matching the brush size.
    Simple,
    /// Simple with a configurable scale below the wetted region; combined
    /// with high roughness and low flow this gives the dry, grainy look.
    Crunchy { scale: f32 },
    /// A half-radius centre splat with radially arranged lobes, each biased
    /// outward, so pigment bleeds unevenly from a central deposit.
    WetOnDry { lobes: usize, bias: f32 },
    /// Two concentric splats plus pre-wetting beyond the stamp itself,
    /// giving a soft halo.
    WetOnWet { scale: f32 },
    /// Four compass-point splats with independently randomized sizes and
    /// matching pre-wet dabs; irregular, organic edges.
    Blobby { offset: f32, sizes: [f32; 4] },
}

impl Stamp {
    /// Default-parameterized instances of every variant, for the UI.
    pub fn all() -> Vec<Stamp> {
        vec![
            Stamp::Simple,
            Stamp::Crunchy { scale: 1.0 },
            Stamp::WetOnDry { lobes: 6, bias: 0.05 },
            Stamp::WetOnWet { scale: 1.5 },
            Stamp::Blobby { offset: 1.0, sizes: [0.5; 4] },
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stamp::Simple => "Simple",
            Stamp::Crunchy { .. } => "Crunchy",
            Stamp::WetOnDry { .. } => "Wet on dry",
            Stamp::WetOnWet { .. } => "Wet on wet",
            Stamp::Blobby { .. } => "Blobby",
        }
    }

    /// Deposit water under the stamp before any splats are placed.
    pub fn wet_canvas(
        &mut self,
        wet_map: &mut WetMap,
        pos: Vec2,
        brush: &BrushSettings,
        rng: &mut SmallRng,
    ) {
        match self {
            Stamp::Simple | Stamp::Crunchy { .. } | Stamp::WetOnDry { .. } => {
                wet_map.deposit(pos, brush.size, brush.vertex_count);
            }
            Stamp::WetOnWet { scale } => {
                // Four large dabs on the diagonals, past the stamp itself
                for i in 0..4 {
                    let angle = (i as f32 * 0.5 + 0.25) * PI;
                    let point = pos + *scale * brush.size * Vec2::new(angle.cos(), angle.sin());
                    wet_map.deposit(point, 2.0 * brush.size, brush.vertex_count);
                }
            }
            Stamp::Blobby { offset, sizes } => {
                // Relative sizes are rolled here and reused by place() so the
                // dabs and the splats agree in footprint
                for (i, size) in sizes.iter_mut().enumerate() {
                    *size = uniform(rng, 0.33, 1.0);
                    let angle = i as f32 * 0.5 * PI;
                    let point = pos + *offset * brush.size * Vec2::new(angle.cos(), angle.sin());
                    wet_map.deposit(point, *size * brush.size, brush.vertex_count);
                }
            }
        }
    }

    /// Create this stamp's splats at `pos` on the (already wetted) canvas.
    pub fn place(
        &self,
        splats: &mut VecDeque<Splat>,
        canvas: &Canvas,
        pos: Vec2,
        brush: &BrushSettings,
        stroke_id: u32,
    ) {
        let [r, g, b] = brush.color;
        match self {
            Stamp::Simple => {
                splats.push_back(Splat::new(
                    canvas,
                    pos,
                    [r, g, b, 0.1],
                    brush.size,
                    brush.roughness,
                    brush.flow,
                    stroke_id,
                    brush.lifetime,
                    brush.vertex_count,
                ));
            }
            Stamp::Crunchy { scale } => {
                splats.push_back(Splat::new(
                    canvas,
                    pos,
                    [r, g, b, 0.1],
                    scale * brush.size,
                    brush.roughness,
                    brush.flow,
                    stroke_id,
                    brush.lifetime,
                    brush.vertex_count,
                ));
            }
            Stamp::WetOnDry { lobes, bias } => {
                let color = [r, g, b, 0.02];
                let radius = 0.5 * brush.size;
                splats.push_back(Splat::new(
                    canvas,
                    pos,
                    color,
                    radius,
                    brush.roughness,
                    brush.flow,
                    stroke_id,
                    brush.lifetime,
                    brush.vertex_count,
                ));
                for i in 0..*lobes {
                    let angle = i as f32 * TAU / *lobes as f32;
                    let offset = radius * Vec2::new(angle.cos(), angle.sin());
                    let mut lobe = Splat::new(
                        canvas,
                        pos + offset,
                        color,
                        radius,
                        brush.roughness,
                        brush.flow,
                        stroke_id,
                        brush.lifetime,
                        brush.vertex_count,
                    );
                    lobe.bias = *bias * offset;
                    splats.push_back(lobe);
                }
            }
            Stamp::WetOnWet { scale } => {
                let color = [r, g, b, 0.05];
                splats.push_back(Splat::new(
                    canvas,
                    pos,
                    color,
                    scale * brush.size,
                    brush.roughness,
                    brush.flow,
                    stroke_id,
                    brush.lifetime,
                    brush.vertex_count,
                ));
                splats.push_back(Splat::new(
                    canvas,
                    pos,
                    color,
                    0.5 * brush.size,
                    brush.roughness,
                    brush.flow,
                    stroke_id,
                    brush.lifetime,
                    brush.vertex_count,
                ));
            }
            Stamp::Blobby { offset, sizes } => {
                let color = [r, g, b, 0.025];
                for (i, size) in sizes.iter().enumerate() {
                    let angle = i as f32 * 0.5 * PI;
                    let point = pos + *offset * brush.size * Vec2::new(angle.cos(), angle.sin());
                    splats.push_back(Splat::new(
                        canvas,
                        point,
                        color,
                        size * brush.size,
                        brush.roughness,
                        brush.flow,
                        stroke_id,
                        brush.lifetime,
                        brush.vertex_count,
                    ));
                }
            }
        }
    }

    /// Number of splats a single placement creates.
    pub fn splats_per_stamp(&self) -> usize {
        match self {
            Stamp::Simple | Stamp::Crunchy { .. } => 1,
            Stamp::WetOnDry { lobes, .. } => 1 + lobes,
            Stamp::WetOnWet { .. } => 2,
            Stamp::Blobby { .. } => 4,
        }
    }
}
