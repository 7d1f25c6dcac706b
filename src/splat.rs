use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::TAU;

use crate::canvas::Canvas;
use crate::wet_map::WetMap;

/// Blend between the splat's fixed bias and the per-vertex velocity when
/// computing a directional step.
const ALPHA: f32 = 0.33;

/// Uniform draw in [a, b]. Well-defined for a == b, unlike an exclusive
/// range, which matters for roughness 0 brushes.
pub fn uniform(rng: &mut SmallRng, a: f32, b: f32) -> f32 {
    a + (b - a) * rng.gen::<f32>()
}

/// One point on a splat's boundary polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rewetted: bool,
    pub flowing: bool,
}

/// A single pigment deposit: a closed polygon boundary that spreads through
/// wet paper while `life > 0`, then sits fixed until it either gets rewetted
/// or dries out completely and is baked into the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Splat {
    pub vertices: Vec<Vertex>,
    pub bias: Vec2,
    pub color: [f32; 4],
    pub size: f32,
    pub roughness: f32,
    pub flow: f32,
    pub stroke_id: u32,
    pub life: i32,
}

impl Splat {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        canvas: &Canvas,
        pos: Vec2,
        color: [f32; 4],
        size: f32,
        roughness: f32,
        flow: f32,
        stroke_id: u32,
        lifetime: i32,
        n_vertices: usize,
    ) -> Self {
        let vertices = (0..n_vertices)
            .map(|i| {
                let angle = i as f32 * TAU / n_vertices as f32;
                let dir = Vec2::new(angle.cos(), angle.sin());
                Vertex {
                    pos: canvas.clamp_point(pos + size * dir),
                    vel: dir,
                    rewetted: false,
                    flowing: true,
                }
            })
            .collect();

        Self {
            vertices,
            bias: Vec2::ZERO,
            color,
            size,
            roughness,
            flow,
            stroke_id,
            life: lifetime,
        }
    }

    /// Advect every vertex one tick and age the splat.
    ///
    /// Per flowing vertex:
    ///   d  = (1 - ALPHA) * bias + ALPHA * (1 / U(1, 1 + roughness)) * vel
    ///   x* = clamp(pos + flow * d + (U(-roughness, roughness) per axis))
    /// and the move is only accepted when the wet map is wet at x*: pigment
    /// cannot advance into dry paper.
    ///
    /// Returns true when `life` has just crossed to 0, i.e. the splat has
    /// stopped flowing this tick.
    pub fn advect(&mut self, canvas: &Canvas, wet_map: &WetMap, rng: &mut SmallRng) -> bool {
        for vertex in &mut self.vertices {
            if vertex.rewetted {
                // Rewetted vertices take their velocity from the wet map
                let (flow_dir, wetness) = wet_map.sample(vertex.pos);
                vertex.vel = flow_dir;
                if !vertex.flowing && wetness == 1.0 {
                    vertex.flowing = true;
                }
            }

            if vertex.flowing {
                let d = (1.0 - ALPHA) * self.bias
                    + ALPHA * (1.0 / uniform(rng, 1.0, 1.0 + self.roughness)) * vertex.vel;
                let jitter = Vec2::new(
                    uniform(rng, -self.roughness, self.roughness),
                    uniform(rng, -self.roughness, self.roughness),
                );
                let candidate = canvas.clamp_point(vertex.pos + self.flow * d + jitter);
                if wet_map.wetness_at(candidate) > 0.0 {
                    vertex.pos = candidate;
                }
            }
        }

        self.life -= 1;
        self.life == 0
    }

    /// Age a fixed splat one tick, reactivating it if fresh water has
    /// reached its boundary.
    ///
    /// If any vertex sits on a fully wet cell the splat is rewetted: life
    /// resets to `new_lifetime - 1`, the bias is dropped, and each vertex is
    /// marked `rewetted` with probability `strength^(-life / falloff)`
    /// (evaluated with the pre-reset life, so splats that dried longer ago
    /// bleed less). Otherwise life just keeps counting down.
    ///
    /// Returns true when the splat was rewetted.
    pub fn age(
        &mut self,
        wet_map: &WetMap,
        new_lifetime: i32,
        unfixing_strength: f32,
        rewet_falloff: f32,
        rng: &mut SmallRng,
    ) -> bool {
        let rewet = self
            .vertices
            .iter()
            .any(|v| wet_map.wetness_at(v.pos) == 1.0);

        if !rewet {
            self.life -= 1;
            return false;
        }

        let p = unfixing_strength
            .powf(-(self.life as f32) / rewet_falloff)
            .clamp(0.0, 1.0);
        self.life = new_lifetime - 1;
        self.bias = Vec2::ZERO;
        for vertex in &mut self.vertices {
            vertex.vel = Vec2::ZERO;
            vertex.flowing = wet_map.wetness_at(vertex.pos) == 1.0;
            vertex.rewetted = uniform(rng, 0.0, 1.0) < p;
        }
        true
    }

    /// Redistribute the boundary vertices at uniform arc-length spacing.
    ///
    /// Advection bunches vertices up; walking the perimeter at fixed
    /// increments keeps the density even without changing the vertex count.
    /// Positions and velocities are lerped along each edge, the flow flags
    /// carried from whichever bounding vertex is nearer along the arc. A
    /// degenerate (near-zero perimeter) boundary is left untouched.
    pub fn resample(&mut self) {
        let n = self.vertices.len();
        if n < 3 {
            return;
        }

        let mut cumulative = Vec::with_capacity(n + 1);
        cumulative.push(0.0);
        for i in 0..n {
            let a = self.vertices[i].pos;
            let b = self.vertices[(i + 1) % n].pos;
            cumulative.push(cumulative[i] + a.distance(b));
        }
        let perimeter = cumulative[n];
        if perimeter <= f32::EPSILON {
            return;
        }

        let step = perimeter / n as f32;
        let mut resampled = Vec::with_capacity(n);
        let mut segment = 0;
        for i in 0..n {
            let target = i as f32 * step;
            while segment + 1 < n && cumulative[segment + 1] <= target {
                segment += 1;
            }
            let a = &self.vertices[segment];
            let b = &self.vertices[(segment + 1) % n];
            let span = cumulative[segment + 1] - cumulative[segment];
            let t = if span > 0.0 {
                (target - cumulative[segment]) / span
            } else {
                0.0
            };
            let nearer = if t < 0.5 { a } else { b };
            resampled.push(Vertex {
                pos: a.pos.lerp(b.pos, t),
                vel: a.vel.lerp(b.vel, t),
                rewetted: nearer.rewetted,
                flowing: nearer.flowing,
            });
        }
        self.vertices = resampled;
    }

    /// Boundary positions, for rasterization.
    pub fn boundary(&self) -> Vec<Vec2> {
        self.vertices.iter().map(|v| v.pos).collect()
    }

    /// Perimeter of the boundary polygon.
    pub fn perimeter(&self) -> f32 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                self.vertices[i]
                    .pos
                    .distance(self.vertices[(i + 1) % n].pos)
            })
            .sum()
    }
}
