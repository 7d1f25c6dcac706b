use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::history::History;
use crate::stamp::{BrushSettings, Stamp};
use crate::wet_map::WetMap;

/// Simulation-wide tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimSettings {
    /// Logical tick length in seconds (~60 Hz).
    pub time_step: f32,
    /// Ticks a fixed splat must age past life 0 before it is baked.
    pub drying_time: i32,
    /// Stroke length before a new stamp is placed.
    pub stamp_spacing: f32,
    /// Wetness subtracted from every cell per tick.
    pub decay_rate: f32,
    /// Boundary resampling period, in ticks.
    pub resample_interval: u64,
    /// Lifetime granted to a splat on rewetting.
    pub new_lifetime: i32,
    /// Base of the stochastic reactivation law; higher values let dried
    /// splats bleed again more readily.
    pub unfixing_strength: f32,
    /// Life scale in the reactivation exponent.
    pub rewet_falloff: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            time_step: 0.0167,
            drying_time: 60,
            stamp_spacing: 5.0,
            decay_rate: 1.0 / 255.0,
            resample_interval: 10,
            new_lifetime: 60,
            unfixing_strength: 0.75,
            rewet_falloff: 10.0,
        }
    }
}

/// The whole painting: canvas, wet map, splat history, stroke state and the
/// simulation clock. Single-threaded; strokes and undo/redo interleave with
/// ticks on the same thread and are atomic with respect to them.
pub struct Painting {
    pub canvas: Canvas,
    pub wet_map: WetMap,
    pub history: History,
    pub settings: SimSettings,
    rng: SmallRng,
    time_accum: f32,
    tick_count: u64,
    stroke_id: u32,
    stroke_active: bool,
    last_stamp: Vec2,
}

impl Painting {
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            wet_map: WetMap::new(width, height),
            history: History::new(),
            settings: SimSettings::default(),
            rng: SmallRng::seed_from_u64(seed),
            time_accum: 0.0,
            tick_count: 0,
            stroke_id: 0,
            stroke_active: false,
            last_stamp: Vec2::ZERO,
        }
    }

    pub fn stroke_id(&self) -> u32 {
        self.stroke_id
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Pointer-down: wet the canvas and place the first stamp. Starting a
    /// stroke discards the redo future.
    pub fn begin_stroke(&mut self, pos: Vec2, stamp: &mut Stamp, brush: &BrushSettings) {
        self.history.undone.clear();
        self.stroke_active = true;
        self.last_stamp = pos;
        stamp.wet_canvas(&mut self.wet_map, pos, brush, &mut self.rng);
        if self.canvas.contains_point(pos) {
            stamp.place(&mut self.history.live, &self.canvas, pos, brush, self.stroke_id);
        }
    }

    /// Pointer-move: walk the path from the last stamp in unit steps,
    /// wetting the canvas at every step and placing a stamp each
    /// `stamp_spacing` steps.
    pub fn continue_stroke(&mut self, pos: Vec2, stamp: &mut Stamp, brush: &BrushSettings) {
        if !self.stroke_active {
            return;
        }
        let dist = self.last_stamp.distance(pos);
        if dist < self.settings.stamp_spacing {
            return;
        }
        let dir = (pos - self.last_stamp).normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }

        let spacing = self.settings.stamp_spacing.max(1.0);
        let mut cursor = self.last_stamp;
        let mut travelled = 1.0;
        while travelled <= dist {
            cursor += dir;
            // Unit steps, so a stamp lands on the first step at or past each
            // spacing multiple
            if travelled % spacing < 1.0 {
                self.last_stamp = cursor;
                stamp.wet_canvas(&mut self.wet_map, cursor, brush, &mut self.rng);
                if self.canvas.contains_point(cursor) {
                    stamp.place(
                        &mut self.history.live,
                        &self.canvas,
                        cursor,
                        brush,
                        self.stroke_id,
                    );
                }
            } else {
                self.wet_map.deposit(cursor, brush.size, brush.vertex_count);
            }
            travelled += 1.0;
        }
    }

    /// Pointer-up: close the stroke. Ids are monotonic and never reused.
    pub fn end_stroke(&mut self) {
        if self.stroke_active {
            self.stroke_active = false;
            self.stroke_id += 1;
        }
    }

    /// One fixed-rate simulation tick: advect the flowing splats, age the
    /// fixed ones, periodically resample boundaries, then dry the canvas.
    /// Wet map writes stay strictly ordered around the advection pass so a
    /// tick never observes its own partial moisture update.
    pub fn tick(&mut self) {
        let settings = &self.settings;
        for splat in self.history.live.iter_mut() {
            if splat.life > 0 {
                let just_fixed = splat.advect(&self.canvas, &self.wet_map, &mut self.rng);
                if just_fixed {
                    splat.resample();
                }
            } else if splat.life >= -settings.drying_time {
                splat.age(
                    &self.wet_map,
                    settings.new_lifetime,
                    settings.unfixing_strength,
                    settings.rewet_falloff,
                    &mut self.rng,
                );
            }
        }

        if self.tick_count % settings.resample_interval == 0 {
            for splat in self.history.live.iter_mut().filter(|s| s.life > 0) {
                splat.resample();
            }
        }

        self.wet_map.decay(settings.decay_rate);
        self.tick_count += 1;
    }

    /// Drain elapsed wall time into fixed-rate ticks so simulation speed
    /// does not depend on frame rate. Returns the number of ticks run.
    pub fn advance(&mut self, wall_dt: f32) -> u32 {
        self.time_accum += wall_dt;
        let mut ticks = 0;
        while self.time_accum >= self.settings.time_step {
            self.time_accum -= self.settings.time_step;
            self.tick();
            ticks += 1;
        }
        ticks
    }

    pub fn undo(&mut self) {
        self.history.undo();
    }

    pub fn redo(&mut self) {
        self.history.redo();
    }

    /// Rasterize the fully dried prefix of the live collection into the
    /// canvas pixel buffer and drop those splats. Returns how many were
    /// baked.
    pub fn bake_dried(&mut self) -> usize {
        let dried = self.history.drain_dried(self.settings.drying_time);
        for splat in &dried {
            self.canvas.composite_polygon(&splat.boundary(), splat.color);
        }
        dried.len()
    }

    /// New canvas: blank paper, dry wet map, empty history.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.wet_map.clear();
        self.history.clear();
        self.time_accum = 0.0;
        self.tick_count = 0;
        self.stroke_id = 0;
        self.stroke_active = false;
    }
}
