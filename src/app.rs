use eframe::egui;
use glam::Vec2;
use std::path::Path;

use crate::export::ImageExporter;
use crate::painting::Painting;
use crate::stamp::{BrushSettings, Stamp};

/// Interactive watercolour painting application.
pub struct PaintingApp {
    painting: Painting,
    brush: BrushSettings,
    stamps: Vec<Stamp>,
    stamp_index: usize,
    paused: bool,
    show_wet_map: bool,
    debug: bool,
    canvas_texture: Option<egui::TextureHandle>,
    canvas_dirty: bool,
    status: String,
}

impl PaintingApp {
    pub fn new(cc: &eframe::CreationContext<'_>, width: usize, height: usize) -> Self {
        // Restore brush settings from the previous session where available
        let brush = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        // Different seed each launch, deterministic within a run
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);

        Self {
            painting: Painting::new(width, height, seed),
            brush,
            stamps: Stamp::all(),
            stamp_index: 0,
            paused: false,
            show_wet_map: false,
            debug: false,
            canvas_texture: None,
            canvas_dirty: true,
            status: String::new(),
        }
    }

    fn canvas_color_image(&self) -> egui::ColorImage {
        let canvas = &self.painting.canvas;
        let pixels = canvas
            .pixels
            .iter()
            .map(|[r, g, b]| {
                egui::Color32::from_rgb(
                    (r.clamp(0.0, 1.0) * 255.0) as u8,
                    (g.clamp(0.0, 1.0) * 255.0) as u8,
                    (b.clamp(0.0, 1.0) * 255.0) as u8,
                )
            })
            .collect();
        egui::ColorImage {
            size: [canvas.width, canvas.height],
            pixels,
        }
    }

    fn wet_map_color_image(&self) -> egui::ColorImage {
        let wet_map = &self.painting.wet_map;
        let pixels = (0..wet_map.wetness.len())
            .map(|idx| {
                egui::Color32::from_rgb(
                    (wet_map.flow_x[idx].clamp(0.0, 1.0) * 255.0) as u8,
                    (wet_map.flow_y[idx].clamp(0.0, 1.0) * 255.0) as u8,
                    (wet_map.wetness[idx].clamp(0.0, 1.0) * 255.0) as u8,
                )
            })
            .collect();
        egui::ColorImage {
            size: [wet_map.width, wet_map.height],
            pixels,
        }
    }

    fn settings_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Brush");
        ui.add(egui::Slider::new(&mut self.brush.size, 1.0..=50.0).text("Size"));
        ui.add(egui::Slider::new(&mut self.brush.roughness, 0.0..=2.0).text("Roughness"));
        ui.add(egui::Slider::new(&mut self.brush.flow, 0.0..=2.0).text("Flow"));
        ui.add(egui::Slider::new(&mut self.brush.lifetime, 0..=300).text("Lifetime"));
        ui.add(egui::Slider::new(&mut self.brush.vertex_count, 3..=50).text("Vertices"));
        ui.horizontal(|ui| {
            ui.label("Colour:");
            ui.color_edit_button_rgb(&mut self.brush.color);
        });

        ui.separator();
        ui.heading("Stamp");
        for i in 0..self.stamps.len() {
            let selected = self.stamp_index == i;
            if ui.selectable_label(selected, self.stamps[i].name()).clicked() {
                self.stamp_index = i;
            }
        }
        match &mut self.stamps[self.stamp_index] {
            Stamp::Simple => {}
            Stamp::Crunchy { scale } => {
                ui.add(egui::Slider::new(scale, 0.25..=1.0).text("Scale"))
                    .on_hover_text("Splat size relative to the wetted region");
            }
            Stamp::WetOnDry { lobes, bias } => {
                ui.add(egui::Slider::new(lobes, 2..=12).text("Lobes"));
                ui.add(egui::Slider::new(bias, 0.0..=0.2).text("Bias"))
                    .on_hover_text("Outward motion bias of the outer splats");
            }
            Stamp::WetOnWet { scale } => {
                ui.add(egui::Slider::new(scale, 0.5..=2.0).text("Scale"))
                    .on_hover_text("Relative size of the outer splat");
            }
            Stamp::Blobby { offset, .. } => {
                ui.add(egui::Slider::new(offset, 0.0..=1.5).text("Offset"));
            }
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Undo").clicked() {
                self.painting.undo();
            }
            if ui.button("Redo").clicked() {
                self.painting.redo();
            }
            if ui.button("New").clicked() {
                self.painting.clear();
                self.canvas_dirty = true;
            }
        });
        ui.horizontal(|ui| {
            if ui.button(if self.paused { "Resume" } else { "Pause" }).clicked() {
                self.paused = !self.paused;
            }
            if ui.button("Save PNG").clicked() {
                let canvas = &self.painting.canvas;
                let exporter = ImageExporter::new(canvas.width as u32, canvas.height as u32);
                self.status = match exporter.export_png(&self.painting, Path::new("painting.png")) {
                    Ok(()) => "Saved painting.png".to_owned(),
                    Err(err) => format!("Save failed: {err}"),
                };
            }
        });
        if ui.checkbox(&mut self.show_wet_map, "Show wet map").changed() {
            // The shared texture needs repainting with the other view
            self.canvas_dirty = true;
        }
        ui.checkbox(&mut self.debug, "Debug info");

        if self.debug {
            ui.separator();
            ui.label(format!("Strokes: {}", self.painting.stroke_id()));
            ui.label(format!(
                "Live splats: {} ({} flowing)",
                self.painting.history.live.len(),
                self.painting.history.flowing_count()
            ));
            ui.label(format!("Ticks: {}", self.painting.tick_count()));
        }

        if !self.status.is_empty() {
            ui.separator();
            ui.label(&self.status);
        }
    }

    fn canvas_view(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let canvas = &self.painting.canvas;
        let size = egui::Vec2::new(canvas.width as f32, canvas.height as f32);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

        // Pointer input drives the stroke controller
        let canvas_pos = response
            .interact_pointer_pos()
            .map(|pos| Vec2::new(pos.x - rect.left(), pos.y - rect.top()));

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = canvas_pos {
                let stamp = &mut self.stamps[self.stamp_index];
                self.painting.begin_stroke(pos, stamp, &self.brush);
            }
        } else if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = canvas_pos {
                let stamp = &mut self.stamps[self.stamp_index];
                self.painting.continue_stroke(pos, stamp, &self.brush);
            }
        } else if response.drag_stopped_by(egui::PointerButton::Primary) {
            self.painting.end_stroke();
        }

        // Baked canvas (or the wet map debug view) as a texture
        let image = if self.show_wet_map {
            Some(self.wet_map_color_image())
        } else if self.canvas_dirty || self.canvas_texture.is_none() {
            self.canvas_dirty = false;
            Some(self.canvas_color_image())
        } else {
            None
        };
        if let Some(image) = image {
            match &mut self.canvas_texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.canvas_texture =
                        Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST));
                }
            }
        }

        let painter = ui.painter_at(rect);
        if let Some(texture) = &self.canvas_texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        // Live splats as filled polygons on top
        if !self.show_wet_map {
            for splat in &self.painting.history.live {
                let points: Vec<egui::Pos2> = splat
                    .vertices
                    .iter()
                    .map(|v| egui::pos2(rect.left() + v.pos.x, rect.top() + v.pos.y))
                    .collect();
                let [r, g, b, a] = splat.color;
                let fill = egui::Color32::from_rgba_unmultiplied(
                    (r * 255.0) as u8,
                    (g * 255.0) as u8,
                    (b * 255.0) as u8,
                    (a * 255.0) as u8,
                );
                painter.add(egui::Shape::convex_polygon(
                    points,
                    fill,
                    egui::Stroke::NONE,
                ));
            }
        }

        // Brush outline under the cursor
        if let Some(hover) = response.hover_pos() {
            painter.circle_stroke(
                hover,
                self.brush.size,
                egui::Stroke::new(1.0, egui::Color32::from_black_alpha(160)),
            );
        }
    }
}

impl eframe::App for PaintingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Ctrl+Z / Ctrl+Y undo and redo the last stroke
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Z)) {
            self.painting.undo();
        }
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Y)) {
            self.painting.redo();
        }

        egui::SidePanel::left("settings").show(ctx, |ui| {
            self.settings_panel(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_view(ui, ctx);
        });

        if !self.paused {
            let dt = ctx.input(|i| i.stable_dt).min(0.1);
            self.painting.advance(dt);
        }

        // Drain the dried-out prefix into the baked canvas image
        if self.painting.bake_dried() > 0 {
            self.canvas_dirty = true;
        }

        ctx.request_repaint();
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.brush);
    }
}
