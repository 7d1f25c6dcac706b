use aquarelle::{AnalysisRecorder, BrushSettings, ImageExporter, Painting, PaintingMetrics, Stamp};
use glam::Vec2;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "test" {
        run_headless_test()?;
    } else {
        run_gui_app();
    }

    Ok(())
}

/// Script a diagonal stroke, run the simulation to full dryness and export
/// PNG frames plus metrics along the way.
fn run_headless_test() -> Result<(), Box<dyn std::error::Error>> {
    println!("Running headless watercolour test...");

    let mut painting = Painting::new(300, 200, 7);
    let brush = BrushSettings::default();
    let mut stamp = Stamp::Simple;
    let exporter = ImageExporter::new(600, 400);
    let mut recorder = AnalysisRecorder::new();

    // One diagonal stroke across the canvas
    painting.begin_stroke(Vec2::new(60.0, 60.0), &mut stamp, &brush);
    for step in 1..=20 {
        let pos = Vec2::new(60.0 + 8.0 * step as f32, 60.0 + 4.0 * step as f32);
        painting.continue_stroke(pos, &mut stamp, &brush);
    }
    painting.end_stroke();

    recorder.record_frame(&painting, 0);
    PaintingMetrics::analyze(&painting, 0).print_summary();
    exporter.export_png(&painting, Path::new("test_frame_0000.png"))?;
    exporter.export_wet_map_png(&painting, Path::new("test_wetmap_0000.png"))?;

    // 10 ticks per exported frame until everything has dried and baked
    for frame in 1..=20 {
        for _ in 0..10 {
            painting.tick();
        }
        let baked = painting.bake_dried();
        recorder.record_frame(&painting, frame);

        exporter.export_png(&painting, Path::new(&format!("test_frame_{:04}.png", frame)))?;

        if frame % 5 == 0 {
            PaintingMetrics::analyze(&painting, frame).print_summary();
            if baked > 0 {
                println!("  Baked {} splats this frame", baked);
            }
        }
    }

    recorder.print_trends();
    std::fs::write("test_metrics.json", recorder.to_json()?)?;

    println!("Test completed: 21 frames and test_metrics.json written.");
    Ok(())
}

fn run_gui_app() {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1300.0, 1000.0])
            .with_title("aquarelle - Watercolour Painting"),
        ..Default::default()
    };

    eframe::run_native(
        "aquarelle",
        options,
        Box::new(|cc| Box::new(aquarelle::PaintingApp::new(cc, 900, 600))),
    )
    .unwrap();
}
