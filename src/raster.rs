//! Scanline polygon rasterization shared by the wet map, baking and the
//! offline renderer.

use glam::Vec2;
use std::f32::consts::TAU;

/// Vertices of a regular polygon approximating a circular brush dab.
pub fn regular_polygon(center: Vec2, radius: f32, vertex_count: usize) -> Vec<Vec2> {
    (0..vertex_count)
        .map(|i| {
            let angle = i as f32 * TAU / vertex_count as f32;
            center + radius * Vec2::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// Even-odd scanline fill of a closed polygon, invoking `cell` once for every
/// covered grid cell inside `width` x `height`. Cells are tested at their
/// centres.
pub fn fill_polygon(points: &[Vec2], width: usize, height: usize, mut cell: impl FnMut(usize, usize)) {
    if points.len() < 3 {
        return;
    }

    let y_min = points
        .iter()
        .fold(f32::INFINITY, |m, p| m.min(p.y))
        .floor()
        .max(0.0) as usize;
    let y_max = points
        .iter()
        .fold(f32::NEG_INFINITY, |m, p| m.max(p.y))
        .ceil()
        .min(height as f32) as usize;

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());

    for y in y_min..y_max {
        let scan = y as f32 + 0.5;
        crossings.clear();

        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            // Half-open edge interval so shared endpoints count once
            if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                let t = (scan - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            let x_start = pair[0].round().max(0.0) as usize;
            let x_end = (pair[1].round().min(width as f32)) as usize;
            for x in x_start..x_end {
                cell(x, y);
            }
        }
    }
}
