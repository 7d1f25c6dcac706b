use aquarelle::{BrushSettings, Painting, Stamp};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;

fn stroked_painting(size: usize) -> Painting {
    let mut painting = Painting::new(size, size, 42);
    let brush = BrushSettings::default();
    let mut stamp = Stamp::Simple;
    let mid = size as f32 / 2.0;
    painting.begin_stroke(Vec2::new(mid * 0.5, mid), &mut stamp, &brush);
    painting.continue_stroke(Vec2::new(mid * 1.5, mid), &mut stamp, &brush);
    painting.end_stroke();
    painting
}

fn benchmark_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");

    for size in [150, 300, 600].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut painting = stroked_painting(size);
            b.iter(|| {
                black_box(painting.tick());
            });
        });
    }
    group.finish();
}

fn benchmark_full_stroke_lifecycle(c: &mut Criterion) {
    c.bench_function("stroke_to_baked_300", |b| {
        b.iter(|| {
            let mut painting = stroked_painting(300);
            // Run until the whole stroke has dried and baked
            for _ in 0..=(60 + painting.settings.drying_time as usize) {
                painting.tick();
            }
            black_box(painting.bake_dried());
        });
    });
}

fn benchmark_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("operations");

    group.bench_function("wet_map_deposit", |b| {
        let mut painting = stroked_painting(300);
        b.iter(|| {
            painting
                .wet_map
                .deposit(black_box(Vec2::new(150.0, 150.0)), 10.0, 25);
        });
    });

    group.bench_function("wet_map_decay", |b| {
        let mut painting = stroked_painting(300);
        b.iter(|| {
            painting.wet_map.decay(black_box(1.0 / 255.0));
        });
    });

    group.bench_function("resample_all", |b| {
        let mut painting = stroked_painting(300);
        b.iter(|| {
            for splat in painting.history.live.iter_mut() {
                splat.resample();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_tick,
    benchmark_full_stroke_lifecycle,
    benchmark_operations
);
criterion_main!(benches);
