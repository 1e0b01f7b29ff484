//! Per-frame CPU cost: pose interpolation, instance building and label
//! projection across scroll progress.

use std::hint::black_box;

use atelier::{
    animation::interpolate,
    garment::build_garment,
    options::Options,
    overlay::LabelOverlay,
    renderer::InstanceBatches,
    scroll::Progress,
    ExplodedViewEngine,
};
use criterion::{criterion_group, criterion_main, Criterion};
use glam::{Mat4, UVec2, Vec3};

fn interpolate_benchmark(c: &mut Criterion) {
    let garment = build_garment();
    let mut group = c.benchmark_group("interpolate");
    for p in [0.0_f32, 0.5, 1.0] {
        let progress = Progress::new(p);
        let _ = group.bench_function(format!("p={p}"), |b| {
            b.iter(|| black_box(interpolate(&garment, black_box(progress))));
        });
    }
    group.finish();
}

fn instance_benchmark(c: &mut Criterion) {
    let garment = build_garment();
    let poses = interpolate(&garment, Progress::new(0.6));
    let object = garment.object().matrix(0.3);
    let _ = c.bench_function("instance_batches_build", |b| {
        b.iter(|| black_box(InstanceBatches::build(&garment, &poses, object)));
    });
}

fn label_benchmark(c: &mut Criterion) {
    let garment = build_garment();
    let overlay = LabelOverlay::with_defaults(&garment);
    let progress = Progress::new(0.8);
    let poses = interpolate(&garment, progress);
    let eye = Vec3::new(0.0, 1.2, 5.4);
    let view_proj = Mat4::perspective_rh(0.7, 16.0 / 9.0, 0.1, 1000.0)
        * Mat4::look_at_rh(eye, eye - Vec3::Z, Vec3::Y);
    let _ = c.bench_function("label_projection", |b| {
        b.iter(|| {
            black_box(overlay.update(
                &poses,
                Mat4::IDENTITY,
                view_proj,
                UVec2::new(1280, 720),
                progress,
            ))
        });
    });
}

fn full_frame_benchmark(c: &mut Criterion) {
    let mut engine = ExplodedViewEngine::new(Options::default(), 1280, 720);
    let _ = engine.set_progress(0.45);
    let _ = c.bench_function("frame_at", |b| {
        b.iter(|| black_box(engine.frame_at(black_box(2.5))));
    });
}

criterion_group!(
    benches,
    interpolate_benchmark,
    instance_benchmark,
    label_benchmark,
    full_frame_benchmark
);
criterion_main!(benches);
