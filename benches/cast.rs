use criterion::{Criterion, black_box, criterion_group, criterion_main};
use grid_caster::level;
use grid_caster::renderer::{self, Framebuffer, Viewport};
use grid_caster::settings::Settings;
use grid_caster::sim::SimulationState;
use grid_caster::vector::Vector2;

fn state() -> SimulationState {
    SimulationState::new(level::grid().unwrap(), Settings::default())
}

fn bench_single_ray(c: &mut Criterion) {
    let state = state();
    let caster = state.caster();

    c.bench_function("cast_single_ray", |b| {
        b.iter(|| caster.cast(black_box(Vector2::new(2.0, 2.0)), black_box(Vector2::new(1.0, 0.3))))
    });
}

fn bench_columns(c: &mut Criterion) {
    let state = state();

    c.bench_function("cast_800_columns", |b| {
        b.iter(|| renderer::cast_columns(black_box(&state), 800))
    });
}

fn bench_frame(c: &mut Criterion) {
    let state = state();
    let (w, h) = (800, 600);
    let vp = Viewport::new(w, h, 1);
    let mut px = vec![0u32; w * h];

    c.bench_function("render_frame_800x600", |b| {
        b.iter(|| renderer::render_frame(&mut Framebuffer::new(&mut px, w, h), &vp, &state))
    });
}

criterion_group!(benches, bench_single_ray, bench_columns, bench_frame);
criterion_main!(benches);
