use criterion::{black_box, criterion_group, criterion_main, Criterion};

use oled_tetris::core::{Engine, FieldController, SimpleRng};
use oled_tetris::grid::BitGrid;
use oled_tetris::types::InputSnapshot;

fn bench_engine_tick(c: &mut Criterion) {
    let mut engine = Engine::new(Box::new(SimpleRng::new(12345)));
    engine.tick(&InputSnapshot {
        confirm_1: true,
        ..InputSnapshot::IDLE
    });
    engine.tick(&InputSnapshot::IDLE);

    c.bench_function("engine_tick_10ms", |b| {
        b.iter(|| {
            engine.tick(black_box(&InputSnapshot::IDLE));
        })
    });
}

fn bench_grid_shift(c: &mut Criterion) {
    let mut grid = BitGrid::new();
    grid.fill_rect(0, 0, 64, 64);

    c.bench_function("grid_shift", |b| {
        b.iter(|| {
            grid.shift(black_box(1), black_box(0));
            grid.shift(black_box(-1), black_box(0));
        })
    });
}

fn bench_grid_overlap(c: &mut Criterion) {
    let field = FieldController::new();
    let mut piece = BitGrid::new();
    piece.fill_rect(5, 5, 2, 2);

    c.bench_function("grid_overlap", |b| {
        b.iter(|| black_box(piece.overlaps(field.bitmap())))
    });
}

fn bench_lock_with_quad_erase(c: &mut Criterion) {
    let mut piece = BitGrid::new();
    for row in 20..=23 {
        for col in 1..=10 {
            piece.write(row, col, true);
        }
    }

    c.bench_function("lock_quad_erase", |b| {
        b.iter(|| {
            let mut field = FieldController::new();
            let mut landed = piece.clone();
            black_box(field.lock(&mut landed))
        })
    });
}

criterion_group!(
    benches,
    bench_engine_tick,
    bench_grid_shift,
    bench_grid_overlap,
    bench_lock_with_quad_erase
);
criterion_main!(benches);
