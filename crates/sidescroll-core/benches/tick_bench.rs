use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use sidescroll_core::{Buttons, Game, GameConfig, InputFrame};

fn step_idle(c: &mut Criterion) {
    let mut game = Game::new(GameConfig::default(), 42).expect("reference game");
    c.bench_function("step_idle", |b| {
        b.iter(|| black_box(game.step(black_box(InputFrame::idle()))));
    });
}

fn step_running_and_shooting(c: &mut Criterion) {
    let input = InputFrame::new(Buttons::RIGHT | Buttons::SHOOT, Buttons::SHOOT);
    c.bench_function("step_600_ticks_running", |b| {
        b.iter_batched(
            || Game::new(GameConfig::default(), 42).expect("reference game"),
            |mut game| {
                for _ in 0..600 {
                    game.step(black_box(input));
                }
                black_box(game.render_frame())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, step_idle, step_running_and_shooting);
criterion_main!(benches);
