use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tariff_core::{TariffCommand, MAX_ROUNDS};
use tariff_runtime::RoundController;

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("full game 20 rounds", |b| {
        b.iter(|| {
            let mut ctl = RoundController::seeded(42);
            for i in 0..MAX_ROUNDS {
                let cmd = if i % 4 == 3 {
                    TariffCommand::Decrease
                } else {
                    TariffCommand::Increase
                };
                let _ = black_box(ctl.advance(cmd));
            }
            black_box(ctl.final_score())
        })
    });
}

fn bench_view(c: &mut Criterion) {
    let mut ctl = RoundController::seeded(7);
    for _ in 0..10 {
        let _ = ctl.increase_tariff();
    }
    c.bench_function("round view", |b| b.iter(|| black_box(ctl.view())));
}

criterion_group!(benches, bench_full_game, bench_view);
criterion_main!(benches);
