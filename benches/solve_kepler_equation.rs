use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orrery::kepler::{solve_eccentric_anomaly, KeplerSolverConfig};
use orrery::orrery::Orrery;
use orrery::position::PositionMode;
use orrery::time::epoch_from_julian_date;

/// Uniform random in [0, 2π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * std::f64::consts::TAU
}

fn bench_regime(c: &mut Criterion, name: &str, seed: u64, e_min: f64, e_max: f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let samples = 10_000usize;
    let config = KeplerSolverConfig::default();

    c.bench_function(name, |b| {
        b.iter_batched(
            || {
                // Pre-generate inputs to avoid RNG cost in the timed section
                (0..samples)
                    .map(|_| (rand_angle(&mut rng), rng.random_range(e_min..=e_max)))
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (m, e) in cases {
                    black_box(solve_eccentric_anomaly(black_box(m), black_box(e), &config));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Planetary regime: e ∈ [0.0, 0.25]
fn bench_planetary(c: &mut Criterion) {
    bench_regime(c, "solve_kepler_equation/planetary_e<=0.25", 0xDEADBEEF, 0.0, 0.25);
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.95]
fn bench_high_e(c: &mut Criterion) {
    bench_regime(c, "solve_kepler_equation/high_e_0.7..0.95", 0xBADF00D, 0.7, 0.95);
}

/// One animation frame: every body of the built-in table at a random moment.
fn bench_frame(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);
    let orrery = Orrery::default();

    c.bench_function("orrery/positions_at_frame", |b| {
        b.iter_batched(
            || epoch_from_julian_date(rng.random_range(2_378_497.0..2_470_000.0)),
            |moment| black_box(orrery.positions_at(&moment, PositionMode::Elliptical)),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_planetary, bench_high_e, bench_frame
);
criterion_main!(benches);
