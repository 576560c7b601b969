use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orrery::kepler::{solve_kepler_equation, wrap_pi, KeplerSolver};

/// Uniform mean anomaly in (−π, π]
#[inline]
fn rand_mean_anomaly(rng: &mut StdRng) -> f64 {
    wrap_pi(rng.random::<f64>() * std::f64::consts::TAU)
}

fn bench_with(c: &mut Criterion, name: &str, seed: u64, ecc: std::ops::Range<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let solver = KeplerSolver::default();
    let samples = 10_000usize;

    c.bench_function(name, |b| {
        b.iter_batched(
            || {
                // Pre-generate inputs to avoid RNG cost in the timed section
                (0..samples)
                    .map(|_| (rng.random_range(ecc.clone()), rand_mean_anomaly(&mut rng)))
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (e, m) in cases {
                    let ecc_anom = solve_kepler_equation(black_box(e), black_box(m), &solver);
                    black_box(ecc_anom.ok());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Planetary regime: e ∈ [0, 0.25)
fn bench_planetary(c: &mut Criterion) {
    bench_with(c, "solve_kepler_equation/planetary_e<0.25", 0xDEADBEEF, 0.0..0.25);
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.9)
fn bench_high_e(c: &mut Criterion) {
    bench_with(c, "solve_kepler_equation/high_e_0.7..0.9", 0xBADF00D, 0.7..0.9);
}

/// Near-circular regime: e ≈ 1e-12
fn bench_near_circular(c: &mut Criterion) {
    bench_with(
        c,
        "solve_kepler_equation/near_circular_e=1e-12",
        0xFEEDFACE,
        1e-12..2e-12,
    );
}

/// Fixed slow case near perihelion with a high eccentricity.
fn bench_fixed_stress(c: &mut Criterion) {
    let solver = KeplerSolver::default();
    let (e, m) = (0.89_f64, 0.05_f64);

    c.bench_function("solve_kepler_equation/fixed_stress_case", |b| {
        b.iter(|| {
            let ecc_anom = solve_kepler_equation(black_box(e), black_box(m), &solver);
            black_box(ecc_anom.ok());
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_planetary, bench_high_e, bench_near_circular, bench_fixed_stress
);
criterion_main!(benches);
