use criterion::{criterion_group, criterion_main, Criterion};

use mcintegrate::{importance_sample, integrate, interval, ChainParams, Seeding};

use rand::Rng;
use rand_pcg::Pcg64;

fn rng() -> Pcg64 {
    Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96)
}

fn plain_benchmark(c: &mut Criterion) {
    let limits = vec![interval(-1.0, 1.0)];
    let rng = rng();

    c.bench_function("plain x^2, 100k calls", |b| {
        b.iter(|| {
            integrate(
                &|x: &[f64]| x[0] * x[0],
                &limits,
                None,
                100_000,
                1,
                &rng,
                Seeding::Ambient,
            )
            .unwrap()
        })
    });
}

fn importance_benchmark(c: &mut Criterion) {
    let limits = vec![interval(0.0, 1.0)];
    let params = ChainParams {
        calls: 10_000,
        cores: 1,
        burn_in: 1_000,
        skip: 1,
    };
    let rng = rng();

    c.bench_function("importance exp target, 10k calls", |b| {
        b.iter(|| {
            importance_sample(
                &|x: &[f64]| 83.0 * (-x[0]).exp(),
                &|x: &[f64]| if x[0] >= 0.0 { (-x[0]).exp() } else { 0.0 },
                &|r: &mut Pcg64| vec![r.gen::<f64>()],
                &limits,
                &params,
                &rng,
                Seeding::Ambient,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, plain_benchmark, importance_benchmark);
criterion_main!(benches);
