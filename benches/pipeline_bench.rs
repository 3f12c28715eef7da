//! Benchmark for the mixing pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_bigint::BigUint;
use shakemix::{mix, OsEntropy, PipelineConfig};

fn bench_mix_default(c: &mut Criterion) {
    let cfg = PipelineConfig::default();

    c.bench_function("mix_default", |b| {
        b.iter(|| mix(black_box(BigUint::from(0xDEADBEEFu64)), &cfg, &mut OsEntropy))
    });
}

fn bench_mix_varying_seed(c: &mut Criterion) {
    let cfg = PipelineConfig {
        hash1_len: 64,
        hash1_loops: 2,
        hash2_len: 32,
        hash4_len: 64,
        ..PipelineConfig::default()
    };

    c.bench_function("mix_varying", |b| {
        let mut seed: u64 = 0;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            mix(black_box(BigUint::from(seed)), &cfg, &mut OsEntropy)
        })
    });
}

criterion_group!(benches, bench_mix_default, bench_mix_varying_seed);
criterion_main!(benches);
