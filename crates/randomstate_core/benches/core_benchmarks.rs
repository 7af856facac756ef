//! Criterion benchmarks for the bit generator cores.
//!
//! Measures raw 32-bit, 64-bit and double throughput for every algorithm,
//! plus the cost of jumping and snapshotting.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use randomstate_core::{Algorithm, BitGenerator, Generator};

const BATCH: usize = 10_000;

/// Benchmark raw word generation per algorithm.
fn bench_raw_words(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_words");
    group.throughput(Throughput::Elements(BATCH as u64));

    for alg in Algorithm::ALL {
        let mut rng = Generator::new(alg, 42).unwrap();
        group.bench_function(BenchmarkId::new("next_uint32", alg.name()), |b| {
            b.iter(|| {
                for _ in 0..BATCH {
                    black_box(rng.next_uint32());
                }
            });
        });

        let mut rng = Generator::new(alg, 42).unwrap();
        group.bench_function(BenchmarkId::new("next_uint64", alg.name()), |b| {
            b.iter(|| {
                for _ in 0..BATCH {
                    black_box(rng.next_uint64());
                }
            });
        });

        // Batch fill into a pre-allocated buffer
        let mut rng = Generator::new(alg, 42).unwrap();
        let mut buffer = vec![0.0; BATCH];
        group.bench_function(BenchmarkId::new("fill_double", alg.name()), |b| {
            b.iter(|| {
                rng.fill_double(&mut buffer);
                black_box(&buffer);
            });
        });
    }

    group.finish();
}

/// Benchmark jump-ahead for the jumpable algorithms.
fn bench_jump(c: &mut Criterion) {
    let mut group = c.benchmark_group("jump");

    for alg in Algorithm::ALL.into_iter().filter(|a| a.is_jumpable()) {
        let mut rng = Generator::new(alg, 42).unwrap();
        group.bench_function(BenchmarkId::from_parameter(alg.name()), |b| {
            b.iter(|| rng.jump().unwrap());
        });
    }

    group.finish();
}

/// Benchmark snapshot capture and restore.
fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for alg in Algorithm::ALL {
        let mut rng = Generator::new(alg, 42).unwrap();
        let snap = rng.snapshot();
        group.bench_function(BenchmarkId::new("capture", alg.name()), |b| {
            b.iter(|| black_box(rng.snapshot()));
        });
        group.bench_function(BenchmarkId::new("restore", alg.name()), |b| {
            b.iter(|| rng.restore(black_box(&snap)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_raw_words, bench_jump, bench_snapshot);
criterion_main!(benches);
