//! Allocation throughput benchmark.
//!
//! Measures a full solve (rounds + normalization) on seeded random
//! populations of increasing size, and a single allocation round.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use thrust_alloc::allocator::Allocator;
use thrust_alloc::builder::RegistryBuilder;
use thrust_alloc::config::{GeneratorConfig, StopRule};
use thrust_alloc::registry::Registry;

fn population(size: usize, seed: u64) -> Registry {
    let config = GeneratorConfig {
        min_actuators: size,
        max_actuators: size,
        ..GeneratorConfig::default()
    };
    RegistryBuilder::random(&config, &mut StdRng::seed_from_u64(seed))
        .expect("generator config is valid")
        .build()
        .expect("generated registry is valid")
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for size in [4usize, 16, 64, 256] {
        let registry = population(size, 7);
        for rule in [StopRule::FirstImperfect, StopRule::Exhaustive] {
            group.bench_with_input(
                BenchmarkId::new(rule.to_string(), size),
                &registry,
                |b, registry| {
                    b.iter(|| {
                        let mut r = registry.clone();
                        let solution = Allocator::with_stop_rule(&mut r, rule).solve();
                        black_box(solution)
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_single_round(c: &mut Criterion) {
    let registry = population(64, 11);
    c.bench_function("allocation_round_64", |b| {
        b.iter(|| {
            let mut r = registry.clone();
            let result = Allocator::new(&mut r).run_allocation_round();
            black_box(result)
        });
    });
}

criterion_group!(benches, bench_solve, bench_single_round);
criterion_main!(benches);
