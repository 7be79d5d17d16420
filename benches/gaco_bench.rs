//! Criterion benchmarks for the GACO engine.
//!
//! Uses synthetic problems (Sphere, Rosenbrock) to measure pure engine
//! overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gaco::problems::{Rosenbrock, Sphere};
use gaco::{Gaco, GacoConfig, Population};

fn bench_sphere_by_dim(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaco_sphere");
    for dim in [2usize, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(dim), &dim, |b, &dim| {
            let config = GacoConfig::default()
                .with_generations(20)
                .with_kernel_size(15)
                .with_seed(23);
            b.iter(|| {
                let mut engine = Gaco::new(config.clone()).unwrap();
                let pop = Population::random(Sphere { dim }, 40, 23).unwrap();
                black_box(engine.evolve(pop).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_rosenbrock_by_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaco_rosenbrock_kernel");
    for ker in [5u32, 15, 30] {
        group.bench_with_input(BenchmarkId::from_parameter(ker), &ker, |b, &ker| {
            let config = GacoConfig::default()
                .with_generations(20)
                .with_kernel_size(ker)
                .with_seed(23);
            b.iter(|| {
                let mut engine = Gaco::new(config.clone()).unwrap();
                let pop = Population::random(Rosenbrock { dim: 5 }, 60, 23).unwrap();
                black_box(engine.evolve(pop).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sphere_by_dim, bench_rosenbrock_by_kernel);
criterion_main!(benches);
