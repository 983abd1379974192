//! Scaling of the elimination phase with the number of workers
//!
//! Run with: cargo bench --bench elimination_scaling

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use math_audio_gauss::{EliminationConfig, GaussianElimination, LinearSystem, Schedule};

const SIZE: usize = 256;

fn bench_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("elimination_workers");
    group.sample_size(10);

    let max_workers = std::thread::available_parallelism().map_or(4, |n| n.get());
    let mut counts = vec![1, 2, 4, 8];
    counts.retain(|&w| w <= max_workers.max(1));

    for workers in counts {
        let gauss = GaussianElimination::new(EliminationConfig {
            workers,
            ..Default::default()
        })
        .expect("pool should build");

        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, _| {
            b.iter_batched(
                || LinearSystem::generate(SIZE).expect("valid size"),
                |system| black_box(gauss.eliminate(system).expect("regular system")),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_schedules(c: &mut Criterion) {
    let mut group = c.benchmark_group("elimination_schedule");
    group.sample_size(10);

    for schedule in Schedule::ALL {
        let gauss = GaussianElimination::new(EliminationConfig {
            workers: 4,
            schedule,
            progress_interval: 0,
        })
        .expect("pool should build");

        group.bench_function(format!("{:?}", schedule), |b| {
            b.iter_batched(
                || LinearSystem::generate(SIZE).expect("valid size"),
                |system| black_box(gauss.eliminate(system).expect("regular system")),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_workers, bench_schedules);
criterion_main!(benches);
