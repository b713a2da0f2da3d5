use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowgen::{CUSTOM_EPOCH, MonotonicClock, SnowflakeGenerator, SystemClock, TimeSource};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Benchmarks single-threaded generation against a real clock, including
/// waits when a millisecond's sequence runs out.
fn bench_generator<T>(c: &mut Criterion, group_name: &str, clock: impl Fn() -> T)
where
    T: TimeSource,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let generator = SnowflakeGenerator::with_clock(0, 0, CUSTOM_EPOCH, clock())
                .expect("valid configuration");
            let start = Instant::now();

            for _ in 0..iters {
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks one generator shared by many threads.
fn bench_generator_threaded<T>(c: &mut Criterion, group_name: &str, clock: impl Fn() -> T)
where
    T: TimeSource + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8, num_cpus::get()] {
        group.throughput(Throughput::Elements((TOTAL_IDS * thread_count) as u64));

        group.bench_function(
            format!("elems/{TOTAL_IDS}/threads/{thread_count}"),
            |b| {
                b.iter_custom(|iters| {
                    let generator = SnowflakeGenerator::with_clock(0, 0, CUSTOM_EPOCH, clock())
                        .expect("valid configuration");
                    let barrier = Arc::new(Barrier::new(thread_count + 1));

                    scope(|s| {
                        for _ in 0..thread_count {
                            let barrier = Arc::clone(&barrier);
                            let generator = &generator;
                            s.spawn(move || {
                                barrier.wait();
                                for _ in 0..iters {
                                    for _ in 0..TOTAL_IDS {
                                        black_box(generator.next_id());
                                    }
                                }
                            });
                        }

                        barrier.wait();
                        let start = Instant::now();
                        // Scope joins every worker before returning.
                        start
                    })
                    .elapsed()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_system_clock(c: &mut Criterion) {
    bench_generator(c, "system_clock/sequential", || SystemClock);
}

fn benchmark_monotonic_clock(c: &mut Criterion) {
    bench_generator(c, "monotonic_clock/sequential", MonotonicClock::default);
}

fn benchmark_system_clock_threaded(c: &mut Criterion) {
    bench_generator_threaded(c, "system_clock/threaded", || SystemClock);
}

fn benchmark_monotonic_clock_threaded(c: &mut Criterion) {
    bench_generator_threaded(c, "monotonic_clock/threaded", MonotonicClock::default);
}

criterion_group!(
    benches,
    benchmark_system_clock,
    benchmark_monotonic_clock,
    benchmark_system_clock_threaded,
    benchmark_monotonic_clock_threaded,
);
criterion_main!(benches);
