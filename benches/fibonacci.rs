use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use memokit::ds::splay::SplayTree;
use memokit::memo::{HashMemo, fib};

const POINTS: [u32; 5] = [10, 50, 100, 150, 186];

fn bench_cold_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("fib/cold");
    for n in POINTS {
        group.throughput(Throughput::Elements(u64::from(n.max(1))));

        group.bench_with_input(BenchmarkId::new("hash", n), &n, |b, &n| {
            b.iter_batched(
                || HashMemo::new(),
                |mut memo| std::hint::black_box(fib(n, &mut memo)),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("splay", n), &n, |b, &n| {
            b.iter_batched(
                || SplayTree::new(),
                |mut memo| std::hint::black_box(fib(n, &mut memo)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_warm_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("fib/warm");
    for n in [100u32, 186] {
        group.bench_with_input(BenchmarkId::new("hash", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let mut memo = HashMemo::new();
                    fib(n, &mut memo);
                    memo
                },
                |mut memo| std::hint::black_box(fib(n, &mut memo)),
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("splay", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let mut memo = SplayTree::new();
                    fib(n, &mut memo);
                    memo
                },
                |mut memo| std::hint::black_box(fib(n, &mut memo)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cold_table, bench_warm_table);
criterion_main!(benches);
