use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mindeg_tree::MinDegBTreeSet;
use std::collections::BTreeSet;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for a deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn filled_set<const T: usize>(keys: &[i64]) -> MinDegBTreeSet<i64, T> {
    let mut set = MinDegBTreeSet::new();
    for &key in keys {
        set.insert(key);
    }
    set
}

// ─── Insert benchmarks ──────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    for (workload, keys) in [
        ("insert_ordered", ordered_keys(N)),
        ("insert_reverse", reverse_ordered_keys(N)),
        ("insert_random", random_keys(N)),
    ] {
        let mut group = c.benchmark_group(workload);

        group.bench_function(BenchmarkId::new("MinDegBTreeSet<t=2>", N), |b| {
            b.iter(|| filled_set::<2>(&keys));
        });

        group.bench_function(BenchmarkId::new("MinDegBTreeSet<t=16>", N), |b| {
            b.iter(|| filled_set::<16>(&keys));
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &key in &keys {
                    set.insert(key);
                }
                set
            });
        });

        group.finish();
    }
}

// ─── Lookup benchmarks ──────────────────────────────────────────────────────

fn bench_contains(c: &mut Criterion) {
    let keys = random_keys(N);
    let md_set: MinDegBTreeSet<i64, 16> = filled_set(&keys);
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("contains_random");

    group.bench_function(BenchmarkId::new("MinDegBTreeSet<t=16>", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for key in &keys {
                hits += usize::from(md_set.contains(key));
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for key in &keys {
                hits += usize::from(bt_set.contains(key));
            }
            hits
        });
    });

    group.finish();
}

// ─── Remove benchmarks ──────────────────────────────────────────────────────

fn bench_remove(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("remove_random");

    group.bench_function(BenchmarkId::new("MinDegBTreeSet<t=16>", N), |b| {
        b.iter_batched(
            || filled_set::<16>(&keys),
            |mut set| {
                for key in &keys {
                    set.remove(key);
                }
                set
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                for key in &keys {
                    set.remove(key);
                }
                set
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ─── Clone benchmarks ───────────────────────────────────────────────────────

fn bench_clone(c: &mut Criterion) {
    let keys = random_keys(N);
    let md_set: MinDegBTreeSet<i64, 16> = filled_set(&keys);
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("clone");

    group.bench_function(BenchmarkId::new("MinDegBTreeSet<t=16>", N), |b| {
        b.iter(|| md_set.clone());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| bt_set.clone());
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_contains, bench_remove, bench_clone);
criterion_main!(benches);
