use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{
    apply_large_runtime_config, apply_medium_runtime_config, apply_small_runtime_config,
    default_rng, iteration_rng,
};
use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, BenchmarkId, Criterion};
use rand::Rng;

use perm_seq::{Command, ImplicitTreap, NaiveSequence, PermutationSequence, XorShift64};

const SIZES: [usize; 4] = [1_000, 10_000, 100_000, 1_000_000];
const NAIVE_MAX_SIZE: usize = 10_000;
const OPS_PER_ITER: usize = 100;
const WORKLOAD_WEIGHTS: &[(Workload, u32)] = &[
    (Workload::Sum, 30),
    (Workload::Set, 20),
    (Workload::Insert, 20),
    (Workload::NextPermutation, 30),
];

#[derive(Clone, Copy, Debug)]
pub enum Workload {
    Sum,
    Set,
    Insert,
    NextPermutation,
    Mixed,
}

#[derive(Clone, Copy)]
pub enum Values {
    /// Keys in `0..=9`, so duplicates are everywhere.
    Small,
    /// `n - 1` down to `0`: the whole sequence is one non-increasing run.
    Descending,
}

fn generate_initial<R: Rng + ?Sized>(size: usize, values: Values, rng: &mut R) -> Vec<i64> {
    match values {
        Values::Small => (0..size).map(|_| rng.random_range(0..=9)).collect(),
        Values::Descending => (0..size).rev().map(|v| v as i64).collect(),
    }
}

fn choose<R: Rng + ?Sized>(rng: &mut R, workload: Workload) -> Workload {
    if !matches!(workload, Workload::Mixed) {
        return workload;
    }
    let total: u32 = WORKLOAD_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for &(kind, weight) in WORKLOAD_WEIGHTS {
        if roll < weight {
            return kind;
        }
        roll -= weight;
    }
    Workload::Sum
}

fn generate_ops<R: Rng + ?Sized>(workload: Workload, len: usize, rng: &mut R) -> Vec<Command> {
    let mut len = len;
    let mut ops = Vec::with_capacity(OPS_PER_ITER);
    for _ in 0..OPS_PER_ITER {
        let left = rng.random_range(1..=len);
        let right = rng.random_range(left..=len);
        let op = match choose(rng, workload) {
            Workload::Set => Command::Set {
                position: left,
                value: rng.random_range(0..=9),
            },
            Workload::Insert => {
                len += 1;
                Command::Insert {
                    position: left,
                    value: rng.random_range(0..=9),
                }
            }
            Workload::NextPermutation => Command::NextPermutation { left, right },
            Workload::Sum | Workload::Mixed => Command::Sum { left, right },
        };
        ops.push(op);
    }
    ops
}

fn apply_runtime_config_for_size<M: Measurement>(size: usize, group: &mut BenchmarkGroup<'_, M>) {
    if size <= 10_000 {
        apply_small_runtime_config(group);
    } else if size <= 100_000 {
        apply_medium_runtime_config(group);
    } else {
        apply_large_runtime_config(group);
    }
}

pub fn bench_workload(c: &mut Criterion, workload: Workload, values: Values) {
    let group_name = format!("perm_seq/{}/{}", workload_label(workload), values_label(values));
    let mut group = c.benchmark_group(group_name);
    let mut init_rng = default_rng();

    for &size in &SIZES {
        apply_runtime_config_for_size(size, &mut group);
        let initial = generate_initial(size, values, &mut init_rng);

        bench_sequence(&mut group, "treap", size, workload, || {
            ImplicitTreap::from_slice_with(&initial, XorShift64::new(size as u64))
        });
        if size <= NAIVE_MAX_SIZE {
            bench_sequence(&mut group, "naive", size, workload, || {
                NaiveSequence::from(initial.clone())
            });
        }
    }

    group.finish();
}

fn bench_sequence<S, M, F>(
    group: &mut BenchmarkGroup<'_, M>,
    label: &str,
    size: usize,
    workload: Workload,
    make: F,
) where
    S: PermutationSequence,
    M: Measurement<Value = Duration>,
    F: FnOnce() -> S,
{
    let mut seq = make();
    group.bench_function(BenchmarkId::new(label, size), |bencher| {
        bencher.iter_custom(|iters| {
            let mut total = Duration::ZERO;
            // Reuse the same sequence; regenerate ops per iteration from a fixed seed.
            for iter in 0..iters {
                let mut op_rng = iteration_rng(iter);
                let ops = generate_ops(workload, seq.len(), &mut op_rng);
                let start = Instant::now();
                for op in &ops {
                    black_box(op.apply(&mut seq).ok());
                }
                total += start.elapsed();
            }
            total
        })
    });
}

fn workload_label(workload: Workload) -> &'static str {
    match workload {
        Workload::Sum => "sum",
        Workload::Set => "set",
        Workload::Insert => "insert",
        Workload::NextPermutation => "next_permutation",
        Workload::Mixed => "mixed",
    }
}

fn values_label(values: Values) -> &'static str {
    match values {
        Values::Small => "small",
        Values::Descending => "descending",
    }
}
