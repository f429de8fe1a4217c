use criterion::BenchmarkId;
use criterion::Throughput;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use incremental_assignment::{AssignmentSolver, PrimalDualSolver};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const MAX_COST: i64 = 1000;
const PENALTY: i64 = 1_000_000;
const REMOVALS: usize = 4;

fn gen_dense_input(seed: u64, size: usize) -> PrimalDualSolver<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let between = Uniform::from(0..MAX_COST);
    let mut solver = PrimalDualSolver::new(size);
    for row in 0..size {
        for col in 0..size {
            solver.set_cost(row, col, between.sample(&mut rng)).unwrap();
        }
    }
    solver
}

/// The assigned arcs of the first few rows, the worst case for repair work.
fn assigned_arcs(solver: &PrimalDualSolver<i64>, count: usize) -> Vec<(usize, usize)> {
    (0..count)
        .map(|row| {
            let col = (0..solver.size())
                .find(|&col| solver.is_assigned(row, col).unwrap())
                .unwrap();
            (row, col)
        })
        .collect()
}

fn bench_initial_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("initial_solve");
    for &size in [50usize, 100, 200].iter() {
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || gen_dense_input(size as u64, size),
                |mut solver| solver.solve().unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_repair_after_removals(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair_after_removals");
    for &size in [50usize, 100, 200].iter() {
        group.bench_with_input(BenchmarkId::new("incremental", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut solver = gen_dense_input(size as u64, size);
                    solver.solve().unwrap();
                    let removals = assigned_arcs(&solver, REMOVALS);
                    (solver, removals)
                },
                |(mut solver, removals)| {
                    for (row, col) in removals {
                        solver.remove_arc_with_cost(row, col, PENALTY).unwrap();
                    }
                    solver.solve().unwrap()
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("from_scratch", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut solved = gen_dense_input(size as u64, size);
                    solved.solve().unwrap();
                    let mut fresh = gen_dense_input(size as u64, size);
                    for (row, col) in assigned_arcs(&solved, REMOVALS) {
                        fresh.set_cost(row, col, PENALTY).unwrap();
                    }
                    fresh
                },
                |mut fresh| fresh.solve().unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_initial_solve, bench_repair_after_removals);
criterion_main!(benches);
