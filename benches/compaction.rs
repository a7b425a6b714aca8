use coomat::{CompactionPolicy, SparseMatrix, encode_matrix_with_vector};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Assemble a 1D Laplacian the way element loops do: many small additive
/// contributions, each cell touched from two neighbouring elements.
fn assemble(n: usize, policy: CompactionPolicy) -> SparseMatrix {
    let mut a = SparseMatrix::with_policy(n, n, policy).unwrap();
    for e in 0..n - 1 {
        a.add(e, e, 1.0).unwrap();
        a.add(e, e + 1, -1.0).unwrap();
        a.add(e + 1, e, -1.0).unwrap();
        a.add(e + 1, e + 1, 1.0).unwrap();
    }
    a.compact();
    a
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");
    for &n in &[100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("dimension_bound", n), &n, |b, &n| {
            b.iter(|| assemble(black_box(n), CompactionPolicy::DimensionBound))
        });
        group.bench_with_input(BenchmarkId::new("manual", n), &n, |b, &n| {
            b.iter(|| assemble(black_box(n), CompactionPolicy::Manual))
        });
    }
    group.finish();
}

fn bench_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("at");
    for &n in &[10usize, 20, 40, 80] {
        let mut s = SparseMatrix::new(n, n).unwrap();
        for i in n / 2 - 4..n / 2 + 4 {
            for j in n / 2 - 4..n / 2 + 4 {
                s.set(i, j, (i + j * 5) as f64).unwrap();
            }
        }
        group.bench_with_input(BenchmarkId::new("by_row", n), &s, |b, s| {
            b.iter(|| (0..n).map(|j| s.at(n / 3, j).unwrap()).sum::<f64>())
        });
        group.bench_with_input(BenchmarkId::new("by_column", n), &s, |b, s| {
            b.iter(|| (0..n).map(|i| s.at(i, n / 3).unwrap()).sum::<f64>())
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let n = 10_000;
    let a = assemble(n, CompactionPolicy::DimensionBound);
    let rhs = vec![1.0; n];
    c.bench_function("encode 1d laplacian", |b| {
        b.iter(|| encode_matrix_with_vector(black_box(&a), black_box(&rhs)).unwrap())
    });
}

criterion_group!(benches, bench_assembly, bench_at, bench_encode);
criterion_main!(benches);
