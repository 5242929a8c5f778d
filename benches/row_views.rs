//! Row-view throughput on row-major versus column-major compressed storage.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::Rng;
use sparow::core::{ColumnMajor, RowMajor, RowVector};
use sparow::matrix::CompressedMatrix;
use sparow::vector::DynamicVector;
use sparow::views::{RowStrategy, row, row_mut};

const ROWS: usize = 200;
const COLUMNS: usize = 400;

fn random_matrix<SO: RowStrategy>() -> CompressedMatrix<f64, SO> {
    let mut rng = rand::thread_rng();
    let triplets: Vec<_> = (0..ROWS * 8)
        .map(|_| (rng.gen_range(0..ROWS), rng.gen_range(0..COLUMNS), rng.r#gen::<f64>()))
        .collect();
    CompressedMatrix::from_triplets(ROWS, COLUMNS, triplets)
}

fn row_sum<SO: RowStrategy>(m: &CompressedMatrix<f64, SO>) -> f64 {
    (0..ROWS)
        .map(|i| row(m, i).map(|r| r.iter().map(|(_, &v)| v).sum::<f64>()).unwrap_or(0.0))
        .sum()
}

fn bench_iteration(c: &mut Criterion) {
    let a = random_matrix::<RowMajor>();
    let b = random_matrix::<ColumnMajor>();
    let mut group = c.benchmark_group("row_iteration");
    group.bench_function("row_major", |ben| ben.iter(|| black_box(row_sum(black_box(&a)))));
    group.bench_function("column_major", |ben| ben.iter(|| black_box(row_sum(black_box(&b)))));
    group.finish();
}

fn bench_dense_assign(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut group = c.benchmark_group("row_dense_assign");
    for density in [0.05, 0.5] {
        let values = DynamicVector::<f64, RowVector>::from_vec(
            (0..COLUMNS)
                .map(|_| if rng.gen_bool(density) { rng.r#gen() } else { 0.0 })
                .collect(),
        );
        let mut a = CompressedMatrix::<f64, RowMajor>::new(ROWS, COLUMNS);
        group.bench_with_input(BenchmarkId::new("row_major", density), &values, |ben, v| {
            ben.iter(|| row_mut(&mut a, 7).and_then(|mut r| r.assign(black_box(v))))
        });
        let mut b = CompressedMatrix::<f64, ColumnMajor>::new(ROWS, COLUMNS);
        group.bench_with_input(BenchmarkId::new("column_major", density), &values, |ben, v| {
            ben.iter(|| row_mut(&mut b, 7).and_then(|mut r| r.assign(black_box(v))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_iteration, bench_dense_assign);
criterion_main!(benches);
