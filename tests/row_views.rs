//! Tests for row views over compressed matrices of both storage orders.
//!
//! Every random test runs the same sequence of operations on a row-major and a
//! column-major matrix and checks that both agree with a plain dense reference.

use approx::assert_relative_eq;
use rand::Rng;
use sparow::config::GrowthOptions;
use sparow::core::{ColumnMajor, Descriptor, Matrix, Operand, RowMajor, RowVector, SparseMatrix, SparseVector};
use sparow::error::SpError;
use sparow::matrix::CompressedMatrix;
use sparow::vector::{CompressedVector, DynamicVector};
use sparow::views::{RowStrategy, SparseRow, row, row_mut};

fn random_dense(n: usize, density: f64) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| if rng.gen_bool(density) { rng.gen_range(-10.0..10.0) } else { 0.0 })
        .collect()
}

fn as_row(values: &[f64]) -> DynamicVector<f64, RowVector> {
    DynamicVector::from_vec(values.to_vec())
}

fn stored<SO: RowStrategy>(m: &CompressedMatrix<f64, SO>, i: usize) -> Vec<(usize, f64)> {
    row(m, i).unwrap().iter().map(|(j, &v)| (j, v)).collect()
}

fn expected(dense: &[f64]) -> Vec<(usize, f64)> {
    dense.iter().copied().enumerate().filter(|&(_, v)| v != 0.0).collect()
}

fn dense_round_trip<SO: RowStrategy>(rows: usize, columns: usize) {
    let mut m = CompressedMatrix::<f64, SO>::new(rows, columns);
    let mut reference = vec![vec![0.0; columns]; rows];
    for i in 0..rows {
        let values = random_dense(columns, 0.3);
        row_mut(&mut m, i).unwrap().assign(&as_row(&values)).unwrap();
        reference[i] = values;
    }
    for (i, r) in reference.iter().enumerate() {
        assert_eq!(stored(&m, i), expected(r));
        assert_eq!(row(&m, i).unwrap().non_zeros(), expected(r).len());
    }
    assert_eq!(m.to_dense_rows(), reference);
}

/// Assigning random dense rows stores exactly their non-zero entries.
#[test]
fn random_dense_assignment_both_orders() {
    dense_round_trip::<RowMajor>(8, 20);
    dense_round_trip::<ColumnMajor>(8, 20);
}

/// Scaling a row touches that row only and matches the dense computation.
#[test]
fn random_scaling_both_orders() {
    fn check<SO: RowStrategy>(values: &[Vec<f64>], s: f64) {
        let triplets = values.iter().enumerate().flat_map(|(i, r)| {
            r.iter().enumerate().filter(|&(_, &v)| v != 0.0).map(move |(j, &v)| (i, j, v))
        });
        let mut m = CompressedMatrix::<f64, SO>::from_triplets(values.len(), values[0].len(), triplets);
        let mut r = row_mut(&mut m, 1).unwrap();
        r *= s;
        r /= 2.0f64;
        for (i, dense) in values.iter().enumerate() {
            let factor = if i == 1 { s / 2.0 } else { 1.0 };
            for (j, &v) in dense.iter().enumerate() {
                assert_relative_eq!(m.get(i, j), v * factor, max_relative = 1e-12);
            }
        }
    }
    let values: Vec<Vec<f64>> = (0..4).map(|_| random_dense(12, 0.5)).collect();
    let s: f64 = rand::thread_rng().gen_range(1.0..4.0);
    check::<RowMajor>(&values, s);
    check::<ColumnMajor>(&values, s);
}

/// A row view is a sparse row vector whose size is the column count.
#[test]
fn descriptor_and_size() {
    let mut m = CompressedMatrix::<i32, ColumnMajor>::new(3, 7);
    assert_eq!(
        <SparseRow<&CompressedMatrix<i32, ColumnMajor>> as Operand>::descriptor(),
        Descriptor::SPARSE | Descriptor::VECTOR | Descriptor::ROW_MAJOR
    );
    let r = row_mut(&mut m, 2).unwrap();
    assert_eq!(r.size(), 7);
    assert_eq!(SparseVector::non_zeros(&r), 0);
}

/// Out-of-range row indices are rejected when the view is built.
#[test]
fn invalid_row_index() {
    let m = CompressedMatrix::<f32, RowMajor>::new(2, 2);
    let err = row(&m, 2).unwrap_err();
    assert!(matches!(err, SpError::DimensionMismatch(_)));
    assert!(err.to_string().contains("row"));
}

/// Element access through the view is bounds checked and writes through.
#[test]
fn element_access_writes_through() {
    let mut m = CompressedMatrix::<i64, ColumnMajor>::new(2, 5);
    {
        let mut r = row_mut(&mut m, 0).unwrap();
        *r.at_mut(4).unwrap() = 8;
        r.set(1, 3).unwrap();
        assert!(r.at(5).is_err());
        assert!(matches!(r.insert(1, 9), Err(SpError::DuplicateEntry { index: 1 })));
        assert_eq!(r.erase(1), Some(3));
        assert_eq!(r.erase(1), None);
    }
    assert_eq!(m.get(0, 4), 8);
    assert_eq!(m.total_non_zeros(), 1);
}

/// Appending in increasing order builds the row and skips defaults on request.
#[test]
fn append_both_orders() {
    fn build<SO: RowStrategy>() -> CompressedMatrix<f64, SO> {
        let mut m = CompressedMatrix::<f64, SO>::new(2, 10);
        let mut r = row_mut(&mut m, 1).unwrap();
        r.reserve(3);
        r.append(2, 1.0, true);
        r.append(5, 0.0, true);
        r.append(9, 4.0, false);
        m
    }
    let a = build::<RowMajor>();
    let b = build::<ColumnMajor>();
    assert_eq!(stored(&a, 1), vec![(2, 1.0), (9, 4.0)]);
    assert_eq!(stored(&a, 1), stored(&b, 1));
    assert!(a.capacity(1) >= 3);
}

/// Copying one row into another leaves the source untouched.
#[test]
fn assign_row_copies_pattern() {
    fn check<SO: RowStrategy>() {
        let src = random_dense(15, 0.4);
        let mut m = CompressedMatrix::<f64, SO>::new(3, 15);
        row_mut(&mut m, 0).unwrap().assign(&as_row(&src)).unwrap();
        row_mut(&mut m, 2).unwrap().assign(&as_row(&random_dense(15, 0.8))).unwrap();
        row_mut(&mut m, 2).unwrap().assign_row(0).unwrap();
        assert_eq!(stored(&m, 2), expected(&src));
        assert_eq!(stored(&m, 0), expected(&src));
        let before = m.total_non_zeros();
        row_mut(&mut m, 0).unwrap().assign_row(0).unwrap();
        assert_eq!(m.total_non_zeros(), before);
    }
    check::<RowMajor>();
    check::<ColumnMajor>();
}

/// Sparse assignment keeps exactly the source pattern, explicit zeros included.
#[test]
fn sparse_assignment_keeps_pattern() {
    let v = CompressedVector::<f64, RowVector>::from_parts(6, vec![0, 3], vec![0.0, 2.5]);
    let mut m = CompressedMatrix::<f64, RowMajor>::from_triplets(1, 6, vec![(0, 1, 1.0)]);
    row_mut(&mut m, 0).unwrap().assign_sparse(&v).unwrap();
    assert_eq!(stored(&m, 0), vec![(0, 0.0), (3, 2.5)]);
    let short = CompressedVector::<f64, RowVector>::new(5);
    assert!(row_mut(&mut m, 0).unwrap().assign_sparse(&short).is_err());
}

/// Compound addition and subtraction agree with dense arithmetic.
#[test]
fn add_and_sub_assign_random() {
    fn check<SO: RowStrategy>(a: &[f64], b: &[f64]) {
        let mut m = CompressedMatrix::<f64, SO>::new(1, a.len());
        let mut r = row_mut(&mut m, 0).unwrap();
        r.assign(&as_row(a)).unwrap();
        r.add_assign(&as_row(b)).unwrap();
        for j in 0..a.len() {
            assert_relative_eq!(r.at(j).unwrap(), a[j] + b[j]);
        }
        r.sub_assign(&as_row(b)).unwrap();
        for j in 0..a.len() {
            assert_relative_eq!(r.at(j).unwrap(), a[j], epsilon = 1e-12);
        }
    }
    let (a, b) = (random_dense(9, 0.5), random_dense(9, 0.5));
    check::<RowMajor>(&a, &b);
    check::<ColumnMajor>(&a, &b);
}

/// Element-wise multiplication by a vector agrees with dense arithmetic.
#[test]
fn mul_assign_vector_random() {
    fn check<SO: RowStrategy>(a: &[f64], b: &[f64]) {
        let mut m = CompressedMatrix::<f64, SO>::new(2, a.len());
        row_mut(&mut m, 1).unwrap().assign(&as_row(a)).unwrap();
        row_mut(&mut m, 1).unwrap().mul_assign_vector(&as_row(b)).unwrap();
        let product: Vec<f64> = a.iter().zip(b).map(|(x, y)| x * y).collect();
        assert_eq!(stored(&m, 1), expected(&product));
        assert_eq!(row(&m, 0).unwrap().non_zeros(), 0);
        let err = row_mut(&mut m, 1).unwrap().mul_assign_vector(&as_row(&b[1..]));
        assert!(matches!(err, Err(SpError::DimensionMismatch(_))));
    }
    let (a, b) = (random_dense(16, 0.6), random_dense(16, 0.6));
    check::<RowMajor>(&a, &b);
    check::<ColumnMajor>(&a, &b);
}

/// A tight growth policy still stores every value of a dense assignment.
#[test]
fn custom_growth_policy() {
    let values = random_dense(30, 0.9);
    let mut m = CompressedMatrix::<f64, RowMajor>::new(1, 30);
    row_mut(&mut m, 0)
        .unwrap()
        .with_growth(GrowthOptions { min_capacity: 1, factor: 1 })
        .assign(&as_row(&values))
        .unwrap();
    assert_eq!(stored(&m, 0), expected(&values));
    assert!(m.capacity(0) <= 30);
}
