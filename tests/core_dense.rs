//! Tests for dense operands: faer matrices, `Vec<T>` and the lazy expressions built over them.
//!
//! These tests check that scalar and vector expressions evaluate to the same values as a
//! direct element-wise computation, using random and fixed data.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use faer::Mat;
use rand::Rng;
use sparow::core::{ColumnMajor, ColumnVector, Evaluate, Matrix, RowMajor, Vector};
use sparow::expr::{DMatScalarExpr, DVecScalarExpr};
use sparow::element::{DivOp, MultOp};
use sparow::matrix::DynamicMatrix;
use sparow::vector::DynamicVector;

/// Scale a random row-major matrix and compare against element-wise multiplication.
#[test]
fn dense_matrix_scaling_random() {
    let (rows, cols) = (6, 4);
    let mut rng = rand::thread_rng();
    let vals: Vec<f64> = (0..rows * cols).map(|_| rng.r#gen()).collect();
    let a = DynamicMatrix::<f64, RowMajor>::from_raw(rows, cols, vals.clone());
    let s: f64 = rng.gen_range(0.5..2.0);
    let b = (&a * s).evaluate();
    for i in 0..rows {
        for j in 0..cols {
            assert_abs_diff_eq!(b[(i, j)], vals[i * cols + j] * s, epsilon = 1e-12);
        }
    }
}

/// A faer matrix is a column-major dense operand and can be assigned into a `DynamicMatrix`.
#[test]
fn faer_matrix_as_operand() {
    let m = Mat::from_fn(3, 2, |i, j| (i * 2 + j) as f32);
    let e = DMatScalarExpr::<_, f64, DivOp>::new(&m, 4.0);
    let mut out = DynamicMatrix::<f64, ColumnMajor>::new(3, 2);
    out.assign(&e).unwrap();
    assert_eq!(out.rows(), 3);
    assert_relative_eq!(out[(2, 1)], 5.0 / 4.0);
    assert_relative_eq!(out.as_faer()[(1, 0)], 0.5);
}

/// `Vec<T>` behaves as a dense column vector inside expressions.
#[test]
fn vec_as_operand() {
    let v = vec![2u8, 4, 6];
    let e = DVecScalarExpr::<_, f32, MultOp>::new(&v, 0.5);
    let d: DynamicVector<f32, ColumnVector> = e.evaluate();
    assert_eq!(d.as_slice(), &[1.0, 2.0, 3.0]);
    assert_eq!(v.evaluate().as_slice(), &[2, 4, 6]);
}

/// A chained vector expression evaluates element-wise in one pass into its target.
#[test]
fn fused_vector_expression_random() {
    let n = 32;
    let mut rng = rand::thread_rng();
    let a: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    let b: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    let c: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    let (va, vb, vc) = (
        DynamicVector::<f64>::from_vec(a.clone()),
        DynamicVector::<f64>::from_vec(b.clone()),
        DynamicVector::<f64>::from_vec(c.clone()),
    );
    let e = (&va * 3.0f64 + &vb - &vc) / 2.0f64;
    assert_eq!(e.size(), n);
    let mut out = DynamicVector::<f64>::new(n);
    out.assign(&e).unwrap();
    for i in 0..n {
        assert_relative_eq!(out[i], (a[i] * 3.0 + b[i] - c[i]) / 2.0, max_relative = 1e-12);
    }
}

/// Integer vectors divided by an integer scalar truncate like built-in division.
#[test]
fn integer_division_truncates() {
    let v = DynamicVector::<i64>::from_vec(vec![9, -9, 4]);
    let e = &v / 4i64;
    assert_eq!(e.evaluate().into_vec(), vec![2, -2, 1]);
    // a float divisor promotes the result instead
    let e = &v / 4.0f32;
    assert_eq!(e.evaluate().into_vec(), vec![2.25f32, -2.25, 1.0]);
}
