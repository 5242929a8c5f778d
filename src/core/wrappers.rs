//! Operand implementations for foreign container types.
//!
//! This module lets `faer::Mat<T>` and `Vec<T>` take part in expressions and
//! row assignment without being converted first:
//!
//! - `faer::Mat<T>` is a dense, column-major matrix.
//! - `Vec<T>` is a dense column vector.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)

use crate::core::tags::{ColumnMajor, ColumnVector, Dense, MatrixShape, VectorShape};
use crate::core::traits::{Evaluate, Matrix, Operand, Vector, impl_operand_markers};
use crate::element::Numeric;
use crate::vector::DynamicVector;
use faer::Mat;

impl_operand_markers!(<T> Mat<T>, <T> Vec<T>);

impl<T: Numeric> Operand for Mat<T> {
    type Element = T;
    type Storage = Dense;
    type Shape = MatrixShape;
    type Order = ColumnMajor;
    type Composite<'a>
        = &'a Self
    where
        Self: 'a;

    fn composite(&self) -> &Self {
        self
    }
}

/// A faer matrix is read through its own column-major indexing.
impl<T: Numeric> Matrix for Mat<T> {
    #[inline]
    fn rows(&self) -> usize {
        self.nrows()
    }
    #[inline]
    fn columns(&self) -> usize {
        self.ncols()
    }
    #[inline]
    fn get(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }
}

impl<T: Numeric> Operand for Vec<T> {
    type Element = T;
    type Storage = Dense;
    type Shape = VectorShape;
    type Order = ColumnVector;
    type Composite<'a>
        = &'a Self
    where
        Self: 'a;

    fn composite(&self) -> &Self {
        self
    }
}

/// Treats a `Vec<T>` as a dense column vector.
impl<T: Numeric> Vector for Vec<T> {
    #[inline]
    fn size(&self) -> usize {
        self.len()
    }
    #[inline]
    fn get(&self, index: usize) -> T {
        self[index]
    }
}

impl<T: Numeric> Evaluate for Vec<T> {
    type ResultType = DynamicVector<T, ColumnVector>;

    fn evaluate(&self) -> Self::ResultType {
        DynamicVector::from_vec(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faer_matrix_is_column_major_dense() {
        let a = Mat::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
        assert_eq!(Matrix::rows(&a), 2);
        assert_eq!(Matrix::columns(&a), 3);
        assert_eq!(Matrix::get(&a, 1, 2), 5.0);
        assert_eq!(
            <Mat<f64> as Operand>::descriptor(),
            crate::core::tags::Descriptor::DENSE
                | crate::core::tags::Descriptor::MATRIX
                | crate::core::tags::Descriptor::COLUMN_MAJOR
        );
    }

    #[test]
    fn vec_is_column_vector() {
        let v = vec![1, 2, 3];
        assert_eq!(Vector::size(&v), 3);
        assert_eq!(Vector::get(&v, 1), 2);
        assert_eq!(v.evaluate().as_slice(), &[1, 2, 3]);
    }
}
