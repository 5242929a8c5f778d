//! Dense-matrix container on top of Faer.
//!
//! `DynamicMatrix<T, SO>` keeps its elements in a `faer::Mat<T>`. Faer storage
//! is column-major, so a row-major matrix stores its transpose: row `i` of the
//! matrix is column `i` of the Faer buffer and stays contiguous.

use crate::core::tags::{Bool, Dense, MatrixShape, OrderKind, RowMajor};
use crate::core::traits::{Evaluate, Matrix, Operand, impl_operand_markers};
use crate::element::Numeric;
use crate::error::{Result, SpError};
use faer::Mat;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

#[derive(Clone, Debug)]
pub struct DynamicMatrix<T, SO = RowMajor> {
    inner: Mat<T>,
    _order: PhantomData<SO>,
}

impl_operand_markers!(<T, SO> DynamicMatrix<T, SO>);

impl<T: Numeric, SO: OrderKind> DynamicMatrix<T, SO> {
    const ROW_MAJOR: bool = <SO::IsRowMajor as Bool>::VALUE;

    #[inline(always)]
    fn slot(i: usize, j: usize) -> (usize, usize) {
        if Self::ROW_MAJOR { (j, i) } else { (i, j) }
    }

    /// Zero matrix of shape `rows × columns`.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::from_fn(rows, columns, |_, _| T::zero())
    }

    /// Build element-wise from `f(i, j)`.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let inner = if Self::ROW_MAJOR {
            Mat::from_fn(columns, rows, |j, i| f(i, j))
        } else {
            Mat::from_fn(rows, columns, |i, j| f(i, j))
        };
        DynamicMatrix { inner, _order: PhantomData }
    }

    /// Construct from raw storage in this matrix's own order.
    pub fn from_raw(rows: usize, columns: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), rows * columns, "raw data has incorrect length");
        if Self::ROW_MAJOR {
            Self::from_fn(rows, columns, |i, j| data[i * columns + j])
        } else {
            Self::from_fn(rows, columns, |i, j| data[j * rows + i])
        }
    }

    /// The backing Faer matrix (the transpose, for row-major storage).
    pub fn as_faer(&self) -> &Mat<T> {
        &self.inner
    }

    /// Evaluate `rhs` into this matrix, visiting elements in storage order.
    pub fn assign<M>(&mut self, rhs: &M) -> Result<()>
    where
        M: Matrix<Element = T>,
    {
        let (rows, columns) = (Matrix::rows(self), Matrix::columns(self));
        if rhs.rows() != rows || rhs.columns() != columns {
            return Err(SpError::DimensionMismatch(format!(
                "matrix sizes do not match ({rows}x{columns} vs {}x{})",
                rhs.rows(),
                rhs.columns()
            )));
        }
        if Self::ROW_MAJOR {
            for i in 0..rows {
                for j in 0..columns {
                    self[(i, j)] = rhs.get(i, j);
                }
            }
        } else {
            for j in 0..columns {
                for i in 0..rows {
                    self[(i, j)] = rhs.get(i, j);
                }
            }
        }
        Ok(())
    }
}

impl<T: Numeric, SO: OrderKind> Index<(usize, usize)> for DynamicMatrix<T, SO> {
    type Output = T;
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.inner[Self::slot(i, j)]
    }
}

impl<T: Numeric, SO: OrderKind> IndexMut<(usize, usize)> for DynamicMatrix<T, SO> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.inner[Self::slot(i, j)]
    }
}

impl<T: Numeric, SO: OrderKind> Operand for DynamicMatrix<T, SO> {
    type Element = T;
    type Storage = Dense;
    type Shape = MatrixShape;
    type Order = SO;
    type Composite<'a>
        = &'a Self
    where
        Self: 'a;

    fn composite(&self) -> &Self {
        self
    }
}

impl<T: Numeric, SO: OrderKind> Matrix for DynamicMatrix<T, SO> {
    #[inline]
    fn rows(&self) -> usize {
        if Self::ROW_MAJOR { self.inner.ncols() } else { self.inner.nrows() }
    }
    #[inline]
    fn columns(&self) -> usize {
        if Self::ROW_MAJOR { self.inner.nrows() } else { self.inner.ncols() }
    }
    #[inline]
    fn get(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }
}

impl<T: Numeric, SO: OrderKind> Evaluate for DynamicMatrix<T, SO> {
    type ResultType = Self;

    fn evaluate(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags::ColumnMajor;

    #[test]
    fn row_major_stores_transpose() {
        let a = DynamicMatrix::<i32, RowMajor>::from_raw(2, 3, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(a.rows(), 2);
        assert_eq!(a.columns(), 3);
        assert_eq!(a[(1, 0)], 4);
        assert_eq!(a.as_faer().nrows(), 3);
        assert_eq!(a.as_faer()[(0, 1)], 4);
    }

    #[test]
    fn column_major_matches_faer_layout() {
        let a = DynamicMatrix::<i32, ColumnMajor>::from_raw(2, 3, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(a[(1, 0)], 2);
        assert_eq!(a[(0, 2)], 5);
        assert_eq!(a.as_faer()[(0, 2)], 5);
    }

    #[test]
    fn assign_across_orders() {
        let a = DynamicMatrix::<f64, RowMajor>::from_fn(3, 2, |i, j| (i * 10 + j) as f64);
        let mut b = DynamicMatrix::<f64, ColumnMajor>::new(3, 2);
        b.assign(&a).unwrap();
        for i in 0..3 {
            for j in 0..2 {
                assert_eq!(b[(i, j)], a[(i, j)]);
            }
        }
        let mut c = DynamicMatrix::<f64, ColumnMajor>::new(2, 2);
        assert!(c.assign(&a).is_err());
    }
}
