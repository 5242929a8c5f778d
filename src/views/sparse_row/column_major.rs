//! Row views over column-major storage.
//!
//! A row has no lane of its own here. Reads scan the columns and probe each one
//! for the row, and writes go through the matrix's per-column insert and erase.
//! Every row operation therefore costs O(columns).

use super::RowStrategy;
use crate::config::GrowthOptions;
use crate::core::tags::ColumnMajor;
use crate::core::traits::{SparseMatrix, SparseVector, Vector};
use crate::element::Numeric;
use log::trace;

/// Iterator over one row of a column-major matrix.
///
/// Each step probes the following columns until one stores an entry in the row.
#[derive(Debug)]
pub struct ColumnScan<'a, MT> {
    matrix: &'a MT,
    row: usize,
    column: usize,
    end: usize,
}

impl<'a, MT> Clone for ColumnScan<'a, MT> {
    fn clone(&self) -> Self {
        ColumnScan { matrix: self.matrix, row: self.row, column: self.column, end: self.end }
    }
}

impl<'a, MT: SparseMatrix> Iterator for ColumnScan<'a, MT> {
    type Item = (usize, &'a MT::Element);

    fn next(&mut self) -> Option<Self::Item> {
        let matrix: &'a MT = self.matrix;
        while self.column < self.end {
            let j = self.column;
            self.column += 1;
            if let Some(value) = matrix.find(self.row, j) {
                return Some((j, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end - self.column))
    }
}

impl RowStrategy for ColumnMajor {
    type Iter<'a, MT>
        = ColumnScan<'a, MT>
    where
        MT: SparseMatrix + 'a;

    fn iter<MT: SparseMatrix>(matrix: &MT, row: usize) -> ColumnScan<'_, MT> {
        ColumnScan { matrix, row, column: 0, end: matrix.columns() }
    }

    // no per-row count is kept
    fn non_zeros<MT: SparseMatrix>(matrix: &MT, row: usize) -> usize {
        Self::iter(matrix, row).count()
    }

    fn capacity<MT: SparseMatrix>(matrix: &MT, _row: usize) -> usize {
        matrix.columns()
    }

    fn reserve<MT: SparseMatrix>(_matrix: &mut MT, _row: usize, _n: usize) {}

    fn reset<MT: SparseMatrix>(matrix: &mut MT, row: usize) {
        for j in 0..matrix.columns() {
            matrix.erase(row, j);
        }
    }

    fn append<MT: SparseMatrix>(matrix: &mut MT, row: usize, index: usize, value: MT::Element, check: bool) {
        if check && value.is_default() {
            return;
        }
        trace!("row {row}: column-major append at {index} falls back to insert");
        *matrix.entry(row, index) = value;
    }

    fn for_each_mut<MT, F>(matrix: &mut MT, row: usize, mut f: F)
    where
        MT: SparseMatrix,
        F: FnMut(usize, &mut MT::Element),
    {
        for j in 0..matrix.columns() {
            if let Some(x) = matrix.find_mut(row, j) {
                f(j, x);
            }
        }
    }

    fn assign_dense<MT, V>(matrix: &mut MT, row: usize, rhs: &V, _growth: &GrowthOptions)
    where
        MT: SparseMatrix,
        V: Vector<Element = MT::Element>,
    {
        for j in 0..rhs.size() {
            let value = rhs.get(j);
            if value.is_default() {
                matrix.erase(row, j);
            } else {
                *matrix.entry(row, j) = value;
            }
        }
    }

    fn assign_sparse<MT, V>(matrix: &mut MT, row: usize, rhs: &V)
    where
        MT: SparseMatrix,
        V: SparseVector<Element = MT::Element>,
    {
        let mut next = 0;
        for (j, value) in rhs.sparse_iter() {
            for gap in next..j {
                matrix.erase(row, gap);
            }
            *matrix.entry(row, j) = value;
            next = j + 1;
        }
        for gap in next..matrix.columns() {
            matrix.erase(row, gap);
        }
    }
}
