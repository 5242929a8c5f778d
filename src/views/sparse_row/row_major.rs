//! Row views over row-major storage: a row is a lane, so everything delegates.

use super::RowStrategy;
use crate::config::GrowthOptions;
use crate::core::tags::RowMajor;
use crate::core::traits::{SparseMatrix, SparseVector, Vector};
use crate::element::Numeric;
use log::debug;

impl RowStrategy for RowMajor {
    type Iter<'a, MT>
        = MT::Lane<'a>
    where
        MT: SparseMatrix + 'a;

    fn iter<MT: SparseMatrix>(matrix: &MT, row: usize) -> MT::Lane<'_> {
        matrix.lane(row)
    }

    fn non_zeros<MT: SparseMatrix>(matrix: &MT, row: usize) -> usize {
        matrix.non_zeros(row)
    }

    fn capacity<MT: SparseMatrix>(matrix: &MT, row: usize) -> usize {
        matrix.capacity(row)
    }

    fn reserve<MT: SparseMatrix>(matrix: &mut MT, row: usize, n: usize) {
        matrix.reserve(row, n);
    }

    fn reset<MT: SparseMatrix>(matrix: &mut MT, row: usize) {
        matrix.reset(row);
    }

    fn append<MT: SparseMatrix>(matrix: &mut MT, row: usize, index: usize, value: MT::Element, check: bool) {
        matrix.append(row, index, value, check);
    }

    fn for_each_mut<MT, F>(matrix: &mut MT, row: usize, mut f: F)
    where
        MT: SparseMatrix,
        F: FnMut(usize, &mut MT::Element),
    {
        for (j, x) in matrix.lane_mut(row) {
            f(j, x);
        }
    }

    fn assign_dense<MT, V>(matrix: &mut MT, row: usize, rhs: &V, growth: &GrowthOptions)
    where
        MT: SparseMatrix,
        V: Vector<Element = MT::Element>,
    {
        matrix.reset(row);
        let size = rhs.size();
        for j in 0..size {
            let value = rhs.get(j);
            if value.is_default() {
                continue;
            }
            let capacity = matrix.capacity(row);
            if matrix.non_zeros(row) == capacity {
                let extended = growth.extend_capacity(capacity, size);
                debug!("row {row}: extending capacity {capacity} -> {extended}");
                matrix.reserve(row, extended);
            }
            matrix.append(row, j, value, false);
        }
    }

    fn assign_sparse<MT, V>(matrix: &mut MT, row: usize, rhs: &V)
    where
        MT: SparseMatrix,
        V: SparseVector<Element = MT::Element>,
    {
        matrix.reset(row);
        matrix.reserve(row, rhs.non_zeros());
        for (j, value) in rhs.sparse_iter() {
            matrix.append(row, j, value, false);
        }
    }
}
