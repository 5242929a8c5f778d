// CompressedMatrix: per-lane compressed storage (CSR for row-major, CSC for column-major)

use crate::core::tags::{Bool, MatrixShape, OrderKind, RowMajor, Sparse};
use crate::core::traits::{Evaluate, Matrix, Operand, SparseMatrix, impl_operand_markers};
use crate::element::Numeric;
use crate::error::{Result, SpError};
use crate::views::{RowStrategy, SparseRow};
use std::iter::{Copied, Zip};
use std::marker::PhantomData;
use std::slice;

/// One compressed lane: strictly increasing minor indices and their values.
#[derive(Clone, Debug, PartialEq, Default)]
struct LaneStore<T> {
    idx: Vec<usize>,
    val: Vec<T>,
}

impl<T: Numeric> LaneStore<T> {
    fn position(&self, minor: usize) -> std::result::Result<usize, usize> {
        self.idx.binary_search(&minor)
    }

    fn insert_at(&mut self, k: usize, minor: usize, value: T) -> &mut T {
        self.idx.insert(k, minor);
        self.val.insert(k, value);
        &mut self.val[k]
    }
}

/// A sparse matrix whose major axis is chosen by `SO`.
///
/// With `SO = RowMajor` every row is a contiguous sorted run (CSR-like); with
/// `SO = ColumnMajor` every column is (CSC-like). Each lane owns its buffers,
/// so inserting into one lane never moves another.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedMatrix<T, SO = RowMajor> {
    rows: usize,
    columns: usize,
    lanes: Vec<LaneStore<T>>,
    _order: PhantomData<SO>,
}

impl_operand_markers!(<T, SO> CompressedMatrix<T, SO>);

pub type LaneIter<'a, T> = Zip<Copied<slice::Iter<'a, usize>>, slice::Iter<'a, T>>;
pub type LaneIterMut<'a, T> = Zip<Copied<slice::Iter<'a, usize>>, slice::IterMut<'a, T>>;

impl<T: Numeric, SO: OrderKind> CompressedMatrix<T, SO> {
    const ROW_MAJOR: bool = <SO::IsRowMajor as Bool>::VALUE;

    /// Empty `rows × columns` matrix.
    pub fn new(rows: usize, columns: usize) -> Self {
        let n_lanes = if Self::ROW_MAJOR { rows } else { columns };
        CompressedMatrix {
            rows,
            columns,
            lanes: (0..n_lanes).map(|_| LaneStore { idx: Vec::new(), val: Vec::new() }).collect(),
            _order: PhantomData,
        }
    }

    /// Copy the non-default elements of any matrix operand.
    pub fn from_matrix<M: Matrix<Element = T>>(m: &M) -> Self {
        let mut out = Self::new(m.rows(), m.columns());
        let (majors, minors) = out.lane_dims();
        for a in 0..majors {
            for b in 0..minors {
                let (i, j) = if Self::ROW_MAJOR { (a, b) } else { (b, a) };
                out.append(a, b, m.get(i, j), true);
            }
        }
        out
    }

    /// Build from `(row, column, value)` triplets in any order. Later duplicates overwrite.
    pub fn from_triplets<I>(rows: usize, columns: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut out = Self::new(rows, columns);
        for (i, j, v) in triplets {
            out.set(i, j, v);
        }
        out
    }

    fn lane_dims(&self) -> (usize, usize) {
        if Self::ROW_MAJOR { (self.rows, self.columns) } else { (self.columns, self.rows) }
    }

    #[inline(always)]
    fn split(i: usize, j: usize) -> (usize, usize) {
        if Self::ROW_MAJOR { (i, j) } else { (j, i) }
    }

    fn check_bounds(&self, i: usize, j: usize) -> Result<()> {
        if i >= self.rows || j >= self.columns {
            return Err(SpError::DimensionMismatch(format!(
                "invalid matrix access index ({i}, {j}) for {}x{} matrix",
                self.rows, self.columns
            )));
        }
        Ok(())
    }

    /// Store `value` at `(i, j)`, overwriting any existing entry.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        *self.entry(i, j) = value;
    }

    /// Total number of stored entries.
    pub fn total_non_zeros(&self) -> usize {
        self.lanes.iter().map(|l| l.idx.len()).sum()
    }

    /// Dense copy as row-major nested vectors (mostly useful in tests).
    pub fn to_dense_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows)
            .map(|i| (0..self.columns).map(|j| self.get(i, j)).collect())
            .collect()
    }
}

impl<T: Numeric, SO: RowStrategy> CompressedMatrix<T, SO> {
    /// Read-only view of row `i`.
    pub fn row(&self, i: usize) -> Result<SparseRow<&Self>> {
        SparseRow::new(self, i)
    }

    /// Writable view of row `i`.
    pub fn row_mut(&mut self, i: usize) -> Result<SparseRow<&mut Self>> {
        SparseRow::new(self, i)
    }
}

impl<T: Numeric, SO: OrderKind> Operand for CompressedMatrix<T, SO> {
    type Element = T;
    type Storage = Sparse;
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

impl<T: Numeric, SO: OrderKind> Matrix for CompressedMatrix<T, SO> {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    fn columns(&self) -> usize {
        self.columns
    }
    fn get(&self, i: usize, j: usize) -> T {
        assert!(i < self.rows && j < self.columns, "Invalid matrix access index");
        self.find(i, j).copied().unwrap_or_default()
    }
}

impl<T: Numeric, SO: OrderKind> SparseMatrix for CompressedMatrix<T, SO> {
    type Lane<'a>
        = LaneIter<'a, T>
    where
        Self: 'a;
    type LaneMut<'a>
        = LaneIterMut<'a, T>
    where
        Self: 'a;

    fn non_zeros(&self, lane: usize) -> usize {
        self.lanes[lane].idx.len()
    }

    fn capacity(&self, lane: usize) -> usize {
        self.lanes[lane].idx.capacity()
    }

    fn reset(&mut self, lane: usize) {
        let l = &mut self.lanes[lane];
        l.idx.clear();
        l.val.clear();
    }

    fn reserve(&mut self, lane: usize, n: usize) {
        let l = &mut self.lanes[lane];
        if n > l.idx.len() {
            let extra = n - l.idx.len();
            l.idx.reserve_exact(extra);
            l.val.reserve_exact(extra);
        }
    }

    fn insert(&mut self, i: usize, j: usize, value: T) -> Result<&mut T> {
        self.check_bounds(i, j)?;
        let (major, minor) = Self::split(i, j);
        let lane = &mut self.lanes[major];
        match lane.position(minor) {
            Ok(_) => Err(SpError::DuplicateEntry { index: j }),
            Err(k) => Ok(lane.insert_at(k, minor, value)),
        }
    }

    fn erase(&mut self, i: usize, j: usize) -> Option<T> {
        let (major, minor) = Self::split(i, j);
        let lane = self.lanes.get_mut(major)?;
        let k = lane.position(minor).ok()?;
        lane.idx.remove(k);
        Some(lane.val.remove(k))
    }

    fn find(&self, i: usize, j: usize) -> Option<&T> {
        let (major, minor) = Self::split(i, j);
        let lane = self.lanes.get(major)?;
        lane.position(minor).ok().map(|k| &lane.val[k])
    }

    fn find_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        let (major, minor) = Self::split(i, j);
        let lane = self.lanes.get_mut(major)?;
        match lane.position(minor) {
            Ok(k) => Some(&mut lane.val[k]),
            Err(_) => None,
        }
    }

    fn entry(&mut self, i: usize, j: usize) -> &mut T {
        assert!(i < self.rows && j < self.columns, "Invalid matrix access index");
        let (major, minor) = Self::split(i, j);
        let lane = &mut self.lanes[major];
        match lane.position(minor) {
            Ok(k) => &mut lane.val[k],
            Err(k) => lane.insert_at(k, minor, T::zero()),
        }
    }

    fn append(&mut self, lane: usize, index: usize, value: T, check: bool) {
        debug_assert!(index < self.lane_dims().1, "Invalid matrix access index");
        let l = &mut self.lanes[lane];
        debug_assert!(
            l.idx.last().map_or(true, |&last| last < index),
            "Index is not strictly increasing"
        );
        if check && value.is_default() {
            return;
        }
        l.idx.push(index);
        l.val.push(value);
    }

    fn lane(&self, lane: usize) -> LaneIter<'_, T> {
        let l = &self.lanes[lane];
        l.idx.iter().copied().zip(l.val.iter())
    }

    fn lane_mut(&mut self, lane: usize) -> LaneIterMut<'_, T> {
        let l = &mut self.lanes[lane];
        l.idx.iter().copied().zip(l.val.iter_mut())
    }
}

impl<T: Numeric, SO: OrderKind> Evaluate for CompressedMatrix<T, SO> {
    type ResultType = Self;

    fn evaluate(&self) -> Self {
        self.clone()
    }
}
