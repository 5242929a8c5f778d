//! Row views over compressed matrices.
//!
//! A [`SparseRow`] binds a borrowed matrix to one row index and exposes that
//! row as a sparse row vector. The view stores nothing but the borrow and the
//! index: its size is always the matrix's current column count, and every read
//! or write goes through the matrix.
//!
//! How a row is reached depends on the matrix's storage order, which is fixed
//! at compile time through [`RowStrategy`]:
//!
//! - row-major storage keeps each row contiguous, so the view delegates to the
//!   row's lane directly (`row_major.rs`);
//! - column-major storage has no row lanes, so iteration scans the columns and
//!   probes each one for the row (`column_major.rs`). Counting entries costs
//!   O(columns) and `append` becomes an insert.
//!
//! A view over `&mut MT` is the only way to write, and while it exists the
//! matrix cannot be read through any other path. Assigning a vector into a view
//! therefore never aliases the destination; copying another row of the same
//! matrix goes through [`SparseRow::assign_row`], which materialises the source
//! first.

mod column_major;
mod row_major;

pub use column_major::ColumnScan;

use crate::config::GrowthOptions;
use crate::core::tags::{Descriptor, OrderKind, RowVector, Sparse, VectorShape};
use crate::core::traits::{
    Evaluate, Operand, SparseMatrix, SparseVector, SparseVectorMut, Vector,
    impl_operand_markers,
};
use crate::element::{AddOp, Combine, DivOp, Divisor, MultOp, Numeric, Promote, SubOp, scale_element};
use crate::error::{Result, SpError};
use crate::expr::{DVecAddExpr, DVecBinaryExpr, DVecSubExpr, SVecScalarExpr};
use crate::vector::{CompressedVector, DynamicVector};
use log::{debug, trace};
use std::iter::Map;
use std::ops::{Add, Deref, DerefMut, Div, DivAssign, Mul, MulAssign, Sub};

/// Storage-order specific half of a row view, implemented by
/// [`RowMajor`](crate::core::RowMajor) and [`ColumnMajor`](crate::core::ColumnMajor).
pub trait RowStrategy: OrderKind {
    /// Stored entries of one row in increasing column order.
    type Iter<'a, MT>: Iterator<Item = (usize, &'a MT::Element)>
    where
        MT: SparseMatrix + 'a;

    fn iter<MT: SparseMatrix>(matrix: &MT, row: usize) -> Self::Iter<'_, MT>;
    fn non_zeros<MT: SparseMatrix>(matrix: &MT, row: usize) -> usize;
    fn capacity<MT: SparseMatrix>(matrix: &MT, row: usize) -> usize;
    fn reserve<MT: SparseMatrix>(matrix: &mut MT, row: usize, n: usize);
    fn reset<MT: SparseMatrix>(matrix: &mut MT, row: usize);
    fn append<MT: SparseMatrix>(matrix: &mut MT, row: usize, index: usize, value: MT::Element, check: bool);

    fn for_each_mut<MT, F>(matrix: &mut MT, row: usize, f: F)
    where
        MT: SparseMatrix,
        F: FnMut(usize, &mut MT::Element);

    /// Overwrite the row with a dense vector of matching size.
    fn assign_dense<MT, V>(matrix: &mut MT, row: usize, rhs: &V, growth: &GrowthOptions)
    where
        MT: SparseMatrix,
        V: Vector<Element = MT::Element>;

    /// Overwrite the row with the stored entries of a sparse vector of matching size.
    fn assign_sparse<MT, V>(matrix: &mut MT, row: usize, rhs: &V)
    where
        MT: SparseMatrix,
        V: SparseVector<Element = MT::Element>;
}

/// A borrowed matrix a view can hold: `&MT` (read-only) or `&mut MT`.
pub trait MatrixRef: Deref {
    const MUTABLE: bool;
}

impl<T: ?Sized> MatrixRef for &T {
    const MUTABLE: bool = false;
}

impl<T: ?Sized> MatrixRef for &mut T {
    const MUTABLE: bool = true;
}

/// View of one row of a compressed matrix.
#[derive(Clone, Copy, Debug)]
pub struct SparseRow<M> {
    matrix: M,
    row: usize,
    growth: GrowthOptions,
}

impl_operand_markers!(<M> SparseRow<M>);

/// Read-only view of row `index` of `matrix`.
pub fn row<MT>(matrix: &MT, index: usize) -> Result<SparseRow<&MT>>
where
    MT: SparseMatrix,
    MT::Order: RowStrategy,
{
    SparseRow::new(matrix, index)
}

/// Writable view of row `index` of `matrix`.
pub fn row_mut<MT>(matrix: &mut MT, index: usize) -> Result<SparseRow<&mut MT>>
where
    MT: SparseMatrix,
    MT::Order: RowStrategy,
{
    SparseRow::new(matrix, index)
}

fn copied_entry<E: Copy>((index, value): (usize, &E)) -> (usize, E) {
    (index, *value)
}

impl<M, MT> SparseRow<M>
where
    M: MatrixRef<Target = MT>,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
{
    /// Bind `matrix` to row `index`.
    ///
    /// Fails with [`SpError::DimensionMismatch`] if `index >= matrix.rows()`,
    /// which includes every index of a matrix without rows.
    pub fn new(matrix: M, index: usize) -> Result<Self> {
        let rows = matrix.rows();
        if index >= rows {
            return Err(SpError::row_index(index, rows));
        }
        trace!(
            "row view {index} of {rows}x{} {} matrix",
            matrix.columns(),
            <MT::Order as OrderKind>::NAME
        );
        Ok(SparseRow { matrix, row: index, growth: GrowthOptions::default() })
    }

    /// Replace the capacity growth policy used by dense assignment.
    pub fn with_growth(mut self, growth: GrowthOptions) -> Self {
        self.growth = growth;
        self
    }

    /// Index of the viewed row.
    pub fn row_index(&self) -> usize {
        self.row
    }

    pub fn matrix(&self) -> &MT {
        &self.matrix
    }

    /// Number of columns of the underlying matrix.
    pub fn size(&self) -> usize {
        self.matrix.columns()
    }

    pub fn non_zeros(&self) -> usize {
        <MT::Order as RowStrategy>::non_zeros(&*self.matrix, self.row)
    }

    pub fn capacity(&self) -> usize {
        <MT::Order as RowStrategy>::capacity(&*self.matrix, self.row)
    }

    /// Stored `(column, &value)` pairs in strictly increasing column order.
    pub fn iter(&self) -> <MT::Order as RowStrategy>::Iter<'_, MT> {
        <MT::Order as RowStrategy>::iter(&*self.matrix, self.row)
    }

    pub fn find(&self, index: usize) -> Option<&MT::Element> {
        let matrix: &MT = &self.matrix;
        matrix.find(self.row, index)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.size() {
            return Err(SpError::DimensionMismatch(format!(
                "invalid row view access index {index} (size = {})",
                self.size()
            )));
        }
        Ok(())
    }

    fn check_size(&self, size: usize) -> Result<()> {
        if size != self.size() {
            return Err(SpError::sizes("vector", self.size(), size));
        }
        Ok(())
    }

    /// Checked read; omitted entries read as the default value.
    pub fn at(&self, index: usize) -> Result<MT::Element> {
        self.check_index(index)?;
        Ok(self.matrix.get(self.row, index))
    }

    /// `true` if every stored entry holds the default value.
    pub fn is_default(&self) -> bool {
        self.iter().all(|(_, v)| v.is_default())
    }

    /// `true` if any stored entry is NaN.
    pub fn is_nan(&self) -> bool {
        self.iter().any(|(_, v)| v.is_nan())
    }

    /// Copy the row into an independent compressed row vector.
    pub fn to_vector(&self) -> CompressedVector<MT::Element, RowVector> {
        CompressedVector::from_sparse_iter(self.size(), self.iter().map(copied_entry))
    }
}

impl<M, MT> SparseRow<M>
where
    M: MatrixRef<Target = MT> + DerefMut,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
{
    /// Checked write access; stores a default entry first if none exists.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut MT::Element> {
        self.check_index(index)?;
        let row = self.row;
        Ok(self.matrix.entry(row, index))
    }

    pub fn set(&mut self, index: usize, value: MT::Element) -> Result<()> {
        *self.at_mut(index)? = value;
        Ok(())
    }

    /// Insert a new entry; fails with `DuplicateEntry` if `index` is already stored.
    pub fn insert(&mut self, index: usize, value: MT::Element) -> Result<&mut MT::Element> {
        let row = self.row;
        self.matrix.insert(row, index, value)
    }

    pub fn erase(&mut self, index: usize) -> Option<MT::Element> {
        let row = self.row;
        self.matrix.erase(row, index)
    }

    /// Handle to the stored entry at `index`, if there is one.
    pub fn find_mut(&mut self, index: usize) -> Option<RowEntry<'_, MT>> {
        let row = self.row;
        let matrix: &mut MT = &mut self.matrix;
        matrix.find(row, index)?;
        Some(RowEntry { matrix, row, column: index })
    }

    /// Remove every stored entry of the row.
    pub fn reset(&mut self) {
        <MT::Order as RowStrategy>::reset(&mut *self.matrix, self.row);
    }

    /// Make room for `n` entries. A no-op for column-major storage.
    pub fn reserve(&mut self, n: usize) {
        <MT::Order as RowStrategy>::reserve(&mut *self.matrix, self.row, n);
    }

    /// Append an entry past the last stored column.
    ///
    /// `index` must exceed every stored column; this is only checked in debug
    /// builds. With `check` set, default values are skipped.
    pub fn append(&mut self, index: usize, value: MT::Element, check: bool) {
        <MT::Order as RowStrategy>::append(&mut *self.matrix, self.row, index, value, check);
    }

    /// Visit every stored entry mutably, in increasing column order.
    pub fn for_each_mut<F>(&mut self, f: F)
    where
        F: FnMut(usize, &mut MT::Element),
    {
        <MT::Order as RowStrategy>::for_each_mut(&mut *self.matrix, self.row, f);
    }

    /// Multiply every stored entry by `scalar`.
    pub fn scale<S>(&mut self, scalar: S)
    where
        MT::Element: Promote<S>,
        S: Numeric,
    {
        self.for_each_mut(|_, x| *x = scale_element(*x, scalar));
    }

    /// Overwrite the row with any row-vector operand, reading it element by element.
    ///
    /// Default values are not stored.
    pub fn assign<V>(&mut self, rhs: &V) -> Result<()>
    where
        V: Vector<Element = MT::Element, Order = RowVector>,
    {
        self.check_size(rhs.size())?;
        let growth = self.growth;
        <MT::Order as RowStrategy>::assign_dense(&mut *self.matrix, self.row, rhs, &growth);
        Ok(())
    }

    /// Overwrite the row with the stored entries of a sparse operand.
    ///
    /// The row ends up with exactly the source's sparsity pattern.
    pub fn assign_sparse<V>(&mut self, rhs: &V) -> Result<()>
    where
        V: SparseVector<Element = MT::Element, Order = RowVector>,
    {
        self.check_size(rhs.size())?;
        <MT::Order as RowStrategy>::assign_sparse(&mut *self.matrix, self.row, rhs);
        Ok(())
    }

    /// Copy row `source` of the same matrix into this row.
    ///
    /// Assigning a row to itself leaves it untouched.
    pub fn assign_row(&mut self, source: usize) -> Result<()> {
        if source == self.row {
            trace!("row view {}: self-assignment skipped", self.row);
            return Ok(());
        }
        let tmp = SparseRow::new(&*self.matrix, source)?.to_vector();
        debug!(
            "row view {}: materialised row {source} ({} entries) before assignment",
            self.row,
            tmp.non_zeros()
        );
        self.assign_sparse(&tmp)
    }

    /// `row += rhs`.
    pub fn add_assign<V>(&mut self, rhs: &V) -> Result<()>
    where
        V: Vector<Element = MT::Element, Order = RowVector>,
    {
        self.combine_assign(rhs, |a, b| a + b)
    }

    /// `row -= rhs`.
    pub fn sub_assign<V>(&mut self, rhs: &V) -> Result<()>
    where
        V: Vector<Element = MT::Element, Order = RowVector>,
    {
        self.combine_assign(rhs, |a, b| a - b)
    }

    /// Element-wise `row *= rhs`; only columns stored in both stay non-zero.
    pub fn mul_assign_vector<V>(&mut self, rhs: &V) -> Result<()>
    where
        V: Vector<Element = MT::Element, Order = RowVector>,
    {
        self.combine_assign(rhs, |a, b| a * b)
    }

    fn combine_assign<V, F>(&mut self, rhs: &V, f: F) -> Result<()>
    where
        V: Vector<Element = MT::Element, Order = RowVector>,
        F: Fn(MT::Element, MT::Element) -> MT::Element,
    {
        self.check_size(rhs.size())?;
        let tmp = DynamicVector::<MT::Element, RowVector>::from_vec(
            (0..self.size()).map(|j| f(self.matrix.get(self.row, j), rhs.get(j))).collect(),
        );
        self.assign(&tmp)
    }
}

/// A stored entry of a row, obtained from [`SparseRow::find_mut`].
#[derive(Debug)]
pub struct RowEntry<'a, MT> {
    matrix: &'a mut MT,
    row: usize,
    column: usize,
}

impl<'a, MT: SparseMatrix> RowEntry<'a, MT> {
    /// Column of the entry.
    pub fn index(&self) -> usize {
        self.column
    }

    pub fn value(&self) -> MT::Element {
        self.matrix.find(self.row, self.column).copied().unwrap_or_default()
    }

    pub fn value_mut(&mut self) -> &mut MT::Element {
        self.matrix.entry(self.row, self.column)
    }

    pub fn set(&mut self, value: MT::Element) {
        *self.value_mut() = value;
    }

    /// Remove the entry from the matrix, returning its value.
    pub fn remove(self) -> MT::Element {
        self.matrix.erase(self.row, self.column).unwrap_or_default()
    }
}

impl<M, MT> Operand for SparseRow<M>
where
    M: MatrixRef<Target = MT>,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
{
    type Element = MT::Element;
    type Storage = Sparse;
    type Shape = VectorShape;
    type Order = RowVector;
    type Composite<'a>
        = &'a Self
    where
        Self: 'a;

    fn composite(&self) -> &Self {
        self
    }

    fn descriptor() -> Descriptor {
        let d = Descriptor::of::<Sparse, VectorShape, RowVector>();
        if M::MUTABLE { d | Descriptor::MUTABLE } else { d }
    }
}

impl<M, MT> Vector for SparseRow<M>
where
    M: MatrixRef<Target = MT>,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
{
    #[inline]
    fn size(&self) -> usize {
        self.matrix.columns()
    }

    fn get(&self, index: usize) -> MT::Element {
        assert!(index < self.matrix.columns(), "Invalid vector access index");
        self.matrix.get(self.row, index)
    }
}

impl<M, MT> SparseVector for SparseRow<M>
where
    M: MatrixRef<Target = MT>,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
{
    type Iter<'a>
        = Map<<MT::Order as RowStrategy>::Iter<'a, MT>, fn((usize, &'a MT::Element)) -> (usize, MT::Element)>
    where
        Self: 'a;

    fn non_zeros(&self) -> usize {
        <MT::Order as RowStrategy>::non_zeros(&*self.matrix, self.row)
    }

    fn sparse_iter<'a>(&'a self) -> Self::Iter<'a> {
        let copy: fn((usize, &'a MT::Element)) -> (usize, MT::Element) = copied_entry;
        self.iter().map(copy)
    }
}

impl<M, MT> SparseVectorMut for SparseRow<M>
where
    M: MatrixRef<Target = MT> + DerefMut,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
{
    fn for_each_mut<F>(&mut self, f: F)
    where
        F: FnMut(usize, &mut MT::Element),
    {
        <MT::Order as RowStrategy>::for_each_mut(&mut *self.matrix, self.row, f);
    }

    fn clear(&mut self) {
        self.reset();
    }
}

impl<M, MT> Evaluate for SparseRow<M>
where
    M: MatrixRef<Target = MT>,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
{
    type ResultType = CompressedVector<MT::Element, RowVector>;

    fn evaluate(&self) -> Self::ResultType {
        self.to_vector()
    }
}

impl<M, MT, S> MulAssign<S> for SparseRow<M>
where
    M: MatrixRef<Target = MT> + DerefMut,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
    MT::Element: Promote<S>,
    S: Numeric,
{
    fn mul_assign(&mut self, rhs: S) {
        self.scale(rhs);
    }
}

// Floating-point results multiply by the reciprocal, see `Divisor`.
impl<M, MT, S> DivAssign<S> for SparseRow<M>
where
    M: MatrixRef<Target = MT> + DerefMut,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
    MT::Element: Promote<S>,
    S: Numeric,
{
    fn div_assign(&mut self, rhs: S) {
        let divisor = Divisor::<MT::Element, S>::new(rhs);
        self.for_each_mut(|_, x| *x = divisor.apply(*x));
    }
}

impl<'a, M, MT, S> Mul<S> for &'a SparseRow<M>
where
    M: MatrixRef<Target = MT>,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
    MT::Element: Promote<S>,
    S: Numeric,
{
    type Output = SVecScalarExpr<Self, <MT::Element as Promote<S>>::Output, MultOp>;

    fn mul(self, rhs: S) -> Self::Output {
        SVecScalarExpr::new(self, <MT::Element as Promote<S>>::promote_rhs(rhs))
    }
}

impl<'a, M, MT, S> Div<S> for &'a SparseRow<M>
where
    M: MatrixRef<Target = MT>,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
    MT::Element: Promote<S>,
    S: Numeric,
{
    type Output = SVecScalarExpr<Self, <MT::Element as Promote<S>>::Output, DivOp>;

    fn div(self, rhs: S) -> Self::Output {
        SVecScalarExpr::new(self, <MT::Element as Promote<S>>::promote_rhs(rhs))
    }
}

impl<'a, M, MT, R> Add<R> for &'a SparseRow<M>
where
    M: MatrixRef<Target = MT>,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
    R: Vector<Order = RowVector>,
    MT::Element: Combine<AddOp, R::Element>,
{
    type Output = DVecAddExpr<Self, R>;

    fn add(self, rhs: R) -> Self::Output {
        DVecBinaryExpr::new(self, rhs)
    }
}

impl<'a, M, MT, R> Sub<R> for &'a SparseRow<M>
where
    M: MatrixRef<Target = MT>,
    MT: SparseMatrix,
    MT::Order: RowStrategy,
    R: Vector<Order = RowVector>,
    MT::Element: Combine<SubOp, R::Element>,
{
    type Output = DVecSubExpr<Self, R>;

    fn sub(self, rhs: R) -> Self::Output {
        DVecBinaryExpr::new(self, rhs)
    }
}
