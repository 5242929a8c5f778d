//! Compressed (sparse) vector container.

use crate::core::tags::{ColumnVector, OrderKind, Sparse, VectorShape};
use crate::core::traits::{
    Evaluate, Operand, SparseVector, SparseVectorMut, Vector, impl_operand_markers,
};
use crate::element::Numeric;
use crate::error::{Result, SpError};
use std::iter::{Copied, Zip};
use std::marker::PhantomData;
use std::slice;

/// A vector stored in compressed format: sorted positions plus their values.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedVector<T, TF = ColumnVector> {
    size: usize,
    idx: Vec<usize>,
    val: Vec<T>,
    _orientation: PhantomData<TF>,
}

impl_operand_markers!(<T, TF> CompressedVector<T, TF>);

pub type SparseIter<'a, T> = Zip<Copied<slice::Iter<'a, usize>>, Copied<slice::Iter<'a, T>>>;

impl<T: Numeric, TF: OrderKind> CompressedVector<T, TF> {
    /// Empty vector of dimension `size`.
    pub fn new(size: usize) -> Self {
        CompressedVector { size, idx: Vec::new(), val: Vec::new(), _orientation: PhantomData }
    }

    /// Construct from explicit positions and values.
    ///
    /// # Panics
    ///
    /// Positions must be unique, in order, and strictly less than `size`, and
    /// `idx` and `val` must have equal lengths.
    pub fn from_parts(size: usize, idx: Vec<usize>, val: Vec<T>) -> Self {
        assert_eq!(idx.len(), val.len());
        assert!(
            idx.windows(2).all(|w| w[0] < w[1]),
            "Input must be sorted, without duplicates"
        );
        assert!(idx.last().map_or(true, |&i| i < size), "element index exceeds dimension");
        CompressedVector { size, idx, val, _orientation: PhantomData }
    }

    /// Construct from a dense slice, dropping default values.
    pub fn from_dense(dense: &[T]) -> Self {
        let mut out = Self::new(dense.len());
        for (i, &x) in dense.iter().enumerate() {
            out.append(i, x, true);
        }
        out
    }

    /// Collect from sorted `(index, value)` pairs.
    pub fn from_sparse_iter<I>(size: usize, it: I) -> Self
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let mut out = Self::new(size);
        for (i, x) in it {
            out.append(i, x, false);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.idx.capacity()
    }

    pub fn reserve(&mut self, n: usize) {
        if n > self.idx.len() {
            self.idx.reserve_exact(n - self.idx.len());
            self.val.reserve_exact(n - self.val.len());
        }
    }

    pub fn reset(&mut self) {
        self.idx.clear();
        self.val.clear();
    }

    pub fn iter(&self) -> SparseIter<'_, T> {
        self.idx.iter().copied().zip(self.val.iter().copied())
    }

    fn position(&self, index: usize) -> std::result::Result<usize, usize> {
        self.idx.binary_search(&index)
    }

    pub fn find(&self, index: usize) -> Option<&T> {
        self.position(index).ok().map(|k| &self.val[k])
    }

    /// Insert a new entry; fails if `index` is already stored.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T> {
        if index >= self.size {
            return Err(SpError::sizes("index/vector", self.size, index));
        }
        match self.position(index) {
            Ok(_) => Err(SpError::DuplicateEntry { index }),
            Err(k) => {
                self.idx.insert(k, index);
                self.val.insert(k, value);
                Ok(&mut self.val[k])
            }
        }
    }

    /// Store `value` at `index`, overwriting any existing entry.
    pub fn set(&mut self, index: usize, value: T) {
        assert!(index < self.size, "Invalid vector access index");
        match self.position(index) {
            Ok(k) => self.val[k] = value,
            Err(k) => {
                self.idx.insert(k, index);
                self.val.insert(k, value);
            }
        }
    }

    pub fn erase(&mut self, index: usize) -> Option<T> {
        let k = self.position(index).ok()?;
        self.idx.remove(k);
        Some(self.val.remove(k))
    }

    /// Append an entry past the last stored index.
    ///
    /// With `check` set, default values are skipped.
    pub fn append(&mut self, index: usize, value: T, check: bool) {
        debug_assert!(index < self.size, "Invalid vector access index");
        debug_assert!(
            self.idx.last().map_or(true, |&last| last < index),
            "Index is not strictly increasing"
        );
        if check && value.is_default() {
            return;
        }
        self.idx.push(index);
        self.val.push(value);
    }

    /// Densify, filling omitted positions with zeros.
    pub fn to_dense(&self) -> Vec<T> {
        let mut out = vec![T::zero(); self.size];
        for (i, x) in self.iter() {
            out[i] = x;
        }
        out
    }
}

impl<T: Numeric, TF: OrderKind> Operand for CompressedVector<T, TF> {
    type Element = T;
    type Storage = Sparse;
    type Shape = VectorShape;
    type Order = TF;
    type Composite<'a>
        = &'a Self
    where
        Self: 'a;

    fn composite(&self) -> &Self {
        self
    }
}

impl<T: Numeric, TF: OrderKind> Vector for CompressedVector<T, TF> {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }
    fn get(&self, index: usize) -> T {
        assert!(index < self.size, "Invalid vector access index");
        self.find(index).copied().unwrap_or_default()
    }
}

impl<T: Numeric, TF: OrderKind> SparseVector for CompressedVector<T, TF> {
    type Iter<'a>
        = SparseIter<'a, T>
    where
        Self: 'a;

    fn non_zeros(&self) -> usize {
        self.idx.len()
    }
    fn sparse_iter(&self) -> SparseIter<'_, T> {
        self.iter()
    }
}

impl<T: Numeric, TF: OrderKind> SparseVectorMut for CompressedVector<T, TF> {
    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut T),
    {
        for (&i, x) in self.idx.iter().zip(self.val.iter_mut()) {
            f(i, x);
        }
    }

    fn clear(&mut self) {
        self.reset();
    }
}

impl<T: Numeric, TF: OrderKind> Evaluate for CompressedVector<T, TF> {
    type ResultType = Self;

    fn evaluate(&self) -> Self {
        self.clone()
    }
}
