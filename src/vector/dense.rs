//! Dense vector container.

use crate::core::tags::{ColumnVector, Dense, OrderKind, VectorShape};
use crate::core::traits::{Evaluate, Operand, Vector, impl_operand_markers};
use crate::element::Numeric;
use crate::error::{Result, SpError};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Heap-allocated dense vector with a compile-time orientation `TF`
/// ([`RowVector`](crate::core::tags::RowVector) or [`ColumnVector`]).
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicVector<T, TF = ColumnVector> {
    data: Vec<T>,
    _orientation: PhantomData<TF>,
}

impl_operand_markers!(<T, TF> DynamicVector<T, TF>);

impl<T: Numeric, TF: OrderKind> DynamicVector<T, TF> {
    /// Zero vector of length `n`.
    pub fn new(n: usize) -> Self {
        Self::from_vec(vec![T::zero(); n])
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        DynamicVector { data, _orientation: PhantomData }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Evaluate `rhs` into this vector in a single pass.
    ///
    /// `rhs` may be any vector operand of the same orientation, including a lazy
    /// expression; no intermediate vector is allocated.
    pub fn assign<V>(&mut self, rhs: &V) -> Result<()>
    where
        V: Vector<Element = T, Order = TF>,
    {
        if rhs.size() != self.len() {
            return Err(SpError::sizes("vector", self.len(), rhs.size()));
        }
        for (i, x) in self.data.iter_mut().enumerate() {
            *x = rhs.get(i);
        }
        Ok(())
    }
}

impl<T: Numeric, TF: OrderKind> From<Vec<T>> for DynamicVector<T, TF> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T, TF> Index<usize> for DynamicVector<T, TF> {
    type Output = T;
    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T, TF> IndexMut<usize> for DynamicVector<T, TF> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T: Numeric, TF: OrderKind> Operand for DynamicVector<T, TF> {
    type Element = T;
    type Storage = Dense;
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

impl<T: Numeric, TF: OrderKind> Vector for DynamicVector<T, TF> {
    #[inline]
    fn size(&self) -> usize {
        self.data.len()
    }
    #[inline]
    fn get(&self, index: usize) -> T {
        self.data[index]
    }
}

impl<T: Numeric, TF: OrderKind> Evaluate for DynamicVector<T, TF> {
    type ResultType = Self;

    fn evaluate(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags::RowVector;

    #[test]
    fn assign_checks_size() {
        let mut v = DynamicVector::<f64, RowVector>::new(3);
        let w = DynamicVector::<f64, RowVector>::from_vec(vec![1.0, 2.0]);
        assert!(matches!(v.assign(&w), Err(SpError::DimensionMismatch(_))));
        let w = DynamicVector::<f64, RowVector>::from_vec(vec![1.0, 2.0, 3.0]);
        v.assign(&w).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
    }
}
