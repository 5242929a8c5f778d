//! Capability contracts for operands.
//!
//! Containers, expressions and views all describe themselves through
//! [`Operand`]. The access traits ([`Vector`], [`SparseVector`], [`Matrix`],
//! [`SparseMatrix`]) are what expressions and row views consume; they never
//! look at a concrete container type.

use crate::core::tags::{Bool, Descriptor, False, MatrixShape, OrderKind, ShapeKind, StorageKind, True, VectorShape};
use crate::element::Numeric;
use crate::error::Result;

/// Compile-time descriptor of a vector, matrix or expression.
pub trait Operand {
    /// Element type.
    type Element: Numeric;
    /// [`Dense`](crate::core::tags::Dense) or [`Sparse`](crate::core::tags::Sparse).
    type Storage: StorageKind;
    /// [`VectorShape`] or [`MatrixShape`].
    type Shape: ShapeKind;
    /// Storage order (matrices) or orientation (vectors).
    type Order: OrderKind;

    /// How an expression node holds on to this operand: containers are held by
    /// reference, expressions by value.
    type Composite<'a>
    where
        Self: 'a;

    fn composite(&self) -> Self::Composite<'_>;

    /// `true` for lazily evaluated expression nodes.
    const IS_EXPRESSION: bool = false;

    /// Run-time copy of the compile-time tags.
    fn descriptor() -> Descriptor {
        let d = Descriptor::of::<Self::Storage, Self::Shape, Self::Order>();
        if Self::IS_EXPRESSION { d | Descriptor::EXPRESSION } else { d }
    }
}

/// Scalar predicate used by the combination rules.
///
/// Numeric primitives answer [`True`]; `bool`, `char`, strings, `()` and every
/// container answer [`False`]. Other types opt in with [`non_numeric!`](crate::non_numeric).
pub trait Scalar {
    type IsNumeric: Bool;
}

/// Strips reference qualifiers: `&T`, `&mut T` and `T` all map to `T`.
pub trait Unqualify {
    type Type;
}

impl<T: Unqualify + ?Sized> Unqualify for &T {
    type Type = T::Type;
}

impl<T: Unqualify + ?Sized> Unqualify for &mut T {
    type Type = T::Type;
}

/// Shorthand for the unqualified type.
pub type Unqualified<T> = <T as Unqualify>::Type;

macro_rules! impl_scalar_markers {
    ($flag:ty: $($t:ty),*) => {$(
        impl Scalar for $t {
            type IsNumeric = $flag;
        }
        impl Unqualify for $t {
            type Type = $t;
        }
    )*};
}

impl_scalar_markers!(True: i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);
crate::non_numeric!(bool, char, String, ());

// `str` is unsized, so it resolves through its owned form.
impl Scalar for str {
    type IsNumeric = False;
}
impl Unqualify for str {
    type Type = String;
}

/// Declares types that may appear on the scalar side of a resolution but are
/// not numbers, so every rule resolves them to [`Invalid`](crate::resolve::Invalid).
///
/// ```
/// use sparow::core::RowMajor;
/// use sparow::matrix::DynamicMatrix;
/// use sparow::resolve::{DMatScalarMultTrait, is_invalid};
///
/// struct Label;
/// sparow::non_numeric!(Label);
///
/// assert!(is_invalid::<DMatScalarMultTrait<'static, DynamicMatrix<f64, RowMajor>, Label>>());
/// ```
#[macro_export]
macro_rules! non_numeric {
    ($($t:ty),* $(,)?) => {$(
        impl $crate::core::traits::Scalar for $t {
            type IsNumeric = $crate::core::tags::False;
        }
        impl $crate::core::traits::Unqualify for $t {
            type Type = $t;
        }
    )*};
}

/// Marks container and expression types as non-scalar and unqualified.
macro_rules! impl_operand_markers {
    ($(<$($g:ident),*> $t:ty),* $(,)?) => {$(
        impl<$($g),*> $crate::core::traits::Scalar for $t {
            type IsNumeric = $crate::core::tags::False;
        }
        impl<$($g),*> $crate::core::traits::Unqualify for $t {
            type Type = $t;
        }
    )*};
}
pub(crate) use impl_operand_markers;

/// Materialisation of an operand into its concrete result container.
pub trait Evaluate {
    type ResultType;

    fn evaluate(&self) -> Self::ResultType;
}

/// Random-access vector operand.
pub trait Vector: Operand<Shape = VectorShape> {
    fn size(&self) -> usize;

    /// Value at `index`, or the default value when nothing is stored there.
    ///
    /// Panics if `index >= size()`.
    fn get(&self, index: usize) -> Self::Element;
}

/// Vector operand that can enumerate its stored entries.
pub trait SparseVector: Vector {
    type Iter<'a>: Iterator<Item = (usize, Self::Element)>
    where
        Self: 'a;

    /// Number of stored entries.
    fn non_zeros(&self) -> usize;

    /// Stored entries in strictly increasing index order.
    fn sparse_iter(&self) -> Self::Iter<'_>;
}

/// Sparse vector whose stored entries can be modified in place.
pub trait SparseVectorMut: SparseVector {
    /// Visit every stored entry mutably, in increasing index order.
    fn for_each_mut<F>(&mut self, f: F)
    where
        F: FnMut(usize, &mut Self::Element);

    /// Remove every stored entry.
    fn clear(&mut self);
}

/// Random-access matrix operand.
pub trait Matrix: Operand<Shape = MatrixShape> {
    fn rows(&self) -> usize;
    fn columns(&self) -> usize;

    /// Value at `(i, j)`, or the default value when nothing is stored there.
    fn get(&self, i: usize, j: usize) -> Self::Element;
}

/// Mutable compressed matrix, as consumed by [`SparseRow`](crate::views::SparseRow).
///
/// A *lane* is a row of a row-major matrix or a column of a column-major
/// matrix; only lanes are stored contiguously. Element-level methods always
/// take `(row, column)`.
///
/// Lane iterators are invalidated by any mutation of that lane, which the
/// borrow checker enforces. Implementors own their storage.
pub trait SparseMatrix: Matrix + 'static {
    type Lane<'a>: Iterator<Item = (usize, &'a Self::Element)>
    where
        Self: 'a;
    type LaneMut<'a>: Iterator<Item = (usize, &'a mut Self::Element)>
    where
        Self: 'a;

    /// Stored entries in `lane`.
    fn non_zeros(&self, lane: usize) -> usize;
    /// Reserved slots in `lane`.
    fn capacity(&self, lane: usize) -> usize;
    /// Remove every stored entry of `lane`.
    fn reset(&mut self, lane: usize);
    /// Make room for at least `n` entries in `lane`.
    fn reserve(&mut self, lane: usize, n: usize);

    /// Insert a new entry. Fails with `DuplicateEntry { index: j }` if `(i, j)` is already
    /// stored, and with `DimensionMismatch` if it is out of range.
    fn insert(&mut self, i: usize, j: usize, value: Self::Element) -> Result<&mut Self::Element>;
    /// Remove the entry at `(i, j)`, returning it if present.
    fn erase(&mut self, i: usize, j: usize) -> Option<Self::Element>;
    fn find(&self, i: usize, j: usize) -> Option<&Self::Element>;
    fn find_mut(&mut self, i: usize, j: usize) -> Option<&mut Self::Element>;
    /// Writable access to `(i, j)`, storing a default entry first if none exists.
    fn entry(&mut self, i: usize, j: usize) -> &mut Self::Element;

    /// Append to the end of `lane`.
    ///
    /// `index` must be greater than every index stored in the lane; this is only
    /// checked in debug builds. With `check` set, default values are skipped.
    fn append(&mut self, lane: usize, index: usize, value: Self::Element, check: bool);

    fn lane(&self, lane: usize) -> Self::Lane<'_>;
    fn lane_mut(&mut self, lane: usize) -> Self::LaneMut<'_>;
}

// References are operands too; they are held by value inside expressions.
impl<V: Operand + ?Sized> Operand for &V {
    type Element = V::Element;
    type Storage = V::Storage;
    type Shape = V::Shape;
    type Order = V::Order;
    type Composite<'a>
        = Self
    where
        Self: 'a;

    fn composite(&self) -> Self {
        *self
    }

    const IS_EXPRESSION: bool = V::IS_EXPRESSION;
}

impl<V: Vector + ?Sized> Vector for &V {
    #[inline]
    fn size(&self) -> usize {
        (**self).size()
    }
    #[inline]
    fn get(&self, index: usize) -> Self::Element {
        (**self).get(index)
    }
}

impl<V: SparseVector + ?Sized> SparseVector for &V {
    type Iter<'a>
        = V::Iter<'a>
    where
        Self: 'a;

    fn non_zeros(&self) -> usize {
        (**self).non_zeros()
    }
    fn sparse_iter(&self) -> Self::Iter<'_> {
        (**self).sparse_iter()
    }
}

impl<M: Matrix + ?Sized> Matrix for &M {
    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }
    #[inline]
    fn columns(&self) -> usize {
        (**self).columns()
    }
    #[inline]
    fn get(&self, i: usize, j: usize) -> Self::Element {
        (**self).get(i, j)
    }
}
