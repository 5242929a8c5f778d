//! Compile-time tags describing operands.
//!
//! Every vector, matrix and expression carries three tags (storage, shape and
//! order) as associated types of [`Operand`](crate::core::traits::Operand).
//! Predicates over these tags are type-level booleans, so the combination
//! rules in [`resolve`](crate::resolve) are evaluated entirely by the trait
//! solver.

use bitflags::bitflags;

/// A type-level boolean.
///
/// Conjunction and negation are associated types so that they are well formed
/// for any `Bool`, including projections the solver has not normalised yet.
pub trait Bool: 'static {
    const VALUE: bool;
    type And<B: Bool>: Bool;
    type Not: Bool;
}

/// Type-level `true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct True;
/// Type-level `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct False;

impl Bool for True {
    const VALUE: bool = true;
    type And<B: Bool> = B;
    type Not = False;
}
impl Bool for False {
    const VALUE: bool = false;
    type And<B: Bool> = False;
    type Not = True;
}

pub type AndT<A, B> = <A as Bool>::And<B>;
pub type NotT<A> = <A as Bool>::Not;

/// Dense or sparse element storage.
pub trait StorageKind: 'static {
    type IsDense: Bool;
    type IsSparse: Bool;
}

/// Every element is stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dense;
/// Only non-default elements are stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sparse;

impl StorageKind for Dense {
    type IsDense = True;
    type IsSparse = False;
}
impl StorageKind for Sparse {
    type IsDense = False;
    type IsSparse = True;
}

/// Vector or matrix.
pub trait ShapeKind: 'static {
    type IsVector: Bool;
    type IsMatrix: Bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VectorShape;
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixShape;

impl ShapeKind for VectorShape {
    type IsVector = True;
    type IsMatrix = False;
}
impl ShapeKind for MatrixShape {
    type IsVector = False;
    type IsMatrix = True;
}

/// Storage order of a matrix, or orientation of a vector.
///
/// For vectors `RowMajor` means a row (transposed) vector and `ColumnMajor` a
/// column vector; see the [`RowVector`] and [`ColumnVector`] aliases.
pub trait OrderKind: Clone + Copy + std::fmt::Debug + Default + PartialEq + Eq + 'static {
    type IsRowMajor: Bool;
    const NAME: &'static str;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowMajor;
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMajor;

impl OrderKind for RowMajor {
    type IsRowMajor = True;
    const NAME: &'static str = "row-major";
}
impl OrderKind for ColumnMajor {
    type IsRowMajor = False;
    const NAME: &'static str = "column-major";
}

/// Orientation tag of a row vector.
pub type RowVector = RowMajor;
/// Orientation tag of a column vector.
pub type ColumnVector = ColumnMajor;

bitflags! {
    /// Run-time mirror of an operand's compile-time tags.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Descriptor: u8 {
        const DENSE        = 0b0000_0001;
        const SPARSE       = 0b0000_0010;
        const VECTOR       = 0b0000_0100;
        const MATRIX       = 0b0000_1000;
        const ROW_MAJOR    = 0b0001_0000;
        const COLUMN_MAJOR = 0b0010_0000;
        const MUTABLE      = 0b0100_0000;
        const EXPRESSION   = 0b1000_0000;
    }
}

impl Descriptor {
    /// Build the descriptor of a tag triple.
    pub fn of<S: StorageKind, H: ShapeKind, O: OrderKind>() -> Self {
        let mut d = Descriptor::empty();
        d |= if <S::IsDense as Bool>::VALUE { Descriptor::DENSE } else { Descriptor::SPARSE };
        d |= if <H::IsVector as Bool>::VALUE { Descriptor::VECTOR } else { Descriptor::MATRIX };
        d |= if <O::IsRowMajor as Bool>::VALUE { Descriptor::ROW_MAJOR } else { Descriptor::COLUMN_MAJOR };
        d
    }
}
