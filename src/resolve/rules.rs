//! The predicate table of the scalar resolver.
//!
//! Each rule is a zero-sized tag whose [`ScalarRule::Condition`] is a
//! conjunction of storage, shape, order and scalar checks. Which expression
//! node a legal combination produces is decided by [`FoldScalar`], so a scalar
//! applied to an existing scalar expression can fold into that node.

use crate::core::tags::{AndT, Bool, NotT, OrderKind, ShapeKind, StorageKind};
use crate::core::traits::{Operand, Scalar};
use crate::expr::{DMatScalarExpr, DVecScalarExpr, SVecScalarExpr};

/// One row of the resolver's predicate table.
pub trait ScalarRule: 'static {
    /// Whether `MT` combined with `ST` is legal under this rule.
    type Condition<MT: Operand, ST: Scalar>: Bool;
}

/// Dense row-major matrix times scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct DMatScalar;
/// Dense column-major matrix times scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct TDMatScalar;
/// Dense vector (either orientation) times scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct DVecScalar;
/// Sparse vector (either orientation) times scalar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SVecScalar;

type IsDense<MT> = <<MT as Operand>::Storage as StorageKind>::IsDense;
type IsSparse<MT> = <<MT as Operand>::Storage as StorageKind>::IsSparse;
type IsMatrix<MT> = <<MT as Operand>::Shape as ShapeKind>::IsMatrix;
type IsVector<MT> = <<MT as Operand>::Shape as ShapeKind>::IsVector;
type IsRowMajor<MT> = <<MT as Operand>::Order as OrderKind>::IsRowMajor;
type IsNumeric<ST> = <ST as Scalar>::IsNumeric;

impl ScalarRule for DMatScalar {
    type Condition<MT: Operand, ST: Scalar> =
        AndT<AndT<IsDense<MT>, IsMatrix<MT>>, AndT<IsRowMajor<MT>, IsNumeric<ST>>>;
}

impl ScalarRule for TDMatScalar {
    type Condition<MT: Operand, ST: Scalar> =
        AndT<AndT<IsDense<MT>, IsMatrix<MT>>, AndT<NotT<IsRowMajor<MT>>, IsNumeric<ST>>>;
}

impl ScalarRule for DVecScalar {
    type Condition<MT: Operand, ST: Scalar> = AndT<AndT<IsDense<MT>, IsVector<MT>>, IsNumeric<ST>>;
}

impl ScalarRule for SVecScalar {
    type Condition<MT: Operand, ST: Scalar> = AndT<AndT<IsSparse<MT>, IsVector<MT>>, IsNumeric<ST>>;
}

/// The expression node that results from applying one more scalar under rule
/// `R` and operator `Op`, with combined element type `ET`.
///
/// `Self` is the operand's [`Composite`](Operand::Composite): containers are
/// borrowed and get wrapped in a fresh node, while scalar expressions fold the
/// new scalar into their own node.
pub trait FoldScalar<R: ScalarRule, Op, ET> {
    type Node;
}

impl<'a, T: ?Sized, Op, ET> FoldScalar<DMatScalar, Op, ET> for &'a T {
    type Node = DMatScalarExpr<&'a T, ET, Op>;
}

impl<'a, T: ?Sized, Op, ET> FoldScalar<TDMatScalar, Op, ET> for &'a T {
    type Node = DMatScalarExpr<&'a T, ET, Op>;
}

impl<'a, T: ?Sized, Op, ET> FoldScalar<DVecScalar, Op, ET> for &'a T {
    type Node = DVecScalarExpr<&'a T, ET, Op>;
}

impl<'a, T: ?Sized, Op, ET> FoldScalar<SVecScalar, Op, ET> for &'a T {
    type Node = SVecScalarExpr<&'a T, ET, Op>;
}
