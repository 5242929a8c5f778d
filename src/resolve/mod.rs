//! Compile-time result-type resolution for `operand op scalar`.
//!
//! Resolution strips reference qualifiers, evaluates the rule's condition on the
//! unqualified pair and dispatches on the resulting type-level boolean:
//!
//! - [`True`] combines the element types and produces an expression node;
//! - [`False`] produces [`Invalid`], which implements no operand trait, so any
//!   attempt to use the result fails to compile.
//!
//! ```
//! use sparow::core::RowMajor;
//! use sparow::element::MultOp;
//! use sparow::expr::DMatScalarExpr;
//! use sparow::matrix::DynamicMatrix;
//! use sparow::resolve::DMatScalarMultTrait;
//!
//! type M = DynamicMatrix<i32, RowMajor>;
//! fn same(e: DMatScalarMultTrait<'static, &'static M, f64>) -> DMatScalarExpr<&'static M, f64, MultOp> {
//!     e
//! }
//! # let _ = same;
//! ```

pub mod rules;

pub use rules::{DMatScalar, DVecScalar, FoldScalar, SVecScalar, ScalarRule, TDMatScalar};

use crate::core::tags::{False, True};
use crate::core::traits::{Operand, Scalar, Unqualify};
use crate::element::{Combine, DivOp, MultOp, Numeric, ScalarOp};
use std::any::TypeId;

/// Result of a combination that no rule accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invalid;

/// `true` if `T` is the [`Invalid`] marker.
pub fn is_invalid<T: 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<Invalid>()
}

/// Dispatch on the rule's condition, implemented by [`True`] and [`False`].
pub trait ScalarHelper<'a, R, Op, MT, ST> {
    type Output;
}

impl<'a, R, Op, MT, ST> ScalarHelper<'a, R, Op, MT, ST> for True
where
    R: ScalarRule,
    Op: ScalarOp,
    MT: Operand + 'a,
    ST: Numeric,
    MT::Element: Combine<Op, ST>,
    MT::Composite<'a>: FoldScalar<R, Op, <MT::Element as Combine<Op, ST>>::Output>,
{
    type Output =
        <MT::Composite<'a> as FoldScalar<R, Op, <MT::Element as Combine<Op, ST>>::Output>>::Node;
}

impl<'a, R, Op, MT, ST> ScalarHelper<'a, R, Op, MT, ST> for False {
    type Output = Invalid;
}

/// Resolution of `Self op ST` under rule `R`, borrowing containers for `'a`.
///
/// Implemented for every qualified or unqualified operand type; `&T`,
/// `&mut T` and `T` resolve identically.
pub trait Resolve<'a, R: ScalarRule, Op, ST> {
    type Output;
}

impl<'a, R, Op, MT, ST> Resolve<'a, R, Op, ST> for MT
where
    R: ScalarRule,
    MT: Unqualify + ?Sized,
    ST: Unqualify,
    MT::Type: Operand + 'a,
    ST::Type: Scalar,
    R::Condition<MT::Type, ST::Type>: ScalarHelper<'a, R, Op, MT::Type, ST::Type>,
{
    type Output = <R::Condition<MT::Type, ST::Type> as ScalarHelper<
        'a,
        R,
        Op,
        MT::Type,
        ST::Type,
    >>::Output;
}

/// Result type of `dense row-major matrix * scalar`.
pub type DMatScalarMultTrait<'a, MT, ST> = <MT as Resolve<'a, DMatScalar, MultOp, ST>>::Output;
/// Result type of `dense row-major matrix / scalar`.
pub type DMatScalarDivTrait<'a, MT, ST> = <MT as Resolve<'a, DMatScalar, DivOp, ST>>::Output;
/// Result type of `dense column-major matrix * scalar`.
pub type TDMatScalarMultTrait<'a, MT, ST> = <MT as Resolve<'a, TDMatScalar, MultOp, ST>>::Output;
/// Result type of `dense column-major matrix / scalar`.
pub type TDMatScalarDivTrait<'a, MT, ST> = <MT as Resolve<'a, TDMatScalar, DivOp, ST>>::Output;
/// Result type of `dense vector * scalar`.
pub type DVecScalarMultTrait<'a, VT, ST> = <VT as Resolve<'a, DVecScalar, MultOp, ST>>::Output;
/// Result type of `dense vector / scalar`.
pub type DVecScalarDivTrait<'a, VT, ST> = <VT as Resolve<'a, DVecScalar, DivOp, ST>>::Output;
/// Result type of `sparse vector * scalar`.
pub type SVecScalarMultTrait<'a, VT, ST> = <VT as Resolve<'a, SVecScalar, MultOp, ST>>::Output;
/// Result type of `sparse vector / scalar`.
pub type SVecScalarDivTrait<'a, VT, ST> = <VT as Resolve<'a, SVecScalar, DivOp, ST>>::Output;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags::{ColumnMajor, ColumnVector, RowMajor, RowVector};
    use crate::expr::{DVecAddExpr, DVecScalarExpr, DMatScalarExpr, SVecScalarExpr};
    use crate::matrix::{CompressedMatrix, DynamicMatrix};
    use crate::vector::{CompressedVector, DynamicVector};
    use faer::Mat;

    fn same<A: 'static, B: 'static>() -> bool {
        TypeId::of::<A>() == TypeId::of::<B>()
    }

    type RowMat = DynamicMatrix<f64, RowMajor>;
    type ColMat = DynamicMatrix<f64, ColumnMajor>;
    type DVec = DynamicVector<i32, ColumnVector>;
    type SVec = CompressedVector<f32, RowVector>;

    #[test]
    fn legal_combinations_produce_expression_nodes() {
        assert!(same::<
            DMatScalarMultTrait<'static, RowMat, i32>,
            DMatScalarExpr<&'static RowMat, f64, MultOp>,
        >());
        assert!(same::<
            TDMatScalarDivTrait<'static, ColMat, f32>,
            DMatScalarExpr<&'static ColMat, f64, DivOp>,
        >());
        assert!(same::<DVecScalarMultTrait<'static, DVec, f64>, DVecScalarExpr<&'static DVec, f64, MultOp>>());
        assert!(same::<DVecScalarDivTrait<'static, DVec, i64>, DVecScalarExpr<&'static DVec, i64, DivOp>>());
        assert!(same::<SVecScalarMultTrait<'static, SVec, u8>, SVecScalarExpr<&'static SVec, f32, MultOp>>());
        // foreign operands follow the same table
        assert!(same::<
            TDMatScalarMultTrait<'static, Mat<f32>, f64>,
            DMatScalarExpr<&'static Mat<f32>, f64, MultOp>,
        >());
        assert!(same::<DVecScalarMultTrait<'static, Vec<u8>, u8>, DVecScalarExpr<&'static Vec<u8>, u8, MultOp>>());
    }

    #[test]
    fn qualifiers_do_not_change_the_result() {
        type Plain = DMatScalarMultTrait<'static, RowMat, f32>;
        assert!(same::<Plain, DMatScalarMultTrait<'static, &'static RowMat, f32>>());
        assert!(same::<Plain, DMatScalarMultTrait<'static, &'static mut RowMat, f32>>());
        assert!(same::<Plain, DMatScalarMultTrait<'static, RowMat, &'static f32>>());
        assert!(same::<Plain, DMatScalarMultTrait<'static, &'static &'static RowMat, &'static mut f32>>());
        assert!(same::<
            SVecScalarDivTrait<'static, SVec, f64>,
            SVecScalarDivTrait<'static, &'static SVec, &'static f64>,
        >());
    }

    #[test]
    fn resolution_is_deterministic() {
        assert!(same::<DVecScalarMultTrait<'static, DVec, u16>, DVecScalarMultTrait<'static, DVec, u16>>());
        assert!(!same::<DVecScalarMultTrait<'static, DVec, u16>, DVecScalarDivTrait<'static, DVec, u16>>());
    }

    #[test]
    fn illegal_combinations_are_invalid() {
        // wrong storage order for the row-major rule, and vice versa
        assert!(is_invalid::<DMatScalarMultTrait<'static, ColMat, f64>>());
        assert!(is_invalid::<TDMatScalarMultTrait<'static, RowMat, f64>>());
        assert!(is_invalid::<DMatScalarMultTrait<'static, Mat<f64>, f64>>());
        // sparse matrix under a dense rule
        assert!(is_invalid::<DMatScalarMultTrait<'static, CompressedMatrix<f64, RowMajor>, f64>>());
        // non-numeric scalars
        assert!(is_invalid::<DMatScalarMultTrait<'static, RowMat, bool>>());
        assert!(is_invalid::<DVecScalarDivTrait<'static, DVec, char>>());
        assert!(is_invalid::<DMatScalarMultTrait<'static, RowMat, String>>());
        assert!(is_invalid::<TDMatScalarDivTrait<'static, ColMat, &'static str>>());
        assert!(is_invalid::<SVecScalarMultTrait<'static, SVec, ()>>());
        assert!(is_invalid::<DVecScalarMultTrait<'static, DVec, DVec>>());
        // wrong shape or storage for the vector rules
        assert!(is_invalid::<DVecScalarMultTrait<'static, RowMat, f64>>());
        assert!(is_invalid::<DVecScalarMultTrait<'static, SVec, f64>>());
        assert!(is_invalid::<SVecScalarMultTrait<'static, DVec, f64>>());
        assert!(is_invalid::<SVecScalarMultTrait<'static, CompressedMatrix<f64, ColumnMajor>, f64>>());
        assert!(!is_invalid::<DVecScalarMultTrait<'static, DVec, f64>>());
    }

    #[test]
    fn nested_scalar_expressions_fold() {
        type Once = DVecScalarMultTrait<'static, DVec, f32>;
        type Twice = DVecScalarMultTrait<'static, Once, f64>;
        assert!(same::<Twice, DVecScalarExpr<&'static DVec, f64, MultOp>>());
        assert!(same::<Twice, DVecScalarMultTrait<'static, DVec, f64>>());

        type Halved = DMatScalarDivTrait<'static, DMatScalarMultTrait<'static, RowMat, f64>, f64>;
        assert!(same::<Halved, DMatScalarExpr<&'static RowMat, f64, MultOp>>());

        type SparseTwice = SVecScalarMultTrait<'static, SVecScalarMultTrait<'static, SVec, f32>, f32>;
        assert!(same::<SparseTwice, SVecScalarMultTrait<'static, SVec, f32>>());
    }

    #[test]
    fn binary_expressions_are_wrapped_by_value() {
        type Sum = DVecAddExpr<&'static DVec, &'static DVec>;
        assert!(same::<DVecScalarMultTrait<'static, Sum, i32>, DVecScalarExpr<Sum, i32, MultOp>>());
    }
}
