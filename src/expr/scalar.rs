//! Scalar expression nodes: every element of one operand combined with a single scalar.
//!
//! A node keeps its operand's composite (a borrow for containers, a copy for
//! nested expressions) and evaluates lazily, one element at a time. Applying a
//! second scalar folds into the same node instead of wrapping it again.

use crate::core::tags::{Dense, MatrixShape, Sparse, VectorShape};
use crate::core::traits::{Evaluate, Matrix, Operand, SparseVector, Vector, impl_operand_markers};
use crate::element::{DivOp, MultOp, Numeric, Promote, ScalarOp, WidenInto};
use crate::matrix::DynamicMatrix;
use crate::resolve::{DMatScalar, DVecScalar, FoldScalar, SVecScalar, TDMatScalar};
use crate::vector::{CompressedVector, DynamicVector};
use num_traits::Float;
use std::marker::PhantomData;
use std::ops::{Div, Mul};

macro_rules! scalar_node {
    ($(#[$doc:meta])* $name:ident<$x:ident>) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name<$x, ET, Op> {
            operand: $x,
            scalar: ET,
            factor: ET,
            _op: PhantomData<Op>,
        }

        impl_operand_markers!(<$x, ET, Op> $name<$x, ET, Op>);

        impl<$x, ET: Numeric, Op: ScalarOp> $name<$x, ET, Op> {
            pub fn new(operand: $x, scalar: ET) -> Self {
                $name { operand, scalar, factor: Op::prepare(scalar), _op: PhantomData }
            }

            /// The wrapped operand.
            pub fn operand(&self) -> &$x {
                &self.operand
            }

            /// The scalar as given, before any reciprocal is taken.
            pub fn scalar(&self) -> ET {
                self.scalar
            }

            #[inline(always)]
            fn apply<E: WidenInto<ET>>(&self, value: E) -> ET {
                Op::apply_prepared(<E as Promote<ET>>::promote(value), self.factor)
            }
        }
    };
}

scalar_node!(
    /// `matrix op scalar` for a dense matrix of either storage order.
    DMatScalarExpr<MT>
);
scalar_node!(
    /// `vector op scalar` for a dense vector.
    DVecScalarExpr<VT>
);
scalar_node!(
    /// `vector op scalar` for a sparse vector; only stored entries are visited.
    SVecScalarExpr<VT>
);

macro_rules! fold_scalar {
    ($name:ident: $($rule:ident),+) => {
        // (x * a) * b  ->  x * (a * b); integer products wrap, as two steps would
        impl<X, E0, S> Mul<S> for $name<X, E0, MultOp>
        where
            E0: Promote<S>,
            S: Numeric,
        {
            type Output = $name<X, <E0 as Promote<S>>::Output, MultOp>;

            fn mul(self, rhs: S) -> Self::Output {
                let a = <E0 as Promote<S>>::promote(self.scalar);
                $name::new(self.operand, a.fold_product(E0::promote_rhs(rhs)))
            }
        }

        // (x / a) / b  ->  x / (a * b); integer divisors would overflow first
        impl<X, E0, S> Div<S> for $name<X, E0, DivOp>
        where
            E0: Promote<S>,
            S: Numeric,
            <E0 as Promote<S>>::Output: Float,
        {
            type Output = $name<X, <E0 as Promote<S>>::Output, DivOp>;

            fn div(self, rhs: S) -> Self::Output {
                let a = <E0 as Promote<S>>::promote(self.scalar);
                $name::new(self.operand, a * E0::promote_rhs(rhs))
            }
        }

        // (x * a) / b  ->  x * (a / b); exact enough only in floating point
        impl<X, E0, S> Div<S> for $name<X, E0, MultOp>
        where
            E0: Promote<S>,
            S: Numeric,
            <E0 as Promote<S>>::Output: Float,
        {
            type Output = $name<X, <E0 as Promote<S>>::Output, MultOp>;

            fn div(self, rhs: S) -> Self::Output {
                debug_assert!(!rhs.is_default(), "Division by zero detected");
                let a = <E0 as Promote<S>>::promote(self.scalar);
                $name::new(self.operand, a / E0::promote_rhs(rhs))
            }
        }

        // (x / a) * b  ->  x * (b / a)
        impl<X, E0, S> Mul<S> for $name<X, E0, DivOp>
        where
            E0: Promote<S>,
            S: Numeric,
            <E0 as Promote<S>>::Output: Float,
        {
            type Output = $name<X, <E0 as Promote<S>>::Output, MultOp>;

            fn mul(self, rhs: S) -> Self::Output {
                let a = <E0 as Promote<S>>::promote(self.scalar);
                $name::new(self.operand, E0::promote_rhs(rhs) / a)
            }
        }

        $(
            impl<X, E0, ET> FoldScalar<$rule, MultOp, ET> for $name<X, E0, MultOp> {
                type Node = $name<X, ET, MultOp>;
            }
            impl<X, E0, ET: Float> FoldScalar<$rule, DivOp, ET> for $name<X, E0, DivOp> {
                type Node = $name<X, ET, DivOp>;
            }
            impl<X, E0, ET: Float> FoldScalar<$rule, DivOp, ET> for $name<X, E0, MultOp> {
                type Node = $name<X, ET, MultOp>;
            }
            impl<X, E0, ET: Float> FoldScalar<$rule, MultOp, ET> for $name<X, E0, DivOp> {
                type Node = $name<X, ET, MultOp>;
            }
        )+
    };
}

fold_scalar!(DMatScalarExpr: DMatScalar, TDMatScalar);
fold_scalar!(DVecScalarExpr: DVecScalar);
fold_scalar!(SVecScalarExpr: SVecScalar);

macro_rules! container_scalar_ops {
    ($node:ident: $ty:ident<$t:ident, $o:ident>) => {
        impl<'a, $t, $o, S> Mul<S> for &'a $ty<$t, $o>
        where
            $t: Promote<S>,
            S: Numeric,
        {
            type Output = $node<Self, <$t as Promote<S>>::Output, MultOp>;

            fn mul(self, rhs: S) -> Self::Output {
                $node::new(self, <$t as Promote<S>>::promote_rhs(rhs))
            }
        }

        impl<'a, $t, $o, S> Div<S> for &'a $ty<$t, $o>
        where
            $t: Promote<S>,
            S: Numeric,
        {
            type Output = $node<Self, <$t as Promote<S>>::Output, DivOp>;

            fn div(self, rhs: S) -> Self::Output {
                $node::new(self, <$t as Promote<S>>::promote_rhs(rhs))
            }
        }
    };
}

container_scalar_ops!(DMatScalarExpr: DynamicMatrix<T, SO>);
container_scalar_ops!(DVecScalarExpr: DynamicVector<T, TF>);
container_scalar_ops!(SVecScalarExpr: CompressedVector<T, TF>);

impl<MT, ET, Op> Operand for DMatScalarExpr<MT, ET, Op>
where
    MT: Matrix + Clone,
    MT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    type Element = ET;
    type Storage = Dense;
    type Shape = MatrixShape;
    type Order = MT::Order;
    type Composite<'a>
        = Self
    where
        Self: 'a;

    fn composite(&self) -> Self {
        self.clone()
    }

    const IS_EXPRESSION: bool = true;
}

impl<MT, ET, Op> Matrix for DMatScalarExpr<MT, ET, Op>
where
    MT: Matrix + Clone,
    MT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    #[inline]
    fn rows(&self) -> usize {
        self.operand.rows()
    }
    #[inline]
    fn columns(&self) -> usize {
        self.operand.columns()
    }
    #[inline]
    fn get(&self, i: usize, j: usize) -> ET {
        self.apply(self.operand.get(i, j))
    }
}

impl<MT, ET, Op> Evaluate for DMatScalarExpr<MT, ET, Op>
where
    MT: Matrix + Clone,
    MT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    type ResultType = DynamicMatrix<ET, MT::Order>;

    fn evaluate(&self) -> Self::ResultType {
        DynamicMatrix::from_fn(self.rows(), self.columns(), |i, j| self.get(i, j))
    }
}

impl<VT, ET, Op> Operand for DVecScalarExpr<VT, ET, Op>
where
    VT: Vector + Clone,
    VT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    type Element = ET;
    type Storage = Dense;
    type Shape = VectorShape;
    type Order = VT::Order;
    type Composite<'a>
        = Self
    where
        Self: 'a;

    fn composite(&self) -> Self {
        self.clone()
    }

    const IS_EXPRESSION: bool = true;
}

impl<VT, ET, Op> Vector for DVecScalarExpr<VT, ET, Op>
where
    VT: Vector + Clone,
    VT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    #[inline]
    fn size(&self) -> usize {
        self.operand.size()
    }
    #[inline]
    fn get(&self, index: usize) -> ET {
        self.apply(self.operand.get(index))
    }
}

impl<VT, ET, Op> Evaluate for DVecScalarExpr<VT, ET, Op>
where
    VT: Vector + Clone,
    VT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    type ResultType = DynamicVector<ET, VT::Order>;

    fn evaluate(&self) -> Self::ResultType {
        DynamicVector::from_vec((0..self.size()).map(|i| self.get(i)).collect())
    }
}

/// Iterator over the stored entries of a sparse scalar expression.
#[derive(Clone, Debug)]
pub struct ScaledIter<I, E, ET, Op> {
    inner: I,
    factor: ET,
    _marker: PhantomData<(E, Op)>,
}

impl<I, E, ET, Op> Iterator for ScaledIter<I, E, ET, Op>
where
    I: Iterator<Item = (usize, E)>,
    E: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    type Item = (usize, ET);

    #[inline]
    fn next(&mut self) -> Option<(usize, ET)> {
        let (i, x) = self.inner.next()?;
        Some((i, Op::apply_prepared(<E as Promote<ET>>::promote(x), self.factor)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<VT, ET, Op> Operand for SVecScalarExpr<VT, ET, Op>
where
    VT: SparseVector + Clone,
    VT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    type Element = ET;
    type Storage = Sparse;
    type Shape = VectorShape;
    type Order = VT::Order;
    type Composite<'a>
        = Self
    where
        Self: 'a;

    fn composite(&self) -> Self {
        self.clone()
    }

    const IS_EXPRESSION: bool = true;
}

impl<VT, ET, Op> Vector for SVecScalarExpr<VT, ET, Op>
where
    VT: SparseVector + Clone,
    VT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    #[inline]
    fn size(&self) -> usize {
        self.operand.size()
    }
    fn get(&self, index: usize) -> ET {
        self.apply(self.operand.get(index))
    }
}

impl<VT, ET, Op> SparseVector for SVecScalarExpr<VT, ET, Op>
where
    VT: SparseVector + Clone,
    VT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    type Iter<'a>
        = ScaledIter<VT::Iter<'a>, VT::Element, ET, Op>
    where
        Self: 'a;

    fn non_zeros(&self) -> usize {
        self.operand.non_zeros()
    }

    fn sparse_iter(&self) -> Self::Iter<'_> {
        ScaledIter { inner: self.operand.sparse_iter(), factor: self.factor, _marker: PhantomData }
    }
}

impl<VT, ET, Op> Evaluate for SVecScalarExpr<VT, ET, Op>
where
    VT: SparseVector + Clone,
    VT::Element: WidenInto<ET>,
    ET: Numeric,
    Op: ScalarOp,
{
    type ResultType = CompressedVector<ET, VT::Order>;

    fn evaluate(&self) -> Self::ResultType {
        CompressedVector::from_sparse_iter(self.size(), self.sparse_iter())
    }
}
