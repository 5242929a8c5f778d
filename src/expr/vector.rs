//! Element-wise addition and subtraction of dense-result vector expressions.

use super::scalar::{DVecScalarExpr, SVecScalarExpr};
use crate::core::tags::{Dense, VectorShape};
use crate::core::traits::{Evaluate, Operand, Vector, impl_operand_markers};
use crate::element::{AddOp, BinaryOp, Combine, MultOp, DivOp, Numeric, Promote, SubOp};
use crate::resolve::{DVecScalar, FoldScalar};
use crate::vector::{CompressedVector, DynamicVector};
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Sub};

/// `lhs op rhs` over two vectors of the same orientation.
///
/// Nothing is computed until the node is read or assigned, so an expression
/// like `&a * 2.0 + &b - &c` evaluates in a single loop.
#[derive(Clone, Copy, Debug)]
pub struct DVecBinaryExpr<L, R, Op> {
    lhs: L,
    rhs: R,
    _op: PhantomData<Op>,
}

/// `lhs + rhs`.
pub type DVecAddExpr<L, R> = DVecBinaryExpr<L, R, AddOp>;
/// `lhs - rhs`.
pub type DVecSubExpr<L, R> = DVecBinaryExpr<L, R, SubOp>;

impl_operand_markers!(<L, R, Op> DVecBinaryExpr<L, R, Op>);

impl<L: Vector, R: Vector, Op: BinaryOp> DVecBinaryExpr<L, R, Op> {
    /// # Panics
    ///
    /// If the operands differ in size.
    pub fn new(lhs: L, rhs: R) -> Self {
        assert_eq!(lhs.size(), rhs.size(), "Vector sizes do not match");
        DVecBinaryExpr { lhs, rhs, _op: PhantomData }
    }

    pub fn lhs(&self) -> &L {
        &self.lhs
    }

    pub fn rhs(&self) -> &R {
        &self.rhs
    }
}

impl<L, R, Op> Operand for DVecBinaryExpr<L, R, Op>
where
    L: Vector + Clone,
    R: Vector<Order = L::Order> + Clone,
    L::Element: Combine<Op, R::Element>,
    Op: BinaryOp,
{
    type Element = <L::Element as Combine<Op, R::Element>>::Output;
    type Storage = Dense;
    type Shape = VectorShape;
    type Order = L::Order;
    type Composite<'a>
        = Self
    where
        Self: 'a;

    fn composite(&self) -> Self {
        self.clone()
    }

    const IS_EXPRESSION: bool = true;
}

impl<L, R, Op> Vector for DVecBinaryExpr<L, R, Op>
where
    L: Vector + Clone,
    R: Vector<Order = L::Order> + Clone,
    L::Element: Combine<Op, R::Element>,
    Op: BinaryOp,
{
    #[inline]
    fn size(&self) -> usize {
        self.lhs.size()
    }
    #[inline]
    fn get(&self, index: usize) -> <Self as Operand>::Element {
        <L::Element as Combine<Op, R::Element>>::combine(self.lhs.get(index), self.rhs.get(index))
    }
}

impl<L, R, Op> Evaluate for DVecBinaryExpr<L, R, Op>
where
    L: Vector + Clone,
    R: Vector<Order = L::Order> + Clone,
    L::Element: Combine<Op, R::Element>,
    Op: BinaryOp,
{
    type ResultType = DynamicVector<<Self as Operand>::Element, L::Order>;

    fn evaluate(&self) -> Self::ResultType {
        DynamicVector::from_vec((0..self.size()).map(|i| self.get(i)).collect())
    }
}

impl<L, R, Op, ET> FoldScalar<DVecScalar, MultOp, ET> for DVecBinaryExpr<L, R, Op> {
    type Node = DVecScalarExpr<Self, ET, MultOp>;
}

impl<L, R, Op, ET> FoldScalar<DVecScalar, DivOp, ET> for DVecBinaryExpr<L, R, Op> {
    type Node = DVecScalarExpr<Self, ET, DivOp>;
}

impl<L, R, Op, S> Mul<S> for DVecBinaryExpr<L, R, Op>
where
    Self: Vector,
    <Self as Operand>::Element: Promote<S>,
    S: Numeric,
{
    type Output = DVecScalarExpr<Self, <<Self as Operand>::Element as Promote<S>>::Output, MultOp>;

    fn mul(self, rhs: S) -> Self::Output {
        DVecScalarExpr::new(self, <<Self as Operand>::Element as Promote<S>>::promote_rhs(rhs))
    }
}

impl<L, R, Op, S> Div<S> for DVecBinaryExpr<L, R, Op>
where
    Self: Vector,
    <Self as Operand>::Element: Promote<S>,
    S: Numeric,
{
    type Output = DVecScalarExpr<Self, <<Self as Operand>::Element as Promote<S>>::Output, DivOp>;

    fn div(self, rhs: S) -> Self::Output {
        DVecScalarExpr::new(self, <<Self as Operand>::Element as Promote<S>>::promote_rhs(rhs))
    }
}

macro_rules! vector_binary_ops {
    ($([$($g:tt)*] $lhs:ty),* $(,)?) => {$(
        impl<$($g)*, Rhs> Add<Rhs> for $lhs
        where
            $lhs: Vector,
            Rhs: Vector<Order = <$lhs as Operand>::Order>,
            <$lhs as Operand>::Element: Combine<AddOp, Rhs::Element>,
        {
            type Output = DVecAddExpr<$lhs, Rhs>;

            fn add(self, rhs: Rhs) -> Self::Output {
                DVecBinaryExpr::new(self, rhs)
            }
        }

        impl<$($g)*, Rhs> Sub<Rhs> for $lhs
        where
            $lhs: Vector,
            Rhs: Vector<Order = <$lhs as Operand>::Order>,
            <$lhs as Operand>::Element: Combine<SubOp, Rhs::Element>,
        {
            type Output = DVecSubExpr<$lhs, Rhs>;

            fn sub(self, rhs: Rhs) -> Self::Output {
                DVecBinaryExpr::new(self, rhs)
            }
        }
    )*};
}

vector_binary_ops!(
    ['a, T, TF] &'a DynamicVector<T, TF>,
    ['a, T, TF] &'a CompressedVector<T, TF>,
    [VT, ET, Op] DVecScalarExpr<VT, ET, Op>,
    [VT, ET, Op] SVecScalarExpr<VT, ET, Op>,
    [L, R, Op] DVecBinaryExpr<L, R, Op>,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags::{ColumnVector, RowVector};
    use approx::assert_abs_diff_eq;

    #[test]
    fn add_and_sub_combine_element_types() {
        let a = DynamicVector::<i32>::from_vec(vec![1, 2, 3]);
        let b = DynamicVector::<f64>::from_vec(vec![0.5, 0.5, 0.5]);
        let sum = &a + &b;
        assert_eq!(sum.evaluate().into_vec(), vec![1.5, 2.5, 3.5]);
        let diff = &b - &a;
        assert_eq!(diff.get(2), -2.5);
    }

    #[test]
    fn chained_expression_evaluates_in_one_pass() {
        let a = DynamicVector::<f64, RowVector>::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let b = DynamicVector::<f64, RowVector>::from_vec(vec![4.0, 3.0, 2.0, 1.0]);
        let c = CompressedVector::<f64, RowVector>::from_parts(4, vec![2], vec![10.0]);
        let e = &a * 2.0f64 + &b - &c;
        let mut out = DynamicVector::<f64, RowVector>::new(4);
        out.assign(&e).unwrap();
        assert_eq!(out.as_slice(), &[6.0, 7.0, -2.0, 9.0]);

        let scaled = (&a + &b) * 0.1f64;
        for i in 0..4 {
            assert_abs_diff_eq!(scaled.get(i), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn sparse_operands_mix_with_dense() {
        let s = CompressedVector::<i64, ColumnVector>::from_parts(3, vec![0, 2], vec![5, -1]);
        let d = DynamicVector::<i64, ColumnVector>::from_vec(vec![1, 1, 1]);
        assert_eq!((&s + &d).evaluate().into_vec(), vec![6, 1, 0]);
        assert_eq!((&s * 3i64 - &d).evaluate().into_vec(), vec![14, -1, -4]);
    }

    #[test]
    #[should_panic(expected = "Vector sizes do not match")]
    fn mismatched_sizes_panic() {
        let a = DynamicVector::<f32>::new(2);
        let b = DynamicVector::<f32>::new(3);
        let _ = &a + &b;
    }
}
