//! Element combination: the result element type of `a op b`.

use super::numeric::{Numeric, Promote};

/// A binary arithmetic operator on a single promoted element type.
pub trait BinaryOp: Clone + Copy + std::fmt::Debug + Default + 'static {
    const SYMBOL: char;
    fn apply<T: Numeric>(lhs: T, rhs: T) -> T;
}

/// Multiplication tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultOp;
/// Addition tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOp;
/// Subtraction tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubOp;
/// Division tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DivOp;

impl BinaryOp for MultOp {
    const SYMBOL: char = '*';
    #[inline(always)]
    fn apply<T: Numeric>(lhs: T, rhs: T) -> T {
        lhs * rhs
    }
}

impl BinaryOp for AddOp {
    const SYMBOL: char = '+';
    #[inline(always)]
    fn apply<T: Numeric>(lhs: T, rhs: T) -> T {
        lhs + rhs
    }
}

impl BinaryOp for SubOp {
    const SYMBOL: char = '-';
    #[inline(always)]
    fn apply<T: Numeric>(lhs: T, rhs: T) -> T {
        lhs - rhs
    }
}

impl BinaryOp for DivOp {
    const SYMBOL: char = '/';
    #[inline(always)]
    fn apply<T: Numeric>(lhs: T, rhs: T) -> T {
        lhs / rhs
    }
}

/// Operators that apply one scalar to every element of an operand.
///
/// `prepare` runs once per expression; `apply_prepared` once per element.
pub trait ScalarOp: BinaryOp {
    fn prepare<T: Numeric>(scalar: T) -> T;
    fn apply_prepared<T: Numeric>(value: T, factor: T) -> T;
}

impl ScalarOp for MultOp {
    #[inline(always)]
    fn prepare<T: Numeric>(scalar: T) -> T {
        scalar
    }
    #[inline(always)]
    fn apply_prepared<T: Numeric>(value: T, factor: T) -> T {
        value * factor
    }
}

// Floating-point division multiplies by the reciprocal.
impl ScalarOp for DivOp {
    #[inline]
    fn prepare<T: Numeric>(scalar: T) -> T {
        debug_assert!(!scalar.is_default(), "Division by zero detected");
        if T::IS_FLOAT { T::one() / scalar } else { scalar }
    }
    #[inline(always)]
    fn apply_prepared<T: Numeric>(value: T, factor: T) -> T {
        if T::IS_FLOAT { value * factor } else { value / factor }
    }
}

/// Combination of two element types under operator `Op`.
///
/// Every operator uses the same promotion rule, so the result type only depends
/// on the pair of operand types. Pairs with no promotion (e.g. anything with
/// `bool`) have no impl, which makes misuse a compile error.
pub trait Combine<Op: BinaryOp, Rhs: Numeric>: Numeric {
    type Output: Numeric;

    fn combine(self, rhs: Rhs) -> <Self as Combine<Op, Rhs>>::Output;
}

impl<Op, A, B> Combine<Op, B> for A
where
    Op: BinaryOp,
    A: Promote<B>,
    B: Numeric,
{
    type Output = <A as Promote<B>>::Output;

    #[inline(always)]
    fn combine(self, rhs: B) -> <A as Promote<B>>::Output {
        Op::apply(self.promote(), A::promote_rhs(rhs))
    }
}

/// Result element type of `A * B`.
pub type MultTrait<A, B> = <A as Combine<MultOp, B>>::Output;
/// Result element type of `A + B`.
pub type AddTrait<A, B> = <A as Combine<AddOp, B>>::Output;
/// Result element type of `A - B`.
pub type SubTrait<A, B> = <A as Combine<SubOp, B>>::Output;
/// Result element type of `A / B`.
pub type DivTrait<A, B> = <A as Combine<DivOp, B>>::Output;

/// `value * scalar`, converted back into the element type (`value *= scalar`).
#[inline]
pub fn scale_element<T, S>(value: T, scalar: S) -> T
where
    T: Promote<S>,
    S: Numeric,
{
    T::demote(value.promote() * T::promote_rhs(scalar))
}

/// Compiles `value /= scalar` for a whole run of elements.
///
/// When the promoted type is floating point the reciprocal is computed once and
/// every element is multiplied by it; this can differ from true division in the
/// last bit. Integer results divide each element directly.
#[derive(Debug, Clone, Copy)]
pub struct Divisor<T: Promote<S>, S: Numeric> {
    factor: <T as Promote<S>>::Output,
    reciprocal: bool,
}

impl<T: Promote<S>, S: Numeric> Divisor<T, S> {
    pub fn new(scalar: S) -> Self {
        debug_assert!(!scalar.is_default(), "Division by zero detected");
        let divisor = T::promote_rhs(scalar);
        if <<T as Promote<S>>::Output as Numeric>::IS_FLOAT {
            let one = <<T as Promote<S>>::Output as num_traits::One>::one();
            Divisor { factor: one / divisor, reciprocal: true }
        } else {
            Divisor { factor: divisor, reciprocal: false }
        }
    }

    #[inline]
    pub fn apply(&self, value: T) -> T {
        if self.reciprocal {
            T::demote(value.promote() * self.factor)
        } else {
            T::demote(value.promote() / self.factor)
        }
    }
}
