//! The `Numeric` element trait and the promotion table between primitive types.

use num_traits::Num;
use std::fmt::Debug;

/// Types that can be stored as elements of a vector or matrix.
///
/// Implemented for the primitive integer and floating-point types.
pub trait Numeric: Num + Copy + PartialOrd + Debug + Default + 'static {
    /// Whether the type is a floating-point type.
    const IS_FLOAT: bool;

    /// `true` if the value equals the default (zero) value.
    #[inline]
    fn is_default(self) -> bool {
        self == Self::zero()
    }

    /// `true` only for floating-point NaN.
    fn is_nan(self) -> bool;

    /// `self * rhs`, wrapping on integer overflow.
    fn fold_product(self, rhs: Self) -> Self;
}

/// Promotion of two element types to a common "wider" type.
///
/// `Output` is what built-in arithmetic between the two would produce: floats
/// beat integers and larger types beat smaller ones. `demote` converts a result
/// back into the left-hand type, which is what compound assignment (`*=`, `/=`)
/// on stored elements needs.
pub trait Promote<Rhs: Numeric>: Numeric {
    type Output: Numeric;

    fn promote(self) -> <Self as Promote<Rhs>>::Output;
    fn promote_rhs(rhs: Rhs) -> <Self as Promote<Rhs>>::Output;
    fn demote(value: <Self as Promote<Rhs>>::Output) -> Self;
}

/// Element types that convert losslessly into the wider type `ET`.
///
/// Holds whenever `ET` is the result of combining `Self` with some other type,
/// which is what expression nodes rely on to read operands in their own type.
pub trait WidenInto<ET: Numeric>: Promote<ET, Output = ET> {}

impl<T, ET> WidenInto<ET> for T
where
    T: Promote<ET, Output = ET>,
    ET: Numeric,
{
}

macro_rules! impl_numeric {
    (float: $($t:ty),*) => {$(
        impl Numeric for $t {
            const IS_FLOAT: bool = true;
            #[inline]
            fn is_nan(self) -> bool { <$t>::is_nan(self) }
            #[inline]
            fn fold_product(self, rhs: Self) -> Self { self * rhs }
        }
    )*};
    (int: $($t:ty),*) => {$(
        impl Numeric for $t {
            const IS_FLOAT: bool = false;
            #[inline]
            fn is_nan(self) -> bool { false }
            #[inline]
            fn fold_product(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
        }
    )*};
}

impl_numeric!(int: i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);
impl_numeric!(float: f32, f64);

// `$hi` wins against every type listed after the semicolon.
macro_rules! promote_to {
    ($hi:ty; $($lo:ty),*) => {
        impl Promote<$hi> for $hi {
            type Output = $hi;
            #[inline(always)] fn promote(self) -> $hi { self }
            #[inline(always)] fn promote_rhs(rhs: $hi) -> $hi { rhs }
            #[inline(always)] fn demote(value: $hi) -> $hi { value }
        }
        $(
            impl Promote<$lo> for $hi {
                type Output = $hi;
                #[inline(always)] fn promote(self) -> $hi { self }
                #[inline(always)] fn promote_rhs(rhs: $lo) -> $hi { rhs as $hi }
                #[inline(always)] fn demote(value: $hi) -> $hi { value }
            }
            impl Promote<$hi> for $lo {
                type Output = $hi;
                #[inline(always)] fn promote(self) -> $hi { self as $hi }
                #[inline(always)] fn promote_rhs(rhs: $hi) -> $hi { rhs }
                #[inline(always)] fn demote(value: $hi) -> $lo { value as $lo }
            }
        )*
    };
}

promote_to!(i8;);
promote_to!(u8; i8);
promote_to!(i16; i8, u8);
promote_to!(u16; i8, u8, i16);
promote_to!(i32; i8, u8, i16, u16);
promote_to!(u32; i8, u8, i16, u16, i32);
promote_to!(i64; i8, u8, i16, u16, i32, u32);
promote_to!(isize; i8, u8, i16, u16, i32, u32, i64);
promote_to!(usize; i8, u8, i16, u16, i32, u32, i64, isize);
promote_to!(u64; i8, u8, i16, u16, i32, u32, i64, isize, usize);
promote_to!(f32; i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);
promote_to!(f64; i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32);
