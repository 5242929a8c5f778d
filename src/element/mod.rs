//! Element types and their combination rules.
//!
//! [`Numeric`] marks the types that may be stored in a container, [`Promote`]
//! computes the common type of two of them, and [`Combine`] applies one of the
//! arithmetic operator tags in that common type.

pub mod combine;
pub mod numeric;

pub use combine::{
    AddOp, AddTrait, BinaryOp, Combine, DivOp, DivTrait, Divisor, MultOp, MultTrait, ScalarOp,
    SubOp, SubTrait, scale_element,
};
pub use numeric::{Numeric, Promote, WidenInto};
