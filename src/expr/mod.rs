//! Lazy expression templates.
//!
//! Arithmetic on containers builds one of these nodes instead of a result. The
//! node implements the same capability traits as a container, so it can be
//! read element-wise, nested into larger expressions, or assigned into a
//! vector, matrix or row view in a single fused pass.

pub mod scalar;
pub mod vector;

pub use scalar::{DMatScalarExpr, DVecScalarExpr, SVecScalarExpr, ScaledIter};
pub use vector::{DVecAddExpr, DVecBinaryExpr, DVecSubExpr};
