//! sparow: expression templates with compile-time operand resolution, and row
//! views over compressed matrices.
//!
//! This crate provides lazily evaluated vector and matrix expressions whose
//! result types are computed at compile time, together with non-owning row
//! views over row-major and column-major compressed matrices.
//!
//! - [`element`] decides the element type of `a op b` for primitive numbers.
//! - [`resolve`] decides, from an operand's storage, shape and order, whether
//!   `operand op scalar` is legal and which expression node it produces.
//! - [`expr`] holds the expression nodes themselves.
//! - [`views`] exposes one row of a compressed matrix as a sparse row vector.
//!
//! ```
//! use sparow::core::RowMajor;
//! use sparow::matrix::CompressedMatrix;
//!
//! let mut m = CompressedMatrix::<f64, RowMajor>::new(2, 4);
//! let mut r = m.row_mut(0).unwrap();
//! r.set(3, -2.0).unwrap();
//! r.set(1, 3.0).unwrap();
//! r *= 2.0;
//! assert_eq!(r.iter().map(|(j, &v)| (j, v)).collect::<Vec<_>>(), vec![(1, 6.0), (3, -4.0)]);
//! ```

pub mod config;
pub mod core;
pub mod element;
pub mod error;
pub mod expr;
pub mod matrix;
pub mod resolve;
pub mod vector;
pub mod views;

// Re-exports for convenience
pub use crate::config::GrowthOptions;
pub use crate::core::{
    ColumnMajor, ColumnVector, Descriptor, Evaluate, Matrix, Operand, RowMajor, RowVector,
    SparseMatrix, SparseVector, SparseVectorMut, Vector,
};
pub use crate::element::{AddTrait, DivTrait, MultTrait, Numeric, SubTrait};
pub use crate::error::{Result, SpError};
pub use crate::expr::{DMatScalarExpr, DVecAddExpr, DVecScalarExpr, DVecSubExpr, SVecScalarExpr};
pub use crate::matrix::{CompressedMatrix, DynamicMatrix};
pub use crate::resolve::{Invalid, is_invalid};
pub use crate::vector::{CompressedVector, DynamicVector};
pub use crate::views::{RowEntry, SparseRow, row, row_mut};
