//! Core type-level vocabulary: operand tags, capability traits and foreign wrappers.

pub mod tags;
pub mod traits;
pub mod wrappers;

pub use tags::{
    AndT, Bool, ColumnMajor, ColumnVector, Dense, Descriptor, False, MatrixShape, NotT,
    OrderKind, RowMajor, RowVector, ShapeKind, Sparse, StorageKind, True, VectorShape,
};
pub use traits::{
    Evaluate, Matrix, Operand, Scalar, SparseMatrix, SparseVector, SparseVectorMut,
    Unqualified, Unqualify, Vector,
};
