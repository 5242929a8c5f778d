//! Non-owning views into existing containers.

pub mod sparse_row;

pub use sparse_row::{ColumnScan, MatrixRef, RowEntry, RowStrategy, SparseRow, row, row_mut};
