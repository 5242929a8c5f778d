//! Matrix module: dense and compressed matrix containers.

pub mod dense;
pub use dense::DynamicMatrix;
pub mod sparse;
pub use sparse::CompressedMatrix;
