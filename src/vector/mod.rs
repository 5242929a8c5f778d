//! Vector module: dense and compressed vector containers.

pub mod dense;
pub use dense::DynamicVector;
pub mod sparse;
pub use sparse::CompressedVector;
