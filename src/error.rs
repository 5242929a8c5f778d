use thiserror::Error;

// Unified error type for sparow

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpError {
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("duplicate entry at index {index}")]
    DuplicateEntry { index: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpError>;

impl SpError {
    pub(crate) fn row_index(index: usize, rows: usize) -> Self {
        SpError::DimensionMismatch(format!("invalid row access index {index} (rows = {rows})"))
    }

    pub(crate) fn sizes(what: &str, expected: usize, got: usize) -> Self {
        SpError::DimensionMismatch(format!("{what} sizes do not match (expected {expected}, got {got})"))
    }
}
