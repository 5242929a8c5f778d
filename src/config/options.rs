//! Tunable options for sparse storage growth.
//!
//! This module provides the `GrowthOptions` struct, which controls how a
//! row view extends the per-row capacity of a row-major compressed matrix
//! while assigning a dense vector into it element by element.

/// Capacity growth policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthOptions {
    /// Smallest capacity a row is ever grown to.
    pub min_capacity: usize,

    /// Multiplier applied to the current capacity (plus one) on each growth step.
    pub factor: usize,
}

impl Default for GrowthOptions {
    fn default() -> Self {
        Self { min_capacity: 7, factor: 2 }
    }
}

impl GrowthOptions {
    /// New capacity for a row that is full: `clamp(factor*capacity + 1, min_capacity, size)`.
    ///
    /// The upper bound wins over the lower one, so a row never reserves more slots
    /// than it has columns.
    pub fn extend_capacity(&self, capacity: usize, size: usize) -> usize {
        let grown = self.factor.saturating_mul(capacity).saturating_add(1);
        grown.max(self.min_capacity).min(size)
    }
}
