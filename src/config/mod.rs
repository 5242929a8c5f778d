pub mod options;

pub use options::GrowthOptions;
