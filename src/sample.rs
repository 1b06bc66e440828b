//! Struct `Sample` represents the projection of a dataset
//! onto the dimensions used to explain a selection.

/// Provides feature struct.
pub mod feature;
/// Provides sample struct.
pub mod sample_struct;


pub use sample_struct::Sample;
pub use feature::Feature;
