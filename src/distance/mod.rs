//! Pairwise distance lookup.
//!
//! Provides the [`DistanceTable`] contract consumed by every heuristic,
//! a precomputed dense matrix, and an on-demand Euclidean table.

mod euclidean;
mod matrix;
mod table;

pub use euclidean::EuclideanTable;
pub use matrix::DistanceMatrix;
pub use table::DistanceTable;
