//! Greedy single-sweep heuristics.
//!
//! - [`NearestNeighbor`] — Nearest-extension from a fixed start, O(n²)
//! - [`AdjacentSwap`] — Exchange of neighboring nodes when the farther one is closer, O(n)
//!
//! Both rework an existing tour in place and implement
//! [`TourImprover`](crate::local_search::TourImprover), so they can seed or
//! replace the local search operators.

mod adjacent_swap;
mod nearest_neighbor;

pub use adjacent_swap::AdjacentSwap;
pub use nearest_neighbor::NearestNeighbor;
