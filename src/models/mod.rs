//! Domain model types for traveling salesman tours.
//!
//! Provides node coordinates and the tour itself: a permutation of node
//! identifiers mutated only through segment reversal.

mod point;
mod tour;

pub use point::Point;
pub use tour::{NodeId, Tour};
