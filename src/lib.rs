//! # u-tsp
//!
//! Traveling salesman tour improvement: greedy sweeps, 2-opt, 3-opt, and
//! affinity-guided 2-opt over a shared distance table.
//!
//! ## Modules
//!
//! - [`models`] — Tour permutation and planar points
//! - [`distance`] — Distance table trait, dense matrix, and Euclidean table
//! - [`constructive`] — Greedy sweeps (Nearest Neighbor, Adjacent Swap)
//! - [`local_search`] — Local search improvers (2-opt, 3-opt, AFD-2opt)
//! - [`heuristic`] — Selecting an improver by name
//! - [`error`] — Precondition errors
//!
//! Improvers emit `tracing` events; the crate installs no subscriber.

pub mod constructive;
pub mod distance;
pub mod error;
pub mod heuristic;
pub mod local_search;
pub mod models;

pub use error::TspError;
