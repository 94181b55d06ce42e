//! Local search improvers for TSP tours.
//!
//! - [`TwoOpt`] — Exhaustive 2-opt edge exchange
//! - [`ThreeOpt`] — 3-opt with a configurable set of [`Reconnection`]s
//! - [`AffinityTwoOpt`] — Affinity-guided perturbation followed by 2-opt
//!
//! Every improver implements [`TourImprover`] and runs until a full pass
//! produces no modification or [`SearchConfig::max_passes`] is reached.

mod affinity;
mod affinity_two_opt;
mod config;
mod improver;
mod three_opt;
mod two_opt;

pub use affinity::AffinityTable;
pub use affinity_two_opt::AffinityTwoOpt;
pub use config::{AffinityConfig, AffinityStrategy, SearchConfig, ThreeOptConfig};
pub use improver::{SearchStats, Termination, TourImprover};
pub use three_opt::{Cut, Reconnection, ThreeOpt};
pub use two_opt::TwoOpt;

pub(crate) use improver::log_outcome;
