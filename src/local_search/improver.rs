//! Common improver contract and fixed-point driver.

use tracing::{debug, trace};

use super::SearchConfig;
use crate::error::TspError;
use crate::models::Tour;

/// Why an improver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The tour was too small for the neighborhood and is already optimal.
    TooSmall,
    /// A full pass produced no modification: the tour is a local fixed point.
    Converged,
    /// The configured pass limit was reached before convergence.
    PassLimit,
}

/// Summary of one `apply` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of full neighborhood scans performed.
    pub passes: usize,
    /// Number of accepted moves.
    pub moves: usize,
    /// Why the search stopped.
    pub termination: Termination,
}

impl SearchStats {
    /// Stats for a tour that was left untouched because of its size.
    pub fn too_small() -> Self {
        Self {
            passes: 0,
            moves: 0,
            termination: Termination::TooSmall,
        }
    }

    /// Stats for a single constructive sweep.
    pub fn single_pass(moves: usize) -> Self {
        Self {
            passes: 1,
            moves,
            termination: Termination::Converged,
        }
    }

    /// Returns `true` if at least one move was applied.
    pub fn modified(&self) -> bool {
        self.moves > 0
    }

    /// Chains the stats of a later phase onto this one.
    ///
    /// Passes and moves add up; the later phase decides the termination.
    pub fn merge(self, later: SearchStats) -> SearchStats {
        SearchStats {
            passes: self.passes + later.passes,
            moves: self.moves + later.moves,
            termination: later.termination,
        }
    }
}

/// A heuristic that improves a tour in place.
///
/// The distance table is bound at construction; `apply` only receives the
/// tour. Implementations validate their configuration and the tour against
/// the table before mutating anything, and treat tours below their
/// neighborhood's minimum size as already optimal.
pub trait TourImprover {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Improves `tour` in place until the heuristic's stopping rule holds.
    fn apply(&mut self, tour: &mut Tour) -> Result<SearchStats, TspError>;
}

/// Repeats `pass` until it reports no moves or the pass limit is reached.
///
/// `pass` performs one full neighborhood scan and returns the number of
/// moves it applied.
pub(crate) fn run_to_fixed_point<F>(name: &'static str, config: &SearchConfig, mut pass: F) -> SearchStats
where
    F: FnMut() -> usize,
{
    let mut passes = 0;
    let mut moves = 0;
    loop {
        let applied = pass();
        passes += 1;
        moves += applied;
        trace!(event = "pass", heuristic = name, pass = passes, moves = applied);

        if applied == 0 {
            return SearchStats {
                passes,
                moves,
                termination: Termination::Converged,
            };
        }
        if config.pass_limit_reached(passes) {
            return SearchStats {
                passes,
                moves,
                termination: Termination::PassLimit,
            };
        }
    }
}

pub(crate) fn log_outcome(name: &'static str, tour: &Tour, stats: &SearchStats) {
    debug!(
        event = "search_end",
        heuristic = name,
        nodes = tour.len(),
        passes = stats.passes,
        moves = stats.moves,
        termination = ?stats.termination,
    );
}
