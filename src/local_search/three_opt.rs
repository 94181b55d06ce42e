//! 3-opt improvement.
//!
//! # Algorithm
//!
//! Removing three edges (i, i+1), (j, j+1), (k, k+1) cuts the tour into
//! segments `A B C D` with `B = [i+1..=j]` and `C = [j+1..=k]`; `A` and `D`
//! join through the rest of the cycle. There are seven ways to reconnect
//! the pieces other than the identity, enumerated by [`Reconnection`].
//! For every triple with `j >= i+2` and `k >= j+2` the configured
//! reconnections are evaluated and the best improving one is applied
//! immediately, realized as at most three segment reversals. Full scans
//! repeat until one produces no modification.
//!
//! By default only [`Reconnection::SegmentSwap`] is explored, which adds
//! the edges (i, j+1), (k, i+1), (j, k+1).
//!
//! # Complexity
//!
//! O(n³) per pass, O(n⁴) worst case for convergence.
//!
//! # Reference
//!
//! Lin, S. (1965). "Computer Solutions of the Traveling Salesman Problem",
//! *Bell System Technical Journal* 44(10), 2245-2269.

use serde::{Deserialize, Serialize};

use super::improver::{log_outcome, run_to_fixed_point};
use super::{SearchStats, ThreeOptConfig, TourImprover};
use crate::distance::DistanceTable;
use crate::error::TspError;
use crate::models::{NodeId, Tour};

/// A way of reconnecting segments `B` and `C` after a 3-edge cut.
///
/// `'` marks a reversed segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reconnection {
    /// A - B' - C - D (a 2-opt move on the first two cut edges).
    ReverseFirst,
    /// A - B - C' - D (a 2-opt move on the last two cut edges).
    ReverseSecond,
    /// A - B' - C' - D
    ReverseBoth,
    /// A - C - B - D: the segments trade places, keeping orientation.
    SegmentSwap,
    /// A - C - B' - D
    SwapReverseFirst,
    /// A - C' - B - D
    SwapReverseSecond,
    /// A - C' - B' - D (a 2-opt move on the outer cut edges).
    SwapReverseBoth,
}

impl Reconnection {
    /// Every reconnection pattern.
    pub const ALL: [Reconnection; 7] = [
        Reconnection::ReverseFirst,
        Reconnection::ReverseSecond,
        Reconnection::ReverseBoth,
        Reconnection::SegmentSwap,
        Reconnection::SwapReverseFirst,
        Reconnection::SwapReverseSecond,
        Reconnection::SwapReverseBoth,
    ];

    /// Length of the three edges this reconnection introduces.
    pub fn added_length<D: DistanceTable + ?Sized>(self, cut: &Cut, distances: &D) -> f64 {
        let d = |u: NodeId, v: NodeId| distances.distance(u, v);
        match self {
            Reconnection::ReverseFirst => {
                d(cut.a, cut.b_end) + d(cut.b_start, cut.c_start) + d(cut.c_end, cut.d)
            }
            Reconnection::ReverseSecond => {
                d(cut.a, cut.b_start) + d(cut.b_end, cut.c_end) + d(cut.c_start, cut.d)
            }
            Reconnection::ReverseBoth => {
                d(cut.a, cut.b_end) + d(cut.b_start, cut.c_end) + d(cut.c_start, cut.d)
            }
            Reconnection::SegmentSwap => {
                d(cut.a, cut.c_start) + d(cut.c_end, cut.b_start) + d(cut.b_end, cut.d)
            }
            Reconnection::SwapReverseFirst => {
                d(cut.a, cut.c_start) + d(cut.c_end, cut.b_end) + d(cut.b_start, cut.d)
            }
            Reconnection::SwapReverseSecond => {
                d(cut.a, cut.c_end) + d(cut.c_start, cut.b_start) + d(cut.b_end, cut.d)
            }
            Reconnection::SwapReverseBoth => {
                d(cut.a, cut.c_end) + d(cut.c_start, cut.b_end) + d(cut.b_start, cut.d)
            }
        }
    }

    /// Rewires `tour` for the cut at positions `(i, j, k)`.
    ///
    /// Requires `i < j < k < tour.len()`.
    pub fn apply(self, tour: &mut Tour, i: usize, j: usize, k: usize) {
        // after reversing [i+1, k], C' fills [i+1, i+c_len] and B' the rest
        let c_len = k - j;
        match self {
            Reconnection::ReverseFirst => tour.reverse(i + 1, j),
            Reconnection::ReverseSecond => tour.reverse(j + 1, k),
            Reconnection::ReverseBoth => {
                tour.reverse(i + 1, j);
                tour.reverse(j + 1, k);
            }
            Reconnection::SegmentSwap => {
                tour.reverse(i + 1, k);
                tour.reverse(i + 1, i + c_len);
                tour.reverse(i + c_len + 1, k);
            }
            Reconnection::SwapReverseFirst => {
                tour.reverse(i + 1, k);
                tour.reverse(i + 1, i + c_len);
            }
            Reconnection::SwapReverseSecond => {
                tour.reverse(i + 1, k);
                tour.reverse(i + c_len + 1, k);
            }
            Reconnection::SwapReverseBoth => tour.reverse(i + 1, k),
        }
    }
}

/// Endpoints of the segments produced by cutting three edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cut {
    /// Last node of `A` (position i).
    pub a: NodeId,
    /// First node of `B` (position i+1).
    pub b_start: NodeId,
    /// Last node of `B` (position j).
    pub b_end: NodeId,
    /// First node of `C` (position j+1).
    pub c_start: NodeId,
    /// Last node of `C` (position k).
    pub c_end: NodeId,
    /// First node of `D` (position k+1, wrapping to 0).
    pub d: NodeId,
}

impl Cut {
    /// Reads the segment endpoints for cut positions `(i, j, k)`.
    pub fn at(tour: &Tour, i: usize, j: usize, k: usize) -> Self {
        Self {
            a: tour.get(i),
            b_start: tour.get(i + 1),
            b_end: tour.get(j),
            c_start: tour.get(j + 1),
            c_end: tour.get(k),
            d: tour.get(k + 1),
        }
    }

    /// Length of the three edges the cut removes.
    pub fn removed_length<D: DistanceTable + ?Sized>(&self, distances: &D) -> f64 {
        distances.distance(self.a, self.b_start)
            + distances.distance(self.b_end, self.c_start)
            + distances.distance(self.c_end, self.d)
    }
}

/// 3-opt local search to a fixed point.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{ThreeOpt, ThreeOptConfig, TourImprover};
///
/// let points: Vec<Point> = (0..8).map(|x| Point::new(x as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_points(&points);
///
/// let mut tour = Tour::new(vec![0, 1, 4, 5, 2, 3, 6, 7]).unwrap();
/// let before = tour.distance(&dm);
/// let stats = ThreeOpt::new(&dm).apply(&mut tour).unwrap();
/// assert!(stats.moves > 0);
/// assert!(tour.distance(&dm) < before);
/// ```
#[derive(Debug, Clone)]
pub struct ThreeOpt<'a, D: ?Sized> {
    distances: &'a D,
    config: ThreeOptConfig,
}

impl<'a, D: DistanceTable + ?Sized> ThreeOpt<'a, D> {
    /// Creates a 3-opt improver exploring only [`Reconnection::SegmentSwap`].
    pub fn new(distances: &'a D) -> Self {
        Self::with_config(distances, ThreeOptConfig::default())
    }

    /// Creates a 3-opt improver with an explicit configuration.
    pub fn with_config(distances: &'a D, config: ThreeOptConfig) -> Self {
        Self { distances, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ThreeOptConfig {
        &self.config
    }
}

impl<D: DistanceTable + ?Sized> TourImprover for ThreeOpt<'_, D> {
    fn name(&self) -> &'static str {
        "three-opt"
    }

    fn apply(&mut self, tour: &mut Tour) -> Result<SearchStats, TspError> {
        self.config.validate()?;
        tour.validate_against(self.distances)?;

        if tour.len() < 4 {
            return Ok(SearchStats::too_small());
        }

        let distances = self.distances;
        let config = &self.config;
        let stats = run_to_fixed_point("three-opt", &config.search, || {
            three_opt_pass(tour, distances, config)
        });
        log_outcome(self.name(), tour, &stats);
        Ok(stats)
    }
}

/// One full 3-opt scan. Returns the number of applied reconnections.
fn three_opt_pass<D: DistanceTable + ?Sized>(
    tour: &mut Tour,
    distances: &D,
    config: &ThreeOptConfig,
) -> usize {
    let n = tour.len();
    let edges = config.search.edge_count(n);
    let mut moves = 0;

    for i in 0..edges {
        for j in (i + 2)..edges {
            for k in (j + 2)..edges {
                let cut = Cut::at(tour, i, j, k);
                let removed = cut.removed_length(distances);

                let mut best: Option<(Reconnection, f64)> = None;
                for &reconnection in &config.reconnections {
                    let gain = removed - reconnection.added_length(&cut, distances);
                    if gain > config.search.min_gain && best.map_or(true, |(_, g)| gain > g) {
                        best = Some((reconnection, gain));
                    }
                }

                if let Some((reconnection, _)) = best {
                    reconnection.apply(tour, i, j, k);
                    moves += 1;
                }
            }
        }
    }
    moves
}
