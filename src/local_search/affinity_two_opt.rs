//! Affinity-guided 2-opt (AFD-2opt).
//!
//! # Algorithm
//!
//! 1. Build an [`AffinityTable`] from the current tour.
//! 2. Perturb the tour with the configured [`AffinityStrategy`]:
//!    - `Construction` rebuilds the tour from a uniformly random start
//!      node. At each step the unplaced node with the highest affinity to
//!      the current node is appended if that affinity reaches the dynamic
//!      threshold: the initial threshold clamped into
//!      `[floor, peak(current)]`. Otherwise the last remaining candidate in
//!      scan order is appended instead.
//!    - `GatedExchange` runs 2-opt scans that accept an improving exchange
//!      only when the affinities of the two new edges sum above a
//!      threshold. The threshold starts each pass at its initial value and
//!      drops to zero for the rest of the pass once a scan row accepts
//!      nothing; that row is then scanned again.
//! 3. Polish with exhaustive 2-opt.
//!
//! The random source is only used for the start node of `Construction`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::improver::{log_outcome, run_to_fixed_point};
use super::two_opt::{descend, exchange_gain, is_closing_neighbor};
use super::{AffinityConfig, AffinityStrategy, AffinityTable, SearchStats, TourImprover};
use crate::distance::DistanceTable;
use crate::error::TspError;
use crate::models::{NodeId, Tour};

/// Slack when comparing an affinity against the dynamic threshold.
const AFFINITY_EPSILON: f64 = 1e-12;

/// Affinity-guided perturbation followed by 2-opt.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{AffinityTwoOpt, TourImprover};
///
/// let points: Vec<Point> = (0..6)
///     .map(|k| Point::new((k as f64).cos() * 10.0, (k as f64).sin() * 10.0))
///     .collect();
/// let dm = DistanceMatrix::from_points(&points);
///
/// let mut tour = Tour::new(vec![0, 3, 1, 4, 2, 5]).unwrap();
/// AffinityTwoOpt::seeded(&dm, 42).apply(&mut tour).unwrap();
/// assert_eq!(tour.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct AffinityTwoOpt<'a, D: ?Sized, R> {
    distances: &'a D,
    config: AffinityConfig,
    rng: R,
}

impl<'a, D: DistanceTable + ?Sized> AffinityTwoOpt<'a, D, StdRng> {
    /// Creates an improver drawing from a seeded [`StdRng`].
    pub fn seeded(distances: &'a D, seed: u64) -> Self {
        Self::new(distances, StdRng::seed_from_u64(seed))
    }
}

impl<'a, D: DistanceTable + ?Sized, R: Rng> AffinityTwoOpt<'a, D, R> {
    /// Creates an improver with the default configuration.
    pub fn new(distances: &'a D, rng: R) -> Self {
        Self {
            distances,
            config: AffinityConfig::default(),
            rng,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: AffinityConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AffinityConfig {
        &self.config
    }
}

impl<D: DistanceTable + ?Sized, R: Rng> TourImprover for AffinityTwoOpt<'_, D, R> {
    fn name(&self) -> &'static str {
        "affinity-two-opt"
    }

    fn apply(&mut self, tour: &mut Tour) -> Result<SearchStats, TspError> {
        self.config.validate()?;
        tour.validate_against(self.distances)?;

        // tours with 3 or fewer nodes are already optimal
        if tour.len() < 4 {
            return Ok(SearchStats::too_small());
        }

        let table = AffinityTable::build(tour, self.distances)?;
        let perturbed = match self.config.strategy {
            AffinityStrategy::Construction => {
                let start = self.rng.random_range(0..table.len());
                let placed = construct(tour, &table, start, self.config.initial_threshold);
                SearchStats::single_pass(placed)
            }
            AffinityStrategy::GatedExchange => {
                gated_exchange(tour, self.distances, &table, &self.config)
            }
        };

        let stats = perturbed.merge(descend(tour, self.distances, &self.config.search));
        log_outcome(self.name(), tour, &stats);
        Ok(stats)
    }
}

/// Rebuilds `tour` by affinity-guided extension from row `start`.
///
/// Returns the number of positions that had to be rewired.
pub(crate) fn construct(
    tour: &mut Tour,
    table: &AffinityTable,
    start: usize,
    initial_threshold: f64,
) -> usize {
    let n = table.len();
    let mut placed = vec![false; n];
    let mut current = start;
    placed[current] = true;
    let mut rewired = place(tour, 0, table.node(current));

    for position in 1..n {
        let threshold = initial_threshold
            .max(table.floor())
            .min(table.peak(current));

        let mut best: Option<(usize, f64)> = None;
        for j in (0..n).filter(|&j| !placed[j]) {
            let m = table.affinity(current, j);
            if best.map_or(true, |(_, bm)| m > bm) {
                best = Some((j, m));
            }
        }
        let Some((best_row, best_affinity)) = best else {
            break;
        };

        let next = if best_affinity + AFFINITY_EPSILON >= threshold {
            best_row
        } else {
            (0..n)
                .rev()
                .find(|&j| !placed[j] && j != best_row)
                .unwrap_or(best_row)
        };

        placed[next] = true;
        rewired += place(tour, position, table.node(next));
        current = next;
    }
    rewired
}

/// Moves `node` to `position` by reversing `[position, current position]`.
///
/// Positions before `position` are never touched. Returns 1 if the tour changed.
fn place(tour: &mut Tour, position: usize, node: NodeId) -> usize {
    match tour.nodes()[position..].iter().position(|&x| x == node) {
        Some(0) | None => 0,
        Some(offset) => {
            tour.reverse(position, position + offset);
            1
        }
    }
}

/// 2-opt passes with affinity-gated acceptance.
fn gated_exchange<D: DistanceTable + ?Sized>(
    tour: &mut Tour,
    distances: &D,
    table: &AffinityTable,
    config: &AffinityConfig,
) -> SearchStats {
    let search = &config.search;
    run_to_fixed_point("gated-exchange", search, || {
        let n = tour.len();
        let edges = search.edge_count(n);
        let mut threshold = config.initial_threshold;
        let mut moves = 0;

        for i in 0..edges {
            loop {
                let mut accepted = false;
                for j in (i + 2)..edges {
                    if is_closing_neighbor(n, i, j) {
                        continue;
                    }
                    if exchange_gain(tour, distances, i, j) <= search.min_gain {
                        continue;
                    }
                    let affinity = table.between(tour.get(i), tour.get(j))
                        + table.between(tour.get(i + 1), tour.get(j + 1));
                    if affinity > threshold {
                        tour.reverse(i + 1, j);
                        accepted = true;
                        moves += 1;
                    }
                }
                if accepted || threshold <= 0.0 {
                    break;
                }
                threshold = 0.0;
            }
        }
        moves
    })
}
