//! Exhaustive 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of non-adjacent edges (i, i+1) and (j, j+1), compare the
//! length of the two edges with the length after reconnecting them as
//! (i, j) and (i+1, j+1):
//!
//! ```text
//! gain = d(t[i], t[i+1]) + d(t[j], t[j+1]) - d(t[i], t[j]) - d(t[i+1], t[j+1])
//! ```
//!
//! If the gain is positive, reverse the segment [i+1..=j] and keep scanning.
//! Full scans repeat until one produces no modification.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::improver::{log_outcome, run_to_fixed_point};
use super::{SearchConfig, SearchStats, TourImprover};
use crate::distance::DistanceTable;
use crate::error::TspError;
use crate::models::Tour;

/// 2-opt local search to a fixed point.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{TourImprover, TwoOpt};
///
/// let dm = DistanceMatrix::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ]);
///
/// // Crossed quadrilateral
/// let mut tour = Tour::identity(4);
/// let before = tour.distance(&dm);
/// TwoOpt::new(&dm).apply(&mut tour).unwrap();
/// assert!((tour.distance(&dm) - 4.0).abs() < 1e-10);
/// assert!(tour.distance(&dm) < before);
/// ```
#[derive(Debug, Clone)]
pub struct TwoOpt<'a, D: ?Sized> {
    distances: &'a D,
    config: SearchConfig,
}

impl<'a, D: DistanceTable + ?Sized> TwoOpt<'a, D> {
    /// Creates a 2-opt improver with the default configuration.
    pub fn new(distances: &'a D) -> Self {
        Self::with_config(distances, SearchConfig::default())
    }

    /// Creates a 2-opt improver with an explicit configuration.
    pub fn with_config(distances: &'a D, config: SearchConfig) -> Self {
        Self { distances, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl<D: DistanceTable + ?Sized> TourImprover for TwoOpt<'_, D> {
    fn name(&self) -> &'static str {
        "two-opt"
    }

    fn apply(&mut self, tour: &mut Tour) -> Result<SearchStats, TspError> {
        self.config.validate()?;
        tour.validate_against(self.distances)?;

        // tours with 3 or fewer nodes are already optimal
        if tour.len() < 4 {
            return Ok(SearchStats::too_small());
        }

        let stats = descend(tour, self.distances, &self.config);
        log_outcome(self.name(), tour, &stats);
        Ok(stats)
    }
}

/// Runs 2-opt passes on `tour` until a fixed point or the pass limit.
pub(crate) fn descend<D: DistanceTable + ?Sized>(
    tour: &mut Tour,
    distances: &D,
    config: &SearchConfig,
) -> SearchStats {
    run_to_fixed_point("two-opt", config, || two_opt_pass(tour, distances, config))
}

/// One full 2-opt scan. Returns the number of applied exchanges.
fn two_opt_pass<D: DistanceTable + ?Sized>(
    tour: &mut Tour,
    distances: &D,
    config: &SearchConfig,
) -> usize {
    let n = tour.len();
    let edges = config.edge_count(n);
    let mut moves = 0;

    for i in 0..edges {
        for j in (i + 2)..edges {
            if is_closing_neighbor(n, i, j) {
                continue;
            }
            if exchange_gain(tour, distances, i, j) > config.min_gain {
                tour.reverse(i + 1, j);
                moves += 1;
            }
        }
    }
    moves
}

/// Length saved by replacing edges (i, i+1), (j, j+1) with (i, j), (i+1, j+1).
pub(crate) fn exchange_gain<D: DistanceTable + ?Sized>(
    tour: &Tour,
    distances: &D,
    i: usize,
    j: usize,
) -> f64 {
    let (a, b) = (tour.get(i), tour.get(i + 1));
    let (c, d) = (tour.get(j), tour.get(j + 1));
    let removed = distances.distance(a, b) + distances.distance(c, d);
    let added = distances.distance(a, c) + distances.distance(b, d);
    removed - added
}

/// Edges 0 and n-1 share node t[0] on a closed tour.
pub(crate) fn is_closing_neighbor(n: usize, i: usize, j: usize) -> bool {
    i == 0 && j == n - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::local_search::Termination;
    use crate::models::Point;

    fn crossed_square() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ])
    }

    fn pentagon() -> DistanceMatrix {
        let points: Vec<Point> = (0..5)
            .map(|k| {
                let angle = 2.0 * std::f64::consts::PI * k as f64 / 5.0;
                Point::new(angle.cos(), angle.sin())
            })
            .collect();
        DistanceMatrix::from_points(&points)
    }

    #[test]
    fn test_2opt_uncrosses_quadrilateral() {
        let dm = crossed_square();
        let mut tour = Tour::identity(4);
        let before = tour.distance(&dm);

        let stats = TwoOpt::new(&dm).apply(&mut tour).expect("valid");

        assert_eq!(stats.moves, 1);
        assert_eq!(stats.termination, Termination::Converged);
        assert_eq!(tour.nodes(), &[0, 2, 1, 3]);
        assert!((tour.distance(&dm) - 4.0).abs() < 1e-10);
        assert!(tour.distance(&dm) < before);
    }

    #[test]
    fn test_2opt_open_neighborhood_also_uncrosses() {
        let dm = crossed_square();
        let mut tour = Tour::identity(4);
        let config = SearchConfig::default().with_closed(false);
        TwoOpt::with_config(&dm, config)
            .apply(&mut tour)
            .expect("valid");
        assert!((tour.distance(&dm) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_already_optimal() {
        let dm = pentagon();
        let mut tour = Tour::identity(5);
        let before = tour.distance(&dm);

        let stats = TwoOpt::new(&dm).apply(&mut tour).expect("valid");

        assert_eq!(stats.moves, 0);
        assert_eq!(stats.passes, 1);
        assert_eq!(tour, Tour::identity(5));
        assert!((tour.distance(&dm) - before).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_small_tours_passthrough() {
        for n in 0..4 {
            let dm = DistanceMatrix::new(n);
            let mut tour = Tour::identity(n);
            let stats = TwoOpt::new(&dm).apply(&mut tour).expect("valid");
            assert_eq!(stats.termination, Termination::TooSmall);
            assert_eq!(tour, Tour::identity(n));
        }
    }

    #[test]
    fn test_2opt_does_not_worsen_and_is_idempotent() {
        let dm = pentagon();
        let mut tour = Tour::new(vec![0, 2, 4, 1, 3]).expect("valid");
        let before = tour.distance(&dm);

        TwoOpt::new(&dm).apply(&mut tour).expect("valid");
        let after = tour.distance(&dm);
        assert!(after <= before + 1e-10);

        let snapshot = tour.clone();
        let again = TwoOpt::new(&dm).apply(&mut tour).expect("valid");
        assert_eq!(again.moves, 0);
        assert_eq!(tour, snapshot);
    }

    #[test]
    fn test_2opt_preserves_all_nodes() {
        let dm = pentagon();
        let mut tour = Tour::new(vec![3, 0, 4, 2, 1]).expect("valid");
        TwoOpt::new(&dm).apply(&mut tour).expect("valid");
        let mut sorted = tour.nodes().to_vec();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_2opt_pass_limit() {
        let dm = pentagon();
        let mut tour = Tour::new(vec![0, 2, 4, 1, 3]).expect("valid");
        let config = SearchConfig::default().with_max_passes(1);
        let stats = TwoOpt::with_config(&dm, config)
            .apply(&mut tour)
            .expect("valid");
        assert_eq!(stats.passes, 1);
        assert!(stats.moves > 0);
        assert_eq!(stats.termination, Termination::PassLimit);
    }

    #[test]
    fn test_2opt_rejects_unknown_node() {
        let dm = crossed_square();
        let mut tour = Tour::new(vec![0, 1, 2, 9]).expect("valid");
        let err = TwoOpt::new(&dm).apply(&mut tour).unwrap_err();
        assert_eq!(err, TspError::UnknownNode { node: 9, size: 4 });
        assert_eq!(tour.nodes(), &[0, 1, 2, 9]);
    }

    #[test]
    fn test_2opt_rejects_partial_tour() {
        let points: Vec<Point> = (0..10).map(|x| Point::new(x as f64, 0.0)).collect();
        let dm = DistanceMatrix::from_points(&points);
        let mut tour = Tour::new(vec![0, 5, 2, 9]).expect("valid");
        let err = TwoOpt::new(&dm).apply(&mut tour).unwrap_err();
        assert_eq!(err, TspError::SizeMismatch { tour: 4, table: 10 });
        assert_eq!(tour.nodes(), &[0, 5, 2, 9]);
    }

    #[test]
    fn test_2opt_rejects_invalid_config() {
        let dm = crossed_square();
        let mut tour = Tour::identity(4);
        let config = SearchConfig::default().with_min_gain(-1.0);
        assert!(TwoOpt::with_config(&dm, config).apply(&mut tour).is_err());
        assert_eq!(tour, Tour::identity(4));
    }

    #[test]
    fn test_exchange_gain() {
        let dm = crossed_square();
        let tour = Tour::identity(4);
        let expected = 2.0 * 2f64.sqrt() - 2.0;
        assert!((exchange_gain(&tour, &dm, 0, 2) - expected).abs() < 1e-10);
    }
}
