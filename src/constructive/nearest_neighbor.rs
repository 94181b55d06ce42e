//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily in one forward sweep: with the leading nodes
//! fixed, each position `i >= 2` receives the unplaced node nearest to the
//! node at `i - 1`. The chosen node is moved into place by reversing the
//! range between its current position and `i`.
//!
//! # Complexity
//!
//! O(n²) where n = number of nodes.
//!
//! # Reference
//!
//! This is the simplest constructive heuristic for the TSP. While solution
//! quality is typically 15-25% above optimal, it provides a fast baseline.

use crate::distance::DistanceTable;
use crate::error::TspError;
use crate::local_search::{log_outcome, SearchStats, TourImprover};
use crate::models::Tour;

/// Greedy nearest-extension over an existing tour.
///
/// Positions 0 and 1 anchor the tour; every later position is filled with
/// the nearest remaining node to its predecessor. Ties keep the candidate
/// found first in position order.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::NearestNeighbor;
/// use u_tsp::local_search::TourImprover;
///
/// let points: Vec<Point> = (0..5).map(|x| Point::new(x as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_points(&points);
///
/// let mut tour = Tour::new(vec![0, 1, 4, 2, 3]).unwrap();
/// NearestNeighbor::new(&dm).apply(&mut tour).unwrap();
/// assert_eq!(tour.nodes(), &[0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct NearestNeighbor<'a, D: ?Sized> {
    distances: &'a D,
}

impl<'a, D: DistanceTable + ?Sized> NearestNeighbor<'a, D> {
    pub fn new(distances: &'a D) -> Self {
        Self { distances }
    }
}

impl<D: DistanceTable + ?Sized> TourImprover for NearestNeighbor<'_, D> {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn apply(&mut self, tour: &mut Tour) -> Result<SearchStats, TspError> {
        tour.validate_against(self.distances)?;

        // tours with 2 or fewer nodes are already optimal
        let n = tour.len();
        if n < 3 {
            return Ok(SearchStats::too_small());
        }

        let mut moves = 0;
        for i in 2..n {
            let prev = tour.get(i - 1);
            let mut nearest = i;
            let mut nearest_distance = self.distances.distance(prev, tour.get(i));
            for j in (i + 1)..n {
                let d = self.distances.distance(prev, tour.get(j));
                if d < nearest_distance {
                    nearest = j;
                    nearest_distance = d;
                }
            }
            if nearest != i {
                tour.reverse(i, nearest);
                moves += 1;
            }
        }

        let stats = SearchStats::single_pass(moves);
        log_outcome(self.name(), tour, &stats);
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::local_search::Termination;
    use crate::models::Point;

    fn line(n: usize) -> DistanceMatrix {
        let points: Vec<Point> = (0..n).map(|x| Point::new(x as f64, 0.0)).collect();
        DistanceMatrix::from_points(&points)
    }

    #[test]
    fn test_nn_orders_line() {
        let dm = line(6);
        let mut tour = Tour::new(vec![0, 1, 5, 3, 2, 4]).expect("valid");
        let stats = NearestNeighbor::new(&dm).apply(&mut tour).expect("valid");
        assert_eq!(tour.nodes(), &[0, 1, 2, 3, 4, 5]);
        assert!(stats.modified());
        assert_eq!(stats.passes, 1);
    }

    #[test]
    fn test_nn_keeps_leading_nodes() {
        let dm = line(5);
        let mut tour = Tour::new(vec![3, 0, 4, 1, 2]).expect("valid");
        NearestNeighbor::new(&dm).apply(&mut tour).expect("valid");
        assert_eq!(&tour.nodes()[..2], &[3, 0]);
        assert_eq!(tour.nodes(), &[3, 0, 1, 2, 4]);
    }

    #[test]
    fn test_nn_tie_keeps_first_found() {
        // node 1 at x=0 has neighbors 2 (x=-1) and 3 (x=1) at equal distance
        let dm = DistanceMatrix::from_points(&[
            Point::new(5.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(-1.0, 0.0),
            Point::new(1.0, 0.0),
        ]);
        let mut tour = Tour::new(vec![0, 1, 3, 2]).expect("valid");
        NearestNeighbor::new(&dm).apply(&mut tour).expect("valid");
        assert_eq!(tour.nodes(), &[0, 1, 3, 2]);
    }

    #[test]
    fn test_nn_already_greedy_is_unchanged() {
        let dm = line(5);
        let mut tour = Tour::identity(5);
        let stats = NearestNeighbor::new(&dm).apply(&mut tour).expect("valid");
        assert_eq!(stats.moves, 0);
        assert_eq!(tour, Tour::identity(5));
    }

    #[test]
    fn test_nn_small_tours_passthrough() {
        for n in 0..3 {
            let dm = line(n);
            let mut tour = Tour::identity(n);
            let stats = NearestNeighbor::new(&dm).apply(&mut tour).expect("valid");
            assert_eq!(stats.termination, Termination::TooSmall);
            assert_eq!(tour, Tour::identity(n));
        }
    }

    #[test]
    fn test_nn_rejects_unknown_node() {
        let dm = line(3);
        let mut tour = Tour::new(vec![0, 1, 3]).expect("valid");
        assert!(NearestNeighbor::new(&dm).apply(&mut tour).is_err());
    }
}
