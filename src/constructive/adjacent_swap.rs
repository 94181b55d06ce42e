//! Adjacent-swap greedy sweep.
//!
//! A single forward pass: at each position `i`, if the node two steps
//! ahead is closer to `t[i]` than the next node, the two are exchanged.
//! Cheaper than [`NearestNeighbor`](super::NearestNeighbor) (O(n)), but
//! only repairs local zig-zags.

use crate::distance::DistanceTable;
use crate::error::TspError;
use crate::local_search::{log_outcome, SearchStats, TourImprover};
use crate::models::Tour;

/// One greedy sweep exchanging neighboring nodes.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::AdjacentSwap;
/// use u_tsp::local_search::TourImprover;
///
/// let points: Vec<Point> = (0..4).map(|x| Point::new(x as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_points(&points);
///
/// let mut tour = Tour::new(vec![0, 2, 1, 3]).unwrap();
/// AdjacentSwap::new(&dm).apply(&mut tour).unwrap();
/// assert_eq!(tour.nodes(), &[0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct AdjacentSwap<'a, D: ?Sized> {
    distances: &'a D,
}

impl<'a, D: DistanceTable + ?Sized> AdjacentSwap<'a, D> {
    pub fn new(distances: &'a D) -> Self {
        Self { distances }
    }
}

impl<D: DistanceTable + ?Sized> TourImprover for AdjacentSwap<'_, D> {
    fn name(&self) -> &'static str {
        "adjacent-swap"
    }

    fn apply(&mut self, tour: &mut Tour) -> Result<SearchStats, TspError> {
        tour.validate_against(self.distances)?;

        let n = tour.len();
        if n < 3 {
            return Ok(SearchStats::too_small());
        }

        let mut moves = 0;
        for i in 0..n - 2 {
            let here = tour.get(i);
            let next = self.distances.distance(here, tour.get(i + 1));
            let skip = self.distances.distance(here, tour.get(i + 2));
            if skip < next {
                tour.reverse(i + 1, i + 2);
                moves += 1;
            }
        }

        let stats = SearchStats::single_pass(moves);
        log_outcome(self.name(), tour, &stats);
        Ok(stats)
    }
}
