//! On-demand Euclidean distances.

use super::DistanceTable;
use crate::models::{NodeId, Point};

/// Computes Euclidean distances from coordinates at query time.
///
/// Uses O(n) memory instead of the O(n²) of a
/// [`DistanceMatrix`](super::DistanceMatrix). With [`rounded`](Self::rounded)
/// distances are rounded to the nearest integer as TSPLIB `EUC_2D`
/// instances require.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::{DistanceTable, EuclideanTable};
///
/// let table = EuclideanTable::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
/// assert!((table.distance(0, 1) - 2f64.sqrt()).abs() < 1e-10);
///
/// let rounded = table.rounded();
/// assert_eq!(rounded.distance(0, 1), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct EuclideanTable {
    points: Vec<Point>,
    round: bool,
}

impl EuclideanTable {
    /// Creates a table over the given points; node `i` is `points[i]`.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            round: false,
        }
    }

    /// Rounds every distance to the nearest integer (TSPLIB `nint`).
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    /// The node coordinates.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl DistanceTable for EuclideanTable {
    fn num_nodes(&self) -> usize {
        self.points.len()
    }

    fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        let d = self.points[from].distance_to(&self.points[to]);
        if self.round {
            (d + 0.5).floor()
        } else {
            d
        }
    }
}
