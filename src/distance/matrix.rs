//! Precomputed distance matrix.

use super::{DistanceTable, EuclideanTable};
use crate::models::{NodeId, Point};

/// Row-major n×n table of precomputed distances.
///
/// Lookups are a single index computation, so this is the table to hand
/// to the O(n²)/O(n³) improvers once an instance is fixed.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::{DistanceMatrix, DistanceTable};
///
/// let dm = DistanceMatrix::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
///     Point::new(6.0, 8.0),
/// ]);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.num_nodes(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// All-zero matrix over `n` nodes.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Fills every cell from `f(from, to)`.
    pub fn from_fn<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(NodeId, NodeId) -> f64,
    {
        let mut values = Vec::with_capacity(n * n);
        for from in 0..n {
            for to in 0..n {
                values.push(if from == to { 0.0 } else { f(from, to) });
            }
        }
        Self { n, values }
    }

    /// Euclidean distances between `points`.
    pub fn from_points(points: &[Point]) -> Self {
        Self::from_table(&EuclideanTable::new(points.to_vec()))
    }

    /// Snapshot of any other table.
    pub fn from_table<D: DistanceTable + ?Sized>(table: &D) -> Self {
        Self::from_fn(table.num_nodes(), |from, to| table.distance(from, to))
    }

    /// Wraps explicit row-major `values`, e.g. a TSPLIB `FULL_MATRIX`.
    ///
    /// Returns `None` unless `values.len() == n * n`.
    pub fn from_data(n: usize, values: Vec<f64>) -> Option<Self> {
        (values.len() == n * n).then_some(Self { n, values })
    }

    /// Distance from `from` to `to`. Panics when either is `>= size()`.
    pub fn get(&self, from: NodeId, to: NodeId) -> f64 {
        self.values[from * self.n + to]
    }

    pub fn set(&mut self, from: NodeId, to: NodeId, distance: f64) {
        self.values[from * self.n + to] = distance;
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// `true` when `|d(i,j) - d(j,i)| <= tol` for every pair.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.n).all(|i| {
            ((i + 1)..self.n).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol)
        })
    }
}

impl DistanceTable for DistanceMatrix {
    fn num_nodes(&self) -> usize {
        self.n
    }

    fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        self.get(from, to)
    }
}
