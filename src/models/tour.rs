//! Tour representation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceTable;
use crate::error::TspError;

/// Identifier of a node in a problem instance (0-based, dense).
pub type NodeId = usize;

/// A Hamiltonian cycle over a fixed set of nodes.
///
/// Every node appears exactly once. Positions are interpreted cyclically:
/// [`get`](Tour::get) and [`reverse`](Tour::reverse) wrap modulo the tour
/// size, and [`distance`](Tour::distance) includes the edge closing the
/// cycle. Segment reversal is the only structural mutation, so the
/// permutation property holds for the lifetime of the tour.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Tour;
///
/// let mut tour = Tour::new(vec![0, 1, 2, 3, 4]).unwrap();
/// tour.reverse(1, 3);
/// assert_eq!(tour.nodes(), &[0, 3, 2, 1, 4]);
/// assert_eq!(tour.get(6), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<NodeId>", into = "Vec<NodeId>")]
pub struct Tour {
    nodes: Vec<NodeId>,
}

impl Tour {
    /// Creates a tour visiting `nodes` in the given order.
    ///
    /// Returns [`TspError::DuplicateNode`] if any node repeats.
    pub fn new(nodes: Vec<NodeId>) -> Result<Self, TspError> {
        let mut seen = HashSet::with_capacity(nodes.len());
        for &node in &nodes {
            if !seen.insert(node) {
                return Err(TspError::DuplicateNode { node });
            }
        }
        Ok(Self { nodes })
    }

    /// Creates the identity tour `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            nodes: (0..n).collect(),
        }
    }

    /// Creates a tour from 1-based node ids (TSPLIB numbering).
    pub fn from_one_based(ids: &[usize]) -> Result<Self, TspError> {
        let nodes = ids
            .iter()
            .map(|&id| id.checked_sub(1).ok_or(TspError::ZeroOneBasedNode))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(nodes)
    }

    /// Returns the visiting order as 1-based node ids.
    pub fn to_one_based(&self) -> Vec<usize> {
        self.nodes.iter().map(|&n| n + 1).collect()
    }

    /// Number of nodes in the tour.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tour has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The visiting order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Consumes the tour and returns the visiting order.
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Returns the node at `index`, wrapping past the end.
    ///
    /// # Panics
    ///
    /// Panics if the tour is empty.
    pub fn get(&self, index: usize) -> NodeId {
        self.nodes[index % self.nodes.len()]
    }

    /// Reverses the closed position range `[a, b]` in place.
    ///
    /// Positions wrap modulo the tour size. When `a` lands after `b` the
    /// range runs past the last position and continues from position 0.
    /// Reversal is self-inverse: applying it twice restores the tour.
    pub fn reverse(&mut self, a: usize, b: usize) {
        let n = self.nodes.len();
        if n < 2 {
            return;
        }
        let (a, b) = (a % n, b % n);
        if a <= b {
            self.nodes[a..=b].reverse();
            return;
        }
        let span = n - a + b + 1;
        for k in 0..span / 2 {
            self.nodes.swap((a + k) % n, (b + n - k) % n);
        }
    }

    /// Total length of the cycle, including the closing edge.
    ///
    /// Tours with fewer than two nodes have length zero.
    pub fn distance<D: DistanceTable + ?Sized>(&self, distances: &D) -> f64 {
        let n = self.nodes.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| distances.distance(self.nodes[i], self.nodes[(i + 1) % n]))
            .sum()
    }

    /// Checks that the tour visits exactly the nodes of the distance table.
    ///
    /// Nodes are distinct by construction, so in-range ids plus matching
    /// length make the tour a permutation of `0..num_nodes()`.
    pub fn validate_against<D: DistanceTable + ?Sized>(&self, distances: &D) -> Result<(), TspError> {
        let size = distances.num_nodes();
        if let Some(&node) = self.nodes.iter().find(|&&node| node >= size) {
            return Err(TspError::UnknownNode { node, size });
        }
        if self.nodes.len() != size {
            return Err(TspError::SizeMismatch {
                tour: self.nodes.len(),
                table: size,
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<NodeId>> for Tour {
    type Error = TspError;

    fn try_from(nodes: Vec<NodeId>) -> Result<Self, Self::Error> {
        Self::new(nodes)
    }
}

impl From<Tour> for Vec<NodeId> {
    fn from(tour: Tour) -> Self {
        tour.nodes
    }
}
