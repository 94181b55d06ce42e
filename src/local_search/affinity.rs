//! Belonging-degree (affinity) table.
//!
//! For a base node `i` with farthest tour node at distance `max_i`, the
//! affinity of another node `j` is
//!
//! ```text
//! M[i][j] = 1 - d(i, j) / max_i
//! ```
//!
//! so the nearest nodes score close to 1 and the farthest node scores 0.
//! Each row also records its peak (the affinity of the base node's nearest
//! neighbor), and the table records the smallest peak over all rows, which
//! serves as the common lower bound for affinity thresholds.

use crate::distance::DistanceTable;
use crate::error::TspError;
use crate::models::{NodeId, Tour};

/// Affinities between every ordered pair of nodes of one tour.
///
/// Rows and columns follow the tour order at construction time; use
/// [`between`](Self::between) to look up by node id after the tour moves.
#[derive(Debug, Clone)]
pub struct AffinityTable {
    nodes: Vec<NodeId>,
    row_of: Vec<usize>,
    values: Vec<f64>,
    max_distance: Vec<f64>,
    peak: Vec<f64>,
    floor: f64,
}

impl AffinityTable {
    /// Computes the table for the nodes of `tour`.
    ///
    /// Fails unless `tour` visits exactly the nodes of `distances`.
    pub fn build<D: DistanceTable + ?Sized>(
        tour: &Tour,
        distances: &D,
    ) -> Result<Self, TspError> {
        tour.validate_against(distances)?;
        let nodes = tour.nodes().to_vec();
        let n = nodes.len();

        // a validated tour is a permutation of 0..n
        let mut row_of = vec![0; n];
        for (row, &node) in nodes.iter().enumerate() {
            row_of[node] = row;
        }

        let mut values = vec![0.0; n * n];
        let mut max_distance = vec![0.0; n];
        let mut peak = vec![1.0; n];

        for i in 0..n {
            let row: Vec<f64> = nodes
                .iter()
                .map(|&other| distances.distance(nodes[i], other))
                .collect();
            let max = row.iter().copied().fold(0.0, f64::max);
            max_distance[i] = max;

            let mut best = None::<f64>;
            for (j, &d) in row.iter().enumerate() {
                let m = belonging(d, max);
                values[i * n + j] = m;
                if j != i {
                    best = Some(best.map_or(m, |b| b.max(m)));
                }
            }
            if let Some(b) = best {
                peak[i] = b;
            }
        }

        let floor = peak.iter().copied().fold(1.0, f64::min);

        Ok(Self {
            nodes,
            row_of,
            values,
            max_distance,
            peak,
            floor,
        })
    }

    /// Number of rows (nodes) in the table.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node id of row `row`.
    pub fn node(&self, row: usize) -> NodeId {
        self.nodes[row]
    }

    /// Affinity of row `j` relative to base row `i`.
    pub fn affinity(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.nodes.len() + j]
    }

    /// Affinity of node `other` relative to base node `base`.
    ///
    /// Nodes outside the table have affinity 0.
    pub fn between(&self, base: NodeId, other: NodeId) -> f64 {
        match (self.row(base), self.row(other)) {
            (Some(i), Some(j)) => self.affinity(i, j),
            _ => 0.0,
        }
    }

    /// Distance from row `i` to its farthest tour node.
    pub fn max_distance(&self, i: usize) -> f64 {
        self.max_distance[i]
    }

    /// Highest affinity row `i` has towards any other node.
    pub fn peak(&self, i: usize) -> f64 {
        self.peak[i]
    }

    /// Smallest [`peak`](Self::peak) over all rows.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    fn row(&self, node: NodeId) -> Option<usize> {
        self.row_of.get(node).copied()
    }
}

/// `1 - d / max`, clamped into `[0, 1]`; 1 when `max` is zero or not finite.
fn belonging(d: f64, max: f64) -> f64 {
    if !(max > 0.0 && max.is_finite()) {
        return 1.0;
    }
    let m = 1.0 - d / max;
    if m.is_nan() {
        0.0
    } else {
        m.clamp(0.0, 1.0)
    }
}
