//! Distance table trait.

use crate::models::NodeId;

/// Read-only distance oracle between node identifiers.
///
/// Implementations must be pure: the same pair always yields the same
/// nonnegative distance, and `distance(u, u) == 0`. All heuristics in this
/// crate assume symmetry and never distinguish edge direction.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceTable;
///
/// struct Line(usize);
///
/// impl DistanceTable for Line {
///     fn num_nodes(&self) -> usize { self.0 }
///     fn distance(&self, from: usize, to: usize) -> f64 {
///         (from as f64 - to as f64).abs()
///     }
/// }
///
/// let line = Line(4);
/// assert_eq!(line.distance(3, 1), 2.0);
/// ```
pub trait DistanceTable: Send + Sync {
    /// Number of nodes the table knows. Valid ids are `0..num_nodes()`.
    fn num_nodes(&self) -> usize;

    /// Distance between `from` and `to`.
    fn distance(&self, from: NodeId, to: NodeId) -> f64;
}

impl<T: DistanceTable + ?Sized> DistanceTable for &T {
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    fn distance(&self, from: NodeId, to: NodeId) -> f64 {
        (**self).distance(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant;

    impl DistanceTable for Constant {
        fn num_nodes(&self) -> usize {
            3
        }
        fn distance(&self, from: NodeId, to: NodeId) -> f64 {
            if from == to {
                0.0
            } else {
                7.0
            }
        }
    }

    fn describe<D: DistanceTable>(table: D) -> (usize, f64, f64) {
        (table.num_nodes(), table.distance(0, 2), table.distance(1, 1))
    }

    #[test]
    fn test_reference_forwards() {
        let table = Constant;
        assert_eq!(describe(&table), (3, 7.0, 0.0));

        let boxed: Box<dyn DistanceTable> = Box::new(Constant);
        assert_eq!(describe(&*boxed), (3, 7.0, 0.0));
    }
}
