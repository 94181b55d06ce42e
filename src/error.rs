//! Error type shared by tours, distance tables, and improvers.

use thiserror::Error;

use crate::models::NodeId;

/// Errors raised when a caller violates a precondition.
///
/// Degenerate tour sizes are not errors: improvers treat them as already
/// optimal and return [`Termination::TooSmall`](crate::local_search::Termination::TooSmall).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TspError {
    /// A node identifier occurs more than once in a tour.
    #[error("node {node} appears more than once in the tour")]
    DuplicateNode {
        /// The repeated node.
        node: NodeId,
    },

    /// A tour references a node the distance table does not know.
    #[error("node {node} is outside the distance table (size {size})")]
    UnknownNode {
        /// The offending node.
        node: NodeId,
        /// Number of nodes in the distance table.
        size: usize,
    },

    /// A tour does not visit every node of the distance table.
    #[error("tour visits {tour} nodes but the distance table has {table}")]
    SizeMismatch {
        /// Number of nodes in the tour.
        tour: usize,
        /// Number of nodes in the distance table.
        table: usize,
    },

    /// A one-based node identifier was zero.
    #[error("one-based node ids start at 1, got 0")]
    ZeroOneBasedNode,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
