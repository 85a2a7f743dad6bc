//! Error types for graph storage and traversal.

use matrixdb_core::{CoreError, NodeId, RelationId};
use thiserror::Error;

/// Errors that can occur while building or traversing a graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node was not found.
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    /// A relation type was not found.
    #[error("relation not found: {0}")]
    RelationNotFound(RelationId),

    /// The relation id space is exhausted.
    #[error("too many relation types: {0}")]
    TooManyRelations(usize),

    /// A hop range whose lower bound exceeds its upper bound.
    #[error("invalid hop range: min {min} exceeds max {max}")]
    InvalidHopRange {
        /// Requested minimum hop count.
        min: usize,
        /// Requested maximum hop count.
        max: usize,
    },

    /// Compressed-column arrays violate the storage layout.
    #[error("malformed matrix: {0}")]
    MalformedMatrix(String),

    /// A coordinate outside the matrix dimensions.
    #[error("index ({row}, {col}) out of bounds for {nrows}x{ncols} matrix")]
    IndexOutOfBounds {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// Matrix rows.
        nrows: usize,
        /// Matrix columns.
        ncols: usize,
    },

    /// An adjacency matrix that does not cover the vertex set being walked.
    #[error("dimension mismatch: expected {expected} vertices, matrix is {nrows}x{ncols}")]
    DimensionMismatch {
        /// Vertex count required by the operation.
        expected: usize,
        /// Matrix rows.
        nrows: usize,
        /// Matrix columns.
        ncols: usize,
    },

    /// A core value error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::NodeNotFound(NodeId::new(42));
        assert!(err.to_string().contains("42"));

        let err = GraphError::InvalidHopRange { min: 3, max: 1 };
        assert_eq!(err.to_string(), "invalid hop range: min 3 exceeds max 1");
    }

    #[test]
    fn from_core_error() {
        let core_err = CoreError::Validation("negative id".to_owned());
        let graph_err: GraphError = core_err.into();
        assert!(matches!(graph_err, GraphError::Core(CoreError::Validation(_))));
    }
}
