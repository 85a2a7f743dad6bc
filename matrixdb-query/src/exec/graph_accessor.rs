//! Graph storage accessor trait for query execution.
//!
//! This module provides the [`GraphAccessor`] trait that abstracts the
//! graph lookups operators need. The trait is object-safe, so a single
//! graph can be shared by many operator trees as `Arc<dyn GraphAccessor>`.

use matrixdb_core::{Node, NodeId, RelationId};
use matrixdb_graph::traversal::{AllPaths, Direction};
use matrixdb_graph::{Graph, GraphError, Path, SparseMatrix};

/// Graph accessor error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphAccessError {
    /// No graph storage is available.
    #[error("no graph storage available")]
    NoStorage,
    /// The underlying graph reported an error.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for graph accessor operations.
pub type GraphAccessResult<T> = Result<T, GraphAccessError>;

/// A trait for accessing graph storage during query execution.
///
/// Implementations are read-only from the executor's point of view and may
/// be shared across concurrent, independent queries.
pub trait GraphAccessor: Send + Sync {
    /// Number of nodes; valid ids are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Overwrites `target` with node `id`, reusing `target`'s allocations.
    fn load_node(&self, id: NodeId, target: &mut Node) -> GraphAccessResult<()>;

    /// The adjacency matrix of `relation` for traversal in `direction`.
    fn adjacency(&self, relation: RelationId, direction: Direction)
        -> GraphAccessResult<&SparseMatrix>;

    /// Runs `search` from `source`, appending the paths found to `paths`.
    fn all_paths(
        &self,
        search: &AllPaths,
        source: NodeId,
        paths: &mut Vec<Path>,
    ) -> GraphAccessResult<usize> {
        let matrix = self.adjacency(search.relation(), search.direction())?;
        Ok(search.search(matrix, source, paths)?)
    }
}

impl GraphAccessor for Graph {
    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }

    fn load_node(&self, id: NodeId, target: &mut Node) -> GraphAccessResult<()> {
        Ok(self.load_node_into(id, target)?)
    }

    fn adjacency(
        &self,
        relation: RelationId,
        direction: Direction,
    ) -> GraphAccessResult<&SparseMatrix> {
        Ok(Graph::adjacency(self, relation, direction)?)
    }
}

/// A null implementation of `GraphAccessor` that holds no graph.
///
/// Used when no graph storage is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGraphAccessor;

impl GraphAccessor for NullGraphAccessor {
    fn node_count(&self) -> usize {
        0
    }

    fn load_node(&self, _id: NodeId, _target: &mut Node) -> GraphAccessResult<()> {
        Err(GraphAccessError::NoStorage)
    }

    fn adjacency(
        &self,
        _relation: RelationId,
        _direction: Direction,
    ) -> GraphAccessResult<&SparseMatrix> {
        Err(GraphAccessError::NoStorage)
    }
}
