//! Bounded-hop graph traversal.
//!
//! Traversal walks the adjacency matrix of one relation type. Each hop is a
//! scan of one compressed column: the neighbours of vertex `v` are the
//! non-zero rows of column `v` in the forward matrix (outgoing) or in its
//! transpose (incoming).
//!
//! # Overview
//!
//! - [`AllPaths`] - Enumerates every path from a source within a [`HopRange`]
//! - [`Direction`] - Which adjacency matrix to walk
//! - [`PathMode`] - Whether a path may revisit edges or vertices
//!
//! # Example
//!
//! ```
//! use matrixdb_core::{NodeId, RelationId};
//! use matrixdb_graph::matrix::SparseMatrix;
//! use matrixdb_graph::traversal::{AllPaths, Direction, HopRange};
//!
//! // 0 -> 1 -> 2, stored as (dest, src) coordinates.
//! let adjacency = SparseMatrix::from_tuples(3, 3, [(1, 0), (2, 1)])?;
//!
//! let search = AllPaths::new(RelationId::new(0), Direction::Outgoing, HopRange::new(1, 2)?);
//! let mut paths = Vec::new();
//! let found = search.search(&adjacency, NodeId::new(0), &mut paths)?;
//! assert_eq!(found, 2);
//! # Ok::<(), matrixdb_graph::store::GraphError>(())
//! ```

mod all_paths;

pub use all_paths::AllPaths;

use serde::{Deserialize, Serialize};

use crate::store::{GraphError, GraphResult};

/// Direction for graph traversal.
///
/// Specifies which edges to follow when traversing from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Follow outgoing edges (source -> target).
    ///
    /// When traversing from node A, find nodes B where an edge A -> B exists.
    #[default]
    Outgoing,

    /// Follow incoming edges (target <- source).
    ///
    /// When traversing from node A, find nodes B where an edge B -> A exists.
    Incoming,
}

impl Direction {
    /// The direction implied by an operand's transpose flag.
    #[inline]
    #[must_use]
    pub const fn from_transpose(transpose: bool) -> Self {
        if transpose {
            Self::Incoming
        } else {
            Self::Outgoing
        }
    }
}

/// Revisit policy for path enumeration.
///
/// Every mode terminates: the hop bound caps path length regardless of
/// cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// Vertices and edges may repeat.
    Walk,
    /// Edges may not repeat within one path; vertices may.
    #[default]
    Trail,
    /// Vertices may not repeat within one path, including the source.
    Simple,
}

/// An inclusive `[min, max]` bound on path length in hops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HopRange {
    min: usize,
    max: usize,
}

impl HopRange {
    /// Creates a hop range, rejecting `min > max`.
    pub fn new(min: usize, max: usize) -> GraphResult<Self> {
        if min > max {
            return Err(GraphError::InvalidHopRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// A range matching exactly `hops` hops.
    #[must_use]
    pub const fn exactly(hops: usize) -> Self {
        Self { min: hops, max: hops }
    }

    /// Minimum hop count.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Maximum hop count.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Returns true if a path of `hops` edges falls inside the range.
    #[inline]
    #[must_use]
    pub const fn contains(&self, hops: usize) -> bool {
        hops >= self.min && hops <= self.max
    }
}

impl Default for HopRange {
    fn default() -> Self {
        Self::exactly(1)
    }
}
