//! Relation-typed edges between nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NodeId, RelationId};

/// A relation-typed arc between two nodes.
///
/// Edges are plain values: they identify an entry of a relation's adjacency
/// matrix and carry no properties of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The node the edge leaves.
    pub src: NodeId,
    /// The node the edge arrives at.
    pub dest: NodeId,
    /// The relation type this edge belongs to.
    pub relation: RelationId,
}

impl Edge {
    /// Create a new edge.
    #[inline]
    #[must_use]
    pub const fn new(src: NodeId, dest: NodeId, relation: RelationId) -> Self {
        Self { src, dest, relation }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-[{}]->({})", self.src, self.relation, self.dest)
    }
}
