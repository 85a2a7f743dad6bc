//! Paths produced by the bounded-hop search.
//!
//! A [`Path`] is an owned sequence of [`Edge`]s. Edges are stored in walk
//! orientation: each edge's `src` is the vertex closer to the search source
//! and its `dest` the vertex one hop further, whatever direction the search
//! followed. The last edge (the tail) therefore always ends at the path's
//! destination.

use std::fmt;

use matrixdb_core::{Edge, NodeId};

/// An ordered walk of edges from a source vertex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    edges: Vec<Edge>,
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self { edges: Vec::new() }
    }

    /// Creates an empty path with room for `hops` edges.
    #[must_use]
    pub fn with_capacity(hops: usize) -> Self {
        Self { edges: Vec::with_capacity(hops) }
    }

    /// Appends an edge. Only the path search builds paths.
    pub(crate) fn push(&mut self, edge: Edge) {
        debug_assert!(
            self.edges.last().map_or(true, |tail| tail.dest == edge.src),
            "edge {edge} does not continue path {self}"
        );
        self.edges.push(edge);
    }

    /// Removes and returns the tail edge.
    ///
    /// # Panics
    ///
    /// Panics if the path is empty.
    pub fn pop_tail(&mut self) -> Edge {
        match self.edges.pop() {
            Some(edge) => edge,
            None => panic!("pop_tail called on an empty path"),
        }
    }

    /// Removes and returns the tail edge, or `None` if the path is empty.
    pub fn try_pop_tail(&mut self) -> Option<Edge> {
        self.edges.pop()
    }

    /// The most recently appended edge.
    #[must_use]
    pub fn tail(&self) -> Option<&Edge> {
        self.edges.last()
    }

    /// Number of hops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the path has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The edges in walk order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The vertex the walk started from.
    #[must_use]
    pub fn source(&self) -> Option<NodeId> {
        self.edges.first().map(|e| e.src)
    }

    /// The vertex reached by the last hop.
    #[must_use]
    pub fn destination(&self) -> Option<NodeId> {
        self.edges.last().map(|e| e.dest)
    }

    /// The vertex sequence visited by the walk, source first.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            nodes.push(first.src);
        }
        nodes.extend(self.edges.iter().map(|e| e.dest));
        nodes
    }

    /// Returns true if the walk already traversed `edge`.
    #[must_use]
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.edges.first() else {
            return f.write_str("()");
        };
        write!(f, "({})", first.src)?;
        for edge in &self.edges {
            write!(f, "-[{}]->({})", edge.relation, edge.dest)?;
        }
        Ok(())
    }
}
