//! Graph construction and lookup.

use std::collections::HashMap;

use matrixdb_core::{Node, NodeId, RelationId};

use super::error::{GraphError, GraphResult};
use crate::matrix::SparseMatrix;
use crate::path::Path;
use crate::traversal::{AllPaths, Direction, HopRange, PathMode};

/// Adjacency for one relation type.
#[derive(Debug, Clone)]
struct Relation {
    name: String,
    /// Column `v` holds the targets of `v`'s outgoing edges.
    outgoing: SparseMatrix,
    /// Column `v` holds the sources of `v`'s incoming edges.
    incoming: SparseMatrix,
}

/// An immutable property graph with matrix adjacency.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    relations: Vec<Relation>,
    relation_index: HashMap<String, RelationId>,
}

impl Graph {
    /// Number of nodes. Node ids are `0..node_count()`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of relation types.
    #[must_use]
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes.get(id.index()).ok_or(GraphError::NodeNotFound(id))
    }

    /// Iterates all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Overwrites `target` with the node stored under `id`, reusing the
    /// allocations `target` already owns.
    pub fn load_node_into(&self, id: NodeId, target: &mut Node) -> GraphResult<()> {
        let node = self.node(id)?;
        target.refresh_from(node);
        Ok(())
    }

    /// Resolves a relation type by name.
    #[must_use]
    pub fn relation_id(&self, name: &str) -> Option<RelationId> {
        self.relation_index.get(name).copied()
    }

    /// The name of a relation type.
    #[must_use]
    pub fn relation_name(&self, id: RelationId) -> Option<&str> {
        self.relations.get(id.index()).map(|r| r.name.as_str())
    }

    /// Number of edges of a relation type.
    pub fn edge_count(&self, relation: RelationId) -> GraphResult<usize> {
        Ok(self.relation(relation)?.outgoing.nvals())
    }

    /// The adjacency matrix to walk for `relation` in `direction`.
    ///
    /// Both matrices are `node_count x node_count`; column `v` lists the
    /// neighbours reached from `v`.
    pub fn adjacency(&self, relation: RelationId, direction: Direction) -> GraphResult<&SparseMatrix> {
        let relation = self.relation(relation)?;
        Ok(match direction {
            Direction::Outgoing => &relation.outgoing,
            Direction::Incoming => &relation.incoming,
        })
    }

    /// Enumerates every trail from `source` whose hop count lies in `hops`.
    pub fn all_paths(
        &self,
        source: NodeId,
        relation: RelationId,
        direction: Direction,
        hops: HopRange,
    ) -> GraphResult<Vec<Path>> {
        self.all_paths_with_mode(source, relation, direction, hops, PathMode::default())
    }

    /// Like [`all_paths`](Self::all_paths) with an explicit revisit policy.
    pub fn all_paths_with_mode(
        &self,
        source: NodeId,
        relation: RelationId,
        direction: Direction,
        hops: HopRange,
        mode: PathMode,
    ) -> GraphResult<Vec<Path>> {
        let matrix = self.adjacency(relation, direction)?;
        let mut paths = Vec::new();
        AllPaths::new(relation, direction, hops).with_mode(mode).search(matrix, source, &mut paths)?;
        Ok(paths)
    }

    fn relation(&self, id: RelationId) -> GraphResult<&Relation> {
        self.relations.get(id.index()).ok_or(GraphError::RelationNotFound(id))
    }
}

/// Incrementally assembles a [`Graph`].
///
/// Node ids are assigned densely in insertion order, so a node's id is also
/// its row and column in every adjacency matrix.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    relations: Vec<String>,
    relation_index: HashMap<String, RelationId>,
    /// `(dest, src)` coordinates per relation.
    edges: Vec<Vec<(usize, usize)>>,
}

impl GraphBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node built by `build` from its assigned id.
    ///
    /// The id the closure receives is authoritative; any other id set on the
    /// returned node is overwritten.
    pub fn add_node<F>(&mut self, build: F) -> NodeId
    where
        F: FnOnce(NodeId) -> Node,
    {
        let id = NodeId::from(self.nodes.len());
        let mut node = build(id);
        node.id = id;
        self.nodes.push(node);
        id
    }

    /// Registers a relation type, returning the existing id if the name is
    /// already known.
    ///
    /// Fails once every [`RelationId`] is taken.
    pub fn add_relation(&mut self, name: impl Into<String>) -> GraphResult<RelationId> {
        let name = name.into();
        if let Some(&id) = self.relation_index.get(&name) {
            return Ok(id);
        }
        let id = relation_id_at(self.relations.len())?;
        self.relation_index.insert(name.clone(), id);
        self.relations.push(name);
        self.edges.push(Vec::new());
        Ok(id)
    }

    /// Adds a directed edge `src -> dest` of type `relation`.
    pub fn add_edge(&mut self, src: NodeId, dest: NodeId, relation: RelationId) -> GraphResult<()> {
        for id in [src, dest] {
            if id.index() >= self.nodes.len() {
                return Err(GraphError::NodeNotFound(id));
            }
        }
        let edges =
            self.edges.get_mut(relation.index()).ok_or(GraphError::RelationNotFound(relation))?;
        edges.push((dest.index(), src.index()));
        Ok(())
    }

    /// Number of nodes added so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Builds the adjacency matrices and freezes the graph.
    pub fn build(self) -> GraphResult<Graph> {
        let n = self.nodes.len();
        let relations = self
            .relations
            .into_iter()
            .zip(self.edges)
            .map(|(name, edges)| {
                let outgoing = SparseMatrix::from_tuples(n, n, edges)?;
                let incoming = outgoing.transpose();
                Ok(Relation { name, outgoing, incoming })
            })
            .collect::<GraphResult<Vec<_>>>()?;

        tracing::debug!(nodes = n, relations = relations.len(), "built graph");

        Ok(Graph { nodes: self.nodes, relations, relation_index: self.relation_index })
    }
}

/// The id of the relation registered at position `index`.
fn relation_id_at(index: usize) -> GraphResult<RelationId> {
    u32::try_from(index).map(RelationId::new).map_err(|_| GraphError::TooManyRelations(index))
}
