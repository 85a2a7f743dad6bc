//! In-memory graph storage.
//!
//! A [`Graph`] holds its nodes in a dense vector indexed by [`NodeId`] and
//! one pair of adjacency matrices per relation type: the forward matrix for
//! outgoing traversal and its transpose for incoming traversal. Graphs are
//! immutable once built and can be shared across independent query
//! executions behind an `Arc`.
//!
//! # Overview
//!
//! - [`GraphBuilder`] - Collects nodes, relation types and edges
//! - [`Graph`] - Read-only node lookups and per-relation adjacency
//! - [`GraphError`] - Errors raised by storage and traversal
//!
//! # Example
//!
//! ```
//! use matrixdb_core::Node;
//! use matrixdb_graph::store::GraphBuilder;
//! use matrixdb_graph::traversal::{Direction, HopRange};
//!
//! let mut builder = GraphBuilder::new();
//! let alice = builder.add_node(|id| Node::new(id).with_property("name", "Alice"));
//! let bob = builder.add_node(|id| Node::new(id).with_property("name", "Bob"));
//! let knows = builder.add_relation("KNOWS")?;
//! builder.add_edge(alice, bob, knows)?;
//! let graph = builder.build()?;
//!
//! let paths = graph.all_paths(alice, knows, Direction::Outgoing, HopRange::new(1, 2)?)?;
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].destination(), Some(bob));
//! # Ok::<(), matrixdb_graph::store::GraphError>(())
//! ```
//!
//! [`NodeId`]: matrixdb_core::NodeId

mod error;
mod graph;

pub use error::{GraphError, GraphResult};
pub use graph::{Graph, GraphBuilder};
