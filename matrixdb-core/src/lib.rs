//! `MatrixDB` Core
//!
//! This crate provides the value types shared by the graph storage and
//! query execution crates of `MatrixDB`.
//!
//! # Modules
//!
//! - [`types`] - Core data types (Node, Edge, Value, IDs)
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```
//! use matrixdb_core::{Edge, Node, NodeId, RelationId, Value};
//!
//! let alice = Node::new(NodeId::new(0))
//!     .with_label("Person")
//!     .with_property("name", "Alice");
//! let bob = Node::new(NodeId::new(1)).with_label("Person");
//!
//! let knows = Edge::new(alice.id, bob.id, RelationId::new(0));
//! assert_eq!(knows.dest, bob.id);
//! assert_eq!(alice.get_property("name"), Some(&Value::from("Alice")));
//! ```

#![deny(clippy::unwrap_used)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::{Edge, Label, Node, NodeId, RelationId, Value};
