//! Core data types for `MatrixDB`.
//!
//! This module defines the fundamental types that represent nodes, edges,
//! and their properties.

mod edge;
mod entity;
mod id;
mod value;

pub use edge::Edge;
pub use entity::{Label, Node};
pub use id::{NodeId, RelationId};
pub use value::Value;
