//! `MatrixDB` Graph
//!
//! This crate provides sparse-matrix graph storage and the bounded-hop path
//! search used by the query engine.
//!
//! # Modules
//!
//! - [`matrix`] - Compressed-column sparse matrices and their tuple iterator
//! - [`path`] - Paths produced by traversal
//! - [`store`] - Node storage and per-relation adjacency matrices
//! - [`traversal`] - Bounded-hop path enumeration

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod matrix;
pub mod path;
pub mod store;
pub mod traversal;

pub use matrix::{MatrixView, SparseMatrix, TuplesIter};
pub use path::Path;
pub use store::{Graph, GraphBuilder, GraphError, GraphResult};
pub use traversal::{AllPaths, Direction, HopRange, PathMode};
