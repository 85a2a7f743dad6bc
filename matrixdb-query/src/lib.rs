//! `MatrixDB` Query
//!
//! This crate provides pull-based execution of graph traversal plans over a
//! [`matrixdb_graph::Graph`].
//!
//! # Overview
//!
//! The query system consists of two layers:
//!
//! - **Plan**: Algebraic traversal expressions handed to operators
//! - **Exec**: Operator trees, the shared record, and the executor
//!
//! # Modules
//!
//! - [`plan`] - Algebraic expressions
//! - [`exec`] - Query execution
//! - [`error`] - Error types for execution
//!
//! # Quick Start
//!
//! Expand every node up to two hops along a relation:
//!
//! ```
//! use std::sync::Arc;
//!
//! use matrixdb_core::Node;
//! use matrixdb_graph::{GraphBuilder, HopRange};
//! use matrixdb_query::exec::operators::{AllNodeScanOp, CondVarLenTraverseOp};
//! use matrixdb_query::{AlgebraicExpression, ExecutionContext, Executor};
//!
//! let mut builder = GraphBuilder::new();
//! let a = builder.add_node(|id| Node::new(id).with_property("name", "A"));
//! let b = builder.add_node(|id| Node::new(id).with_property("name", "B"));
//! let c = builder.add_node(|id| Node::new(id).with_property("name", "C"));
//! let r = builder.add_relation("R").unwrap();
//! builder.add_edge(a, b, r).unwrap();
//! builder.add_edge(b, c, r).unwrap();
//! let graph = Arc::new(builder.build().unwrap());
//!
//! let expr = AlgebraicExpression::single("src", r, false, "dst");
//! let scan = AllNodeScanOp::new("src", graph.clone());
//! let op = CondVarLenTraverseOp::new(&expr, HopRange::new(1, 2).unwrap(), graph.clone(), Box::new(scan))
//!     .unwrap();
//!
//! let mut executor = Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph));
//! assert_eq!(executor.columns(), &["src".to_owned(), "dst".to_owned()]);
//! assert_eq!(executor.execute().unwrap().len(), 3);
//! ```

#![deny(clippy::unwrap_used)]

pub mod error;
pub mod exec;
pub mod plan;

// Re-export commonly used items at the crate root
pub use error::{ExecError, ExecResult};
pub use exec::{
    ExecutionConfig, ExecutionContext, Executor, Operator, OperatorState, Pull, Record, ResultSet,
};
pub use plan::{AlgebraicExpression, Operand};
