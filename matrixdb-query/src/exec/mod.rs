//! Query execution engine.
//!
//! This module provides the executor and operators that run traversal plans
//! against a graph.
//!
//! # Architecture
//!
//! The execution engine uses a **pull-based iterator model**. Each operator
//! implements the [`Operator`] trait; pulling the root with
//! [`Operator::consume`] pulls its children on demand, and every operator
//! writes the aliases it binds into one shared [`Record`]. A pull answers
//! [`Pull::Row`] or [`Pull::Exhausted`]; an `Err` is a fault that aborts the
//! query.
//!
//! # Modules
//!
//! - [`context`] - Execution context (graph access, cancellation, config)
//! - [`record`] - Alias-to-entry record shared by an operator tree
//! - [`operator`] - Operator trait and base types
//! - [`operators`] - Concrete operator implementations
//! - [`graph_accessor`] - Graph lookups as seen by operators
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use matrixdb_core::Node;
//! use matrixdb_graph::{GraphBuilder, HopRange};
//! use matrixdb_query::exec::operators::{AllNodeScanOp, CondVarLenTraverseOp};
//! use matrixdb_query::exec::{ExecutionContext, Executor};
//! use matrixdb_query::plan::AlgebraicExpression;
//!
//! let mut builder = GraphBuilder::new();
//! let a = builder.add_node(Node::new);
//! let b = builder.add_node(Node::new);
//! let knows = builder.add_relation("KNOWS").unwrap();
//! builder.add_edge(a, b, knows).unwrap();
//! let graph = Arc::new(builder.build().unwrap());
//!
//! let scan = AllNodeScanOp::new("a", graph.clone());
//! let expr = AlgebraicExpression::single("a", knows, false, "b");
//! let traverse =
//!     CondVarLenTraverseOp::new(&expr, HopRange::exactly(1), graph.clone(), Box::new(scan))
//!         .unwrap();
//!
//! let mut executor = Executor::new(Box::new(traverse), ExecutionContext::new().with_graph(graph));
//! let result = executor.execute().unwrap();
//! assert_eq!(result.node_ids("b"), vec![b]);
//! ```

pub mod context;
pub mod graph_accessor;
pub mod operator;
pub mod operators;
pub mod record;

mod executor;
mod result;

// Re-exports
pub use context::{CancellationToken, ExecutionConfig, ExecutionContext, ExecutionStats};
pub use executor::Executor;
pub use graph_accessor::{GraphAccessError, GraphAccessResult, GraphAccessor, NullGraphAccessor};
pub use operator::{BoxedOperator, Operator, OperatorBase, OperatorResult, OperatorState, Pull};
pub use record::{Entry, Record};
pub use result::ResultSet;
