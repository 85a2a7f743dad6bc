//! Error types for query execution.

use matrixdb_core::CoreError;
use matrixdb_graph::GraphError;
use thiserror::Error;

use crate::exec::GraphAccessError;

/// Errors that can occur while executing an operator tree.
///
/// Every variant is a fault: it aborts the query and propagates unchanged to
/// the root. End of stream is not an error and is reported as
/// [`Pull::Exhausted`](crate::exec::Pull::Exhausted).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// A graph storage or traversal error.
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// The graph accessor failed.
    #[error("graph access failed: {0}")]
    GraphAccess(#[from] GraphAccessError),

    /// A value could not be interpreted.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An alias was read before any operator bound it.
    #[error("alias not bound in record: {0}")]
    UnboundAlias(String),

    /// An alias is bound to the wrong kind of entry.
    #[error("alias {alias} is bound to {actual}, expected {expected}")]
    BindingType {
        /// The alias that was read.
        alias: String,
        /// The entry kind the reader needed.
        expected: &'static str,
        /// The entry kind actually bound.
        actual: &'static str,
    },

    /// The operator tree cannot be built as described.
    #[error("invalid plan: {0}")]
    InvalidPlan(String),

    /// An operator was used after it was closed.
    #[error("operator {0} used after close")]
    OperatorClosed(&'static str),

    /// The query was cancelled.
    #[error("query cancelled")]
    Cancelled,
}

/// Result type for execution.
pub type ExecResult<T> = Result<T, ExecError>;
