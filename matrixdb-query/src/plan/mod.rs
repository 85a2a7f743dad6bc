//! Query planning.
//!
//! The planner hands traversal operators an [`AlgebraicExpression`]: the
//! chain of relation operands to multiply through, plus the aliases that
//! bind the traversal's source and destination nodes.

mod algebraic;

pub use algebraic::{AlgebraicExpression, Operand};
