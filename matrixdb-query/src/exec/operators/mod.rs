//! Concrete operator implementations.
//!
//! # Operator Categories
//!
//! - **Scan operators**: [`scan`] - Node scans
//! - **Inline data**: [`values`] - Literal rows and empty inputs
//! - **Traversal operators**: [`traverse`] - Variable-length graph traversal

pub mod scan;
pub mod traverse;
pub mod values;

// Re-exports for convenience
pub use scan::AllNodeScanOp;
pub use traverse::CondVarLenTraverseOp;
pub use values::{EmptyOp, ValuesOp};
