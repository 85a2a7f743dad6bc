//! Algebraic traversal expressions.

use std::fmt;

use matrixdb_core::RelationId;
use matrixdb_graph::traversal::Direction;
use serde::{Deserialize, Serialize};

/// One relation matrix in an algebraic expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operand {
    /// The relation whose adjacency this operand reads.
    pub relation: RelationId,
    /// Whether the matrix is used transposed, i.e. walked against edge
    /// direction.
    pub transpose: bool,
}

impl Operand {
    /// An operand over `relation`'s forward adjacency.
    #[must_use]
    pub const fn new(relation: RelationId) -> Self {
        Self { relation, transpose: false }
    }

    /// Marks the operand as transposed.
    #[must_use]
    pub const fn transposed(mut self) -> Self {
        self.transpose = true;
        self
    }

    /// The traversal direction implied by the transpose flag.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        Direction::from_transpose(self.transpose)
    }
}

/// A traversal from `src_alias` to `dest_alias` through a chain of relation
/// operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgebraicExpression {
    operands: Vec<Operand>,
    src_alias: String,
    dest_alias: String,
}

impl AlgebraicExpression {
    /// Creates an expression with no operands yet.
    #[must_use]
    pub fn new(src_alias: impl Into<String>, dest_alias: impl Into<String>) -> Self {
        Self { operands: Vec::new(), src_alias: src_alias.into(), dest_alias: dest_alias.into() }
    }

    /// A single-operand expression `(src)-[relation]->(dest)`, reversed when
    /// `transpose` is set.
    #[must_use]
    pub fn single(
        src_alias: impl Into<String>,
        relation: RelationId,
        transpose: bool,
        dest_alias: impl Into<String>,
    ) -> Self {
        let operand = Operand { relation, transpose };
        Self::new(src_alias, dest_alias).with_operand(operand)
    }

    /// Appends an operand to the chain.
    #[must_use]
    pub fn with_operand(mut self, operand: Operand) -> Self {
        self.operands.push(operand);
        self
    }

    /// The operands in multiplication order.
    #[must_use]
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Number of operands.
    #[must_use]
    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }

    /// Alias bound to the traversal's source node.
    #[must_use]
    pub fn src_alias(&self) -> &str {
        &self.src_alias
    }

    /// Alias bound to the traversal's destination node.
    #[must_use]
    pub fn dest_alias(&self) -> &str {
        &self.dest_alias
    }
}

impl fmt::Display for AlgebraicExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.src_alias)?;
        for operand in &self.operands {
            match operand.direction() {
                Direction::Outgoing => write!(f, "-[{}]->", operand.relation)?,
                Direction::Incoming => write!(f, "<-[{}]-", operand.relation)?,
            }
        }
        write!(f, "({})", self.dest_alias)
    }
}
