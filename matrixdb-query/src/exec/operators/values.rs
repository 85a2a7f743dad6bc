//! Values and Empty operators.
//!
//! These operators produce inline data without reading from storage.

use matrixdb_core::{Node, NodeId};

use crate::error::{ExecError, ExecResult};
use crate::exec::operator::{Operator, OperatorBase, OperatorResult, OperatorState, Pull};
use crate::exec::record::{Entry, Record};

/// Values operator - binds rows of inline entries.
pub struct ValuesOp {
    /// Base operator state; `modifies` holds the column aliases.
    base: OperatorBase,
    /// The rows to produce, one entry per alias.
    rows: Vec<Vec<Entry>>,
    /// Current row index.
    current: usize,
}

impl ValuesOp {
    /// Creates a values operator binding `aliases` from each row.
    ///
    /// Every row must hold exactly one entry per alias.
    pub fn new(aliases: Vec<String>, rows: Vec<Vec<Entry>>) -> ExecResult<Self> {
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != aliases.len()) {
            return Err(ExecError::InvalidPlan(format!(
                "values row {idx} has {} entries for {} aliases",
                row.len(),
                aliases.len()
            )));
        }
        Ok(Self { base: OperatorBase::new(aliases), rows, current: 0 })
    }

    /// Creates a single-column operator binding one node per id.
    #[must_use]
    pub fn node_ids(alias: impl Into<String>, ids: impl IntoIterator<Item = NodeId>) -> Self {
        let rows = ids.into_iter().map(|id| vec![Entry::Node(Node::new(id))]).collect();
        Self { base: OperatorBase::new(vec![alias.into()]), rows, current: 0 }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the operator holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Operator for ValuesOp {
    fn consume(&mut self, record: &mut Record) -> OperatorResult<Pull> {
        self.base.ensure_open(self.name())?;

        let Some(row) = self.rows.get(self.current) else {
            self.base.set_exhausted();
            return Ok(Pull::Exhausted);
        };
        for (alias, entry) in self.base.modifies().iter().zip(row) {
            record.add_entry(alias, entry.clone());
        }
        self.current += 1;
        self.base.set_active();
        self.base.inc_rows_produced();
        Ok(Pull::Row)
    }

    fn reset(&mut self) -> OperatorResult<()> {
        self.base.ensure_open(self.name())?;
        self.current = 0;
        self.base.reset();
        Ok(())
    }

    fn close(&mut self) -> OperatorResult<()> {
        self.rows = Vec::new();
        self.base.set_closed();
        Ok(())
    }

    fn modifies(&self) -> &[String] {
        self.base.modifies()
    }

    fn children(&self) -> Vec<&dyn Operator> {
        Vec::new()
    }

    fn state(&self) -> OperatorState {
        self.base.state()
    }

    fn name(&self) -> &'static str {
        "Values"
    }
}

/// Empty operator - produces no rows.
pub struct EmptyOp {
    /// Base operator state.
    base: OperatorBase,
}

impl EmptyOp {
    /// Creates an empty operator declaring the given aliases.
    #[must_use]
    pub fn new(aliases: Vec<String>) -> Self {
        Self { base: OperatorBase::new(aliases) }
    }
}

impl Operator for EmptyOp {
    fn consume(&mut self, _record: &mut Record) -> OperatorResult<Pull> {
        self.base.ensure_open(self.name())?;
        self.base.set_exhausted();
        Ok(Pull::Exhausted)
    }

    fn reset(&mut self) -> OperatorResult<()> {
        self.base.ensure_open(self.name())?;
        self.base.reset();
        Ok(())
    }

    fn close(&mut self) -> OperatorResult<()> {
        self.base.set_closed();
        Ok(())
    }

    fn modifies(&self) -> &[String] {
        self.base.modifies()
    }

    fn children(&self) -> Vec<&dyn Operator> {
        Vec::new()
    }

    fn state(&self) -> OperatorState {
        self.base.state()
    }

    fn name(&self) -> &'static str {
        "Empty"
    }
}
