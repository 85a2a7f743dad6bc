//! Main query executor.
//!
//! This module provides the [`Executor`] that drives an operator tree and
//! collects its rows.

use crate::error::{ExecError, ExecResult};

use super::context::ExecutionContext;
use super::operator::{BoxedOperator, Operator, OperatorState, Pull};
use super::record::Record;
use super::result::ResultSet;

/// The main query executor.
///
/// Owns the root of an operator tree and the single [`Record`] every
/// operator in the tree writes into. The output columns are the aliases the
/// tree binds, children before parents.
pub struct Executor {
    /// The root operator of the tree.
    root: BoxedOperator,
    /// Execution context.
    ctx: ExecutionContext,
    /// Record shared by every operator in the tree.
    record: Record,
    /// Output aliases.
    columns: Vec<String>,
    /// Whether the tree has been closed.
    closed: bool,
}

impl Executor {
    /// Creates an executor for the tree rooted at `root`.
    #[must_use]
    pub fn new(root: BoxedOperator, ctx: ExecutionContext) -> Self {
        let mut columns = Vec::new();
        collect_columns(root.as_ref(), &mut columns);
        let record = Record::with_capacity(columns.len());
        Self { root, ctx, record, columns, closed: false }
    }

    /// Returns the output columns.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Pulls the next row, or `None` once the tree is exhausted.
    ///
    /// The returned record is overwritten by the following pull.
    pub fn next(&mut self) -> ExecResult<Option<&Record>> {
        if self.advance()? {
            Ok(Some(&self.record))
        } else {
            Ok(None)
        }
    }

    /// Runs the tree to exhaustion and collects every row, projected onto
    /// [`columns`](Self::columns).
    ///
    /// The tree is left open, so the executor can be [`reset`](Self::reset)
    /// and executed again.
    pub fn execute(&mut self) -> ExecResult<ResultSet> {
        let mut rows = Vec::new();
        while self.advance()? {
            rows.push(self.record.project(&self.columns));
        }

        tracing::debug!(rows = rows.len(), root = self.root.name(), "query completed");
        if self.ctx.config().collect_stats {
            let stats = self.ctx.stats();
            tracing::info!(
                rows_produced = stats.rows_produced(),
                resets = stats.resets(),
                elapsed_us = u64::try_from(stats.elapsed().as_micros()).unwrap_or(u64::MAX),
                "execution stats"
            );
        }
        Ok(ResultSet::new(self.columns.clone(), rows))
    }

    /// Counts the remaining rows without materializing them.
    pub fn count(&mut self) -> ExecResult<usize> {
        let mut count = 0;
        while self.advance()? {
            count += 1;
        }
        Ok(count)
    }

    /// Rewinds the whole tree so it produces its rows again.
    pub fn reset(&mut self) -> ExecResult<()> {
        self.root.reset()?;
        self.record.clear();
        self.ctx.record_reset();
        Ok(())
    }

    /// Closes the tree and releases its resources. Closing twice is a no-op.
    pub fn close(&mut self) -> ExecResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.record = Record::new();
        self.root.close()
    }

    /// Renders the operator tree, one operator per line, children indented
    /// under their parent.
    #[must_use]
    pub fn explain(&self) -> String {
        let mut out = String::new();
        explain_operator(self.root.as_ref(), 0, &mut out);
        out
    }

    /// Returns the execution context.
    #[must_use]
    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Returns the state of the root operator.
    #[must_use]
    pub fn state(&self) -> OperatorState {
        self.root.state()
    }

    fn advance(&mut self) -> ExecResult<bool> {
        if self.ctx.is_cancelled() {
            return Err(ExecError::Cancelled);
        }
        match self.root.consume(&mut self.record)? {
            Pull::Row => {
                self.ctx.record_rows_produced(1);
                Ok(true)
            }
            Pull::Exhausted => Ok(false),
        }
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(error = %err, "failed to close operator tree");
        }
    }
}

fn collect_columns(op: &dyn Operator, columns: &mut Vec<String>) {
    for child in op.children() {
        collect_columns(child, columns);
    }
    for alias in op.modifies() {
        if !columns.contains(alias) {
            columns.push(alias.clone());
        }
    }
}

fn explain_operator(op: &dyn Operator, depth: usize, out: &mut String) {
    out.push_str(&"    ".repeat(depth));
    out.push_str(&op.describe());
    out.push('\n');
    for child in op.children() {
        explain_operator(child, depth + 1, out);
    }
}
