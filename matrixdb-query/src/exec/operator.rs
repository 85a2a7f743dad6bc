//! Operator trait and base types.
//!
//! This module defines the [`Operator`] trait that all execution
//! operators implement.

use crate::error::{ExecError, ExecResult};

use super::record::Record;

/// Result type for operator operations.
pub type OperatorResult<T> = ExecResult<T>;

/// Outcome of a successful pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    /// The record now holds the next row.
    Row,
    /// No further rows until the operator is reset.
    Exhausted,
}

impl Pull {
    /// Returns true if a row was produced.
    #[must_use]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row)
    }
}

/// The state of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorState {
    /// Operator has not been pulled since construction or the last reset.
    Created,
    /// Operator is producing rows.
    Active,
    /// Operator has reported [`Pull::Exhausted`].
    Exhausted,
    /// Operator has been closed. Terminal.
    Closed,
}

impl OperatorState {
    /// Returns true if the operator is producing rows.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if the operator has run out of rows.
    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Returns true if the operator is closed.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// The operator trait for pull-based query execution.
///
/// Operators form a tree. The root is pulled by the executor; each operator
/// pulls its children on demand and writes the aliases it introduces into
/// the shared [`Record`].
///
/// # Lifecycle
///
/// 1. **Created**: Initial state after construction or reset
/// 2. **Active**: After the first successful pull
/// 3. **Exhausted**: After `consume()` returns [`Pull::Exhausted`]
/// 4. **Closed**: After `close()`; resources released
///
/// `reset()` returns a created, active or exhausted operator to
/// **Created**. `close()` is terminal from any state.
///
/// # Faults
///
/// An `Err` from `consume()` is a fault. Operators propagate it unchanged
/// and never retry; the query fails as a whole.
///
/// # Thread Safety
///
/// The `Send` bound allows operators to be passed between threads,
/// but operators are not required to be `Sync` - they maintain mutable
/// internal state.
pub trait Operator: Send {
    /// Pulls the next row into `record`.
    fn consume(&mut self, record: &mut Record) -> OperatorResult<Pull>;

    /// Rewinds the operator so it produces its rows again.
    ///
    /// Implementations must also reset every child, so the whole subtree
    /// restarts.
    fn reset(&mut self) -> OperatorResult<()>;

    /// Releases operator-owned state and closes every child exactly once.
    ///
    /// Closing an already closed operator is a no-op.
    fn close(&mut self) -> OperatorResult<()>;

    /// The aliases this operator binds into the record.
    fn modifies(&self) -> &[String];

    /// The operator's children, in pull order.
    fn children(&self) -> Vec<&dyn Operator>;

    /// Returns the current state of this operator.
    fn state(&self) -> OperatorState;

    /// Returns the name of this operator type.
    fn name(&self) -> &'static str;

    /// A one-line description for plan display.
    fn describe(&self) -> String {
        let modifies = self.modifies();
        if modifies.is_empty() {
            self.name().to_owned()
        } else {
            format!("{} | {}", self.name(), modifies.join(", "))
        }
    }
}

/// A boxed operator for dynamic dispatch.
pub type BoxedOperator = Box<dyn Operator>;

/// Base implementation for operators.
///
/// This struct provides common functionality that operators can use.
#[derive(Debug)]
pub struct OperatorBase {
    /// Aliases bound by the operator.
    modifies: Vec<String>,
    /// The current state.
    state: OperatorState,
    /// Number of rows produced.
    rows_produced: u64,
}

impl OperatorBase {
    /// Creates a new operator base binding the given aliases.
    #[must_use]
    pub fn new(modifies: Vec<String>) -> Self {
        Self { modifies, state: OperatorState::Created, rows_produced: 0 }
    }

    /// Returns the aliases bound by the operator.
    #[must_use]
    pub fn modifies(&self) -> &[String] {
        &self.modifies
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> OperatorState {
        self.state
    }

    /// Fails with [`ExecError::OperatorClosed`] once the operator is closed.
    pub fn ensure_open(&self, name: &'static str) -> OperatorResult<()> {
        if self.state.is_closed() {
            return Err(ExecError::OperatorClosed(name));
        }
        Ok(())
    }

    /// Sets the state to active.
    pub fn set_active(&mut self) {
        self.state = OperatorState::Active;
    }

    /// Sets the state to exhausted.
    pub fn set_exhausted(&mut self) {
        self.state = OperatorState::Exhausted;
    }

    /// Sets the state to closed.
    pub fn set_closed(&mut self) {
        self.state = OperatorState::Closed;
    }

    /// Returns to the created state. Rows already produced stay counted.
    pub fn reset(&mut self) {
        self.state = OperatorState::Created;
    }

    /// Increments the rows produced counter.
    pub fn inc_rows_produced(&mut self) {
        self.rows_produced += 1;
    }

    /// Returns the number of rows produced.
    #[must_use]
    pub const fn rows_produced(&self) -> u64 {
        self.rows_produced
    }
}
