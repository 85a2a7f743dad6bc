//! Variable-length traversal operator.
//!
//! Expands each source node pulled from the child into every node reachable
//! within a hop range, yielding one row per discovered path.

use std::sync::Arc;

use matrixdb_core::NodeId;
use matrixdb_graph::traversal::{AllPaths, Direction, HopRange};
use matrixdb_graph::Path;

use crate::error::{ExecError, ExecResult};
use crate::exec::context::{ExecutionConfig, DEFAULT_PATH_BATCH_CAPACITY};
use crate::exec::graph_accessor::GraphAccessor;
use crate::exec::operator::{
    BoxedOperator, Operator, OperatorBase, OperatorResult, OperatorState, Pull,
};
use crate::exec::record::Record;
use crate::plan::AlgebraicExpression;

/// Conditional variable-length traverse operator.
///
/// For every child row, reads the node bound under the source alias, runs a
/// bounded-hop path search over one relation, and caches the resulting batch
/// of paths. It then yields one row per cached path, refreshing the node
/// bound under the destination alias in place, and only pulls the child
/// again once the batch is drained. One child row can therefore produce any
/// number of output rows, including none.
///
/// Paths are consumed from the end of the batch. The destination of every
/// row is the far endpoint of the path's tail edge, which is the vertex
/// reached by the last hop in either direction.
pub struct CondVarLenTraverseOp {
    /// Base operator state.
    base: OperatorBase,
    /// Graph the search runs against.
    graph: Arc<dyn GraphAccessor>,
    /// Relation, direction, hop range and revisit policy.
    search: AllPaths,
    src_alias: String,
    dest_alias: String,
    /// Input operator (provides source nodes).
    child: BoxedOperator,
    /// Unconsumed paths for the current child row.
    paths: Vec<Path>,
    /// Capacity reserved for the batch on first pull.
    batch_capacity: usize,
    /// Whether the destination placeholder has been bound into the record.
    initialized: bool,
}

impl CondVarLenTraverseOp {
    /// Creates the operator for a single-operand expression.
    ///
    /// The operand's transpose flag selects incoming traversal.
    pub fn new(
        expr: &AlgebraicExpression,
        hops: HopRange,
        graph: Arc<dyn GraphAccessor>,
        child: BoxedOperator,
    ) -> ExecResult<Self> {
        let [operand] = expr.operands() else {
            return Err(ExecError::InvalidPlan(format!(
                "variable-length traversal needs exactly one operand, got {} in {expr}",
                expr.operand_count()
            )));
        };
        let search = AllPaths::new(operand.relation, operand.direction(), hops);

        Ok(Self {
            base: OperatorBase::new(vec![expr.dest_alias().to_owned()]),
            graph,
            search,
            src_alias: expr.src_alias().to_owned(),
            dest_alias: expr.dest_alias().to_owned(),
            child,
            paths: Vec::new(),
            batch_capacity: DEFAULT_PATH_BATCH_CAPACITY,
            initialized: false,
        })
    }

    /// Applies the path mode and batch capacity from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &ExecutionConfig) -> Self {
        self.search = self.search.with_mode(config.path_mode);
        self.batch_capacity = config.path_batch_capacity.max(1);
        self
    }

    /// The search this operator runs per child row.
    #[must_use]
    pub const fn search(&self) -> &AllPaths {
        &self.search
    }

    /// The traversal direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.search.direction()
    }

    /// Alias the source node is read from.
    #[must_use]
    pub fn src_alias(&self) -> &str {
        &self.src_alias
    }

    /// Alias the destination node is written to.
    #[must_use]
    pub fn dest_alias(&self) -> &str {
        &self.dest_alias
    }

    /// Number of paths cached and not yet yielded.
    #[must_use]
    pub fn cached_paths(&self) -> usize {
        self.paths.len()
    }

    /// Pulls child rows until a search finds at least one path.
    fn refill(&mut self, record: &mut Record) -> OperatorResult<Pull> {
        while self.paths.is_empty() {
            match self.child.consume(record) {
                Ok(Pull::Row) => {}
                Ok(Pull::Exhausted) => return Ok(Pull::Exhausted),
                Err(err) => return Err(self.fault(err)),
            }

            let source = record.node_id(&self.src_alias).map_err(|e| self.fault(e))?;
            let found = self
                .graph
                .all_paths(&self.search, source, &mut self.paths)
                .map_err(|e| self.fault(e.into()))?;
            tracing::debug!(
                operator = self.name(),
                source = %source,
                found,
                "refreshed path batch"
            );
        }
        Ok(Pull::Row)
    }

    fn emit(&self, record: &mut Record, dest: NodeId) -> OperatorResult<()> {
        let target = record.node_mut(&self.dest_alias)?;
        self.graph.load_node(dest, target)?;
        Ok(())
    }

    fn fault(&self, err: ExecError) -> ExecError {
        tracing::warn!(operator = self.name(), error = %err, "traversal aborted");
        err
    }
}

impl Operator for CondVarLenTraverseOp {
    fn consume(&mut self, record: &mut Record) -> OperatorResult<Pull> {
        self.base.ensure_open(self.name())?;

        if !self.initialized {
            self.paths.reserve(self.batch_capacity);
            record.node_slot(&self.dest_alias);
            self.initialized = true;
            self.base.set_active();
        }

        if self.refill(record)? == Pull::Exhausted {
            self.base.set_exhausted();
            return Ok(Pull::Exhausted);
        }

        let Some(mut path) = self.paths.pop() else {
            return Ok(Pull::Exhausted);
        };
        let tail = path.pop_tail();
        drop(path);

        self.emit(record, tail.dest).map_err(|e| self.fault(e))?;
        self.base.inc_rows_produced();
        Ok(Pull::Row)
    }

    fn reset(&mut self) -> OperatorResult<()> {
        self.base.ensure_open(self.name())?;
        self.paths.clear();
        self.initialized = false;
        self.base.reset();
        self.child.reset()
    }

    fn close(&mut self) -> OperatorResult<()> {
        if self.base.state().is_closed() {
            return Ok(());
        }
        self.paths = Vec::new();
        self.base.set_closed();
        self.child.close()
    }

    fn modifies(&self) -> &[String] {
        self.base.modifies()
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.child.as_ref()]
    }

    fn state(&self) -> OperatorState {
        self.base.state()
    }

    fn name(&self) -> &'static str {
        "Conditional Variable Length Traverse"
    }

    fn describe(&self) -> String {
        let hops = self.search.hops();
        let (open, close) = match self.search.direction() {
            Direction::Outgoing => ("-[", "]->"),
            Direction::Incoming => ("<-[", "]-"),
        };
        format!(
            "{} | ({}){open}{}*{}..{}{close}({})",
            self.name(),
            self.src_alias,
            self.search.relation(),
            hops.min(),
            hops.max(),
            self.dest_alias
        )
    }
}
