//! Node scan operator.

use std::sync::Arc;

use matrixdb_core::NodeId;

use crate::exec::graph_accessor::GraphAccessor;
use crate::exec::operator::{Operator, OperatorBase, OperatorResult, OperatorState, Pull};
use crate::exec::record::Record;

/// All-node scan operator.
///
/// Binds every node of the graph under one alias, in id order. The node in
/// the record is refreshed in place on each pull.
pub struct AllNodeScanOp {
    /// Base operator state.
    base: OperatorBase,
    alias: String,
    graph: Arc<dyn GraphAccessor>,
    /// Next node id to bind.
    next: usize,
}

impl AllNodeScanOp {
    /// Creates a scan binding nodes under `alias`.
    #[must_use]
    pub fn new(alias: impl Into<String>, graph: Arc<dyn GraphAccessor>) -> Self {
        let alias = alias.into();
        Self { base: OperatorBase::new(vec![alias.clone()]), alias, graph, next: 0 }
    }
}

impl Operator for AllNodeScanOp {
    fn consume(&mut self, record: &mut Record) -> OperatorResult<Pull> {
        self.base.ensure_open(self.name())?;

        if self.next >= self.graph.node_count() {
            self.base.set_exhausted();
            return Ok(Pull::Exhausted);
        }

        let target = record.node_slot(&self.alias);
        self.graph.load_node(NodeId::from(self.next), target)?;
        self.next += 1;
        self.base.set_active();
        self.base.inc_rows_produced();
        Ok(Pull::Row)
    }

    fn reset(&mut self) -> OperatorResult<()> {
        self.base.ensure_open(self.name())?;
        self.next = 0;
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
        "All Node Scan"
    }
}
