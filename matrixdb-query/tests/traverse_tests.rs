//! Integration tests for the variable-length traversal operator.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use matrixdb_core::{Node, NodeId, RelationId, Value};
use matrixdb_graph::{
    AllPaths, Direction, Graph, GraphBuilder, HopRange, Path, SparseMatrix,
};
use matrixdb_query::exec::operators::{AllNodeScanOp, CondVarLenTraverseOp, EmptyOp, ValuesOp};
use matrixdb_query::exec::{
    BoxedOperator, Entry, GraphAccessResult, GraphAccessor, OperatorResult, OperatorState,
};
use matrixdb_query::{
    AlgebraicExpression, ExecError, ExecutionContext, Executor, Operator, Pull, Record, ResultSet,
};

// ============================================================================
// Fixtures
// ============================================================================

/// A -> B -> C over relation `R`.
fn line_graph() -> Arc<Graph> {
    let mut builder = GraphBuilder::new();
    let a = builder.add_node(|id| Node::new(id).with_property("name", "A"));
    let b = builder.add_node(|id| Node::new(id).with_property("name", "B"));
    let c = builder.add_node(|id| Node::new(id).with_property("name", "C"));
    let r = builder.add_relation("R").unwrap();
    builder.add_edge(a, b, r).unwrap();
    builder.add_edge(b, c, r).unwrap();
    Arc::new(builder.build().unwrap())
}

/// A hub with `leaves` outgoing `R` edges.
fn star_graph(leaves: usize) -> Arc<Graph> {
    let mut builder = GraphBuilder::new();
    let hub = builder.add_node(|id| Node::new(id).with_label("Hub"));
    let r = builder.add_relation("R").unwrap();
    for _ in 0..leaves {
        let leaf = builder.add_node(|id| Node::new(id).with_label("Leaf"));
        builder.add_edge(hub, leaf, r).unwrap();
    }
    Arc::new(builder.build().unwrap())
}

/// Counts path searches and delegates to a real graph.
struct CountingGraph {
    inner: Arc<Graph>,
    searches: AtomicUsize,
}

impl CountingGraph {
    fn new(inner: Arc<Graph>) -> Arc<Self> {
        Arc::new(Self { inner, searches: AtomicUsize::new(0) })
    }

    fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

impl GraphAccessor for CountingGraph {
    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn load_node(&self, id: NodeId, target: &mut Node) -> GraphAccessResult<()> {
        GraphAccessor::load_node(self.inner.as_ref(), id, target)
    }

    fn adjacency(&self, relation: RelationId, direction: Direction) -> GraphAccessResult<&SparseMatrix> {
        GraphAccessor::adjacency(self.inner.as_ref(), relation, direction)
    }

    fn all_paths(
        &self,
        search: &AllPaths,
        source: NodeId,
        paths: &mut Vec<Path>,
    ) -> GraphAccessResult<usize> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let matrix = self.adjacency(search.relation(), search.direction())?;
        Ok(search.search(matrix, source, paths)?)
    }
}

/// Counts pulls on the wrapped operator.
struct CountingOp {
    inner: BoxedOperator,
    pulls: Arc<AtomicUsize>,
}

impl Operator for CountingOp {
    fn consume(&mut self, record: &mut Record) -> OperatorResult<Pull> {
        self.pulls.fetch_add(1, Ordering::SeqCst);
        self.inner.consume(record)
    }

    fn reset(&mut self) -> OperatorResult<()> {
        self.inner.reset()
    }

    fn close(&mut self) -> OperatorResult<()> {
        self.inner.close()
    }

    fn modifies(&self) -> &[String] {
        self.inner.modifies()
    }

    fn children(&self) -> Vec<&dyn Operator> {
        Vec::new()
    }

    fn state(&self) -> OperatorState {
        self.inner.state()
    }

    fn name(&self) -> &'static str {
        "Counting"
    }
}

/// Fails on every pull.
struct FaultyOp {
    modifies: Vec<String>,
}

impl Operator for FaultyOp {
    fn consume(&mut self, _record: &mut Record) -> OperatorResult<Pull> {
        Err(ExecError::InvalidPlan("storage went away".to_owned()))
    }

    fn reset(&mut self) -> OperatorResult<()> {
        Ok(())
    }

    fn close(&mut self) -> OperatorResult<()> {
        Ok(())
    }

    fn modifies(&self) -> &[String] {
        &self.modifies
    }

    fn children(&self) -> Vec<&dyn Operator> {
        Vec::new()
    }

    fn state(&self) -> OperatorState {
        OperatorState::Active
    }

    fn name(&self) -> &'static str {
        "Faulty"
    }
}

fn expr(transpose: bool) -> AlgebraicExpression {
    AlgebraicExpression::single("a", RelationId::new(0), transpose, "n")
}

fn hops(min: usize, max: usize) -> HopRange {
    HopRange::new(min, max).unwrap()
}

fn names(result: &ResultSet, alias: &str) -> BTreeSet<String> {
    result
        .iter()
        .map(|row| {
            let node = row.node(alias).unwrap();
            node.get_property("name").and_then(Value::as_str).unwrap().to_owned()
        })
        .collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn straight_line_graph() {
    let graph = line_graph();
    let child = ValuesOp::node_ids("a", [NodeId::new(0)]);
    let op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 2), graph.clone(), Box::new(child)).unwrap();

    let mut executor = Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph));
    let result = executor.execute().unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(names(&result, "n"), set(&["B", "C"]));
    assert_eq!(result.node_ids("a"), vec![NodeId::new(0), NodeId::new(0)]);
}

#[test]
fn incoming_walks_against_edges() {
    let graph = line_graph();
    let child = ValuesOp::node_ids("a", [NodeId::new(2)]);
    let op =
        CondVarLenTraverseOp::new(&expr(true), hops(1, 2), graph.clone(), Box::new(child)).unwrap();

    let mut executor = Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph));
    let result = executor.execute().unwrap();
    assert_eq!(names(&result, "n"), set(&["A", "B"]));
}

#[test]
fn no_matching_relation() {
    let mut builder = GraphBuilder::new();
    let a = builder.add_node(|id| Node::new(id).with_property("name", "A"));
    let b = builder.add_node(|id| Node::new(id).with_property("name", "B"));
    let wanted = builder.add_relation("WANTED").unwrap();
    let other = builder.add_relation("OTHER").unwrap();
    builder.add_edge(a, b, other).unwrap();
    let graph = CountingGraph::new(Arc::new(builder.build().unwrap()));

    let child = ValuesOp::node_ids("a", [a]);
    let expr = AlgebraicExpression::single("a", wanted, false, "n");
    let mut op = CondVarLenTraverseOp::new(&expr, hops(1, 3), graph.clone(), Box::new(child)).unwrap();

    let mut record = Record::new();
    assert_eq!(op.consume(&mut record), Ok(Pull::Exhausted));
    assert_eq!(op.state(), OperatorState::Exhausted);
    assert_eq!(graph.searches(), 1);
    assert_eq!(record.node("n").unwrap().id, NodeId::new(0));
    assert!(record.node("n").unwrap().properties.is_empty());
}

#[test]
fn exhausted_child_skips_search() {
    let graph = CountingGraph::new(line_graph());
    let child = EmptyOp::new(vec!["a".to_owned()]);
    let mut op = CondVarLenTraverseOp::new(&expr(false), hops(1, 2), graph.clone(), Box::new(child)).unwrap();

    let mut record = Record::new();
    assert_eq!(op.consume(&mut record), Ok(Pull::Exhausted));
    assert_eq!(op.consume(&mut record), Ok(Pull::Exhausted));
    assert_eq!(graph.searches(), 0);
}

#[test]
fn fan_out_drains_batch_before_next_pull() {
    const LEAVES: usize = 5;
    let graph = star_graph(LEAVES);
    let pulls = Arc::new(AtomicUsize::new(0));
    let child = CountingOp {
        inner: Box::new(ValuesOp::node_ids("a", [NodeId::new(0), NodeId::new(0)])),
        pulls: Arc::clone(&pulls),
    };
    let mut op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 1), graph, Box::new(child)).unwrap();
    let mut record = Record::new();

    let mut first = BTreeSet::new();
    for _ in 0..LEAVES {
        assert_eq!(op.consume(&mut record), Ok(Pull::Row));
        assert_eq!(pulls.load(Ordering::SeqCst), 1);
        first.insert(record.node_id("n").unwrap());
    }
    assert_eq!(first.len(), LEAVES);
    assert_eq!(op.cached_paths(), 0);

    assert_eq!(op.consume(&mut record), Ok(Pull::Row));
    assert_eq!(pulls.load(Ordering::SeqCst), 2);
    assert_eq!(op.cached_paths(), LEAVES - 1);
}

#[test]
fn rows_without_paths_are_skipped() {
    let graph = line_graph();
    // C has no outgoing edges, A does.
    let child = ValuesOp::node_ids("a", [NodeId::new(2), NodeId::new(0), NodeId::new(2)]);
    let op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 1), graph.clone(), Box::new(child)).unwrap();

    let mut executor = Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph));
    let result = executor.execute().unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(names(&result, "n"), set(&["B"]));
}

#[test]
fn integer_source_binding() {
    let graph = line_graph();
    let child = ValuesOp::new(vec!["a".to_owned()], vec![vec![Entry::Scalar(Value::Int(1))]]).unwrap();
    let op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 2), graph.clone(), Box::new(child)).unwrap();

    let mut executor = Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph));
    assert_eq!(names(&executor.execute().unwrap(), "n"), set(&["C"]));
}

// ============================================================================
// Faults
// ============================================================================

#[test]
fn child_fault_propagates_unchanged() {
    let child = FaultyOp { modifies: vec!["a".to_owned()] };
    let mut op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 2), line_graph(), Box::new(child)).unwrap();
    let mut record = Record::new();
    assert_eq!(
        op.consume(&mut record),
        Err(ExecError::InvalidPlan("storage went away".to_owned()))
    );
}

#[test]
fn unbound_source_is_a_fault() {
    let child = ValuesOp::node_ids("x", [NodeId::new(0)]);
    let mut op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 2), line_graph(), Box::new(child)).unwrap();
    let mut record = Record::new();
    assert_eq!(op.consume(&mut record), Err(ExecError::UnboundAlias("a".to_owned())));
}

#[test]
fn scalar_source_is_a_fault() {
    let child =
        ValuesOp::new(vec!["a".to_owned()], vec![vec![Entry::Scalar(Value::from("A"))]]).unwrap();
    let mut op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 2), line_graph(), Box::new(child)).unwrap();
    let mut record = Record::new();
    assert!(matches!(
        op.consume(&mut record),
        Err(ExecError::BindingType { expected: "node", actual: "scalar", .. })
    ));
}

#[test]
fn unknown_source_node_is_a_fault() {
    let child = ValuesOp::node_ids("a", [NodeId::new(99)]);
    let mut op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 2), line_graph(), Box::new(child)).unwrap();
    let mut record = Record::new();
    assert!(matches!(op.consume(&mut record), Err(ExecError::GraphAccess(_))));
}

#[test]
fn executor_reports_fault_not_partial_result() {
    let graph = line_graph();
    let child = ValuesOp::node_ids("a", [NodeId::new(0), NodeId::new(42)]);
    let op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 2), graph.clone(), Box::new(child)).unwrap();
    let mut executor = Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph));
    assert!(executor.execute().is_err());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn reset_replays_whole_plan() {
    let graph = line_graph();
    let scan = AllNodeScanOp::new("a", graph.clone());
    let op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 2), graph.clone(), Box::new(scan)).unwrap();
    let mut executor = Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph));

    let first = executor.execute().unwrap();
    assert_eq!(first.len(), 3);

    executor.reset().unwrap();
    let second = executor.execute().unwrap();
    assert_eq!(second.len(), 3);
    assert_eq!(names(&first, "n"), names(&second, "n"));
    assert_eq!(executor.context().stats().rows_produced(), 6);
}

#[test]
fn reset_mid_batch_discards_cached_paths() {
    let graph = star_graph(4);
    let child = ValuesOp::node_ids("a", [NodeId::new(0)]);
    let mut op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 1), graph, Box::new(child)).unwrap();
    let mut record = Record::new();

    assert_eq!(op.consume(&mut record), Ok(Pull::Row));
    assert_eq!(op.cached_paths(), 3);
    op.reset().unwrap();
    assert_eq!(op.cached_paths(), 0);
    assert_eq!(op.state(), OperatorState::Created);

    let mut rows = 0;
    while op.consume(&mut record).unwrap().is_row() {
        rows += 1;
    }
    assert_eq!(rows, 4);
}

#[test]
fn close_releases_batch_and_child() {
    let graph = star_graph(4);
    let pulls = Arc::new(AtomicUsize::new(0));
    let child = CountingOp {
        inner: Box::new(ValuesOp::node_ids("a", [NodeId::new(0)])),
        pulls: Arc::clone(&pulls),
    };
    let mut op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 1), graph, Box::new(child)).unwrap();
    let mut record = Record::new();

    op.consume(&mut record).unwrap();
    op.close().unwrap();
    assert_eq!(op.cached_paths(), 0);
    assert_eq!(op.state(), OperatorState::Closed);
    assert_eq!(op.children()[0].state(), OperatorState::Closed);
    assert!(op.reset().is_err());
}

#[test]
fn cancellation_stops_pulling() {
    let graph = line_graph();
    let scan = AllNodeScanOp::new("a", graph.clone());
    let op =
        CondVarLenTraverseOp::new(&expr(false), hops(1, 2), graph.clone(), Box::new(scan)).unwrap();
    let mut executor = Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph));

    let token = executor.context().cancellation_token();
    assert!(executor.next().unwrap().is_some());
    token.cancel();
    assert_eq!(executor.next().map(|row| row.is_some()), Err(ExecError::Cancelled));
}

#[test]
fn explain_shows_tree() {
    let graph = line_graph();
    let scan = AllNodeScanOp::new("a", graph.clone());
    let op = CondVarLenTraverseOp::new(&expr(false), hops(1, 2), graph, Box::new(scan)).unwrap();
    let executor = Executor::new(Box::new(op), ExecutionContext::new());

    assert_eq!(executor.columns(), &["a".to_owned(), "n".to_owned()]);
    assert_eq!(
        executor.explain(),
        "Conditional Variable Length Traverse | (a)-[0*1..2]->(n)\n    All Node Scan | a\n"
    );
}

#[test]
fn shared_graph_across_threads() {
    let graph = star_graph(8);
    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let graph = Arc::clone(&graph);
                scope.spawn(move || {
                    let scan = AllNodeScanOp::new("a", graph.clone());
                    let op = CondVarLenTraverseOp::new(
                        &expr(false),
                        hops(1, 1),
                        graph.clone(),
                        Box::new(scan),
                    )
                    .unwrap();
                    let mut executor =
                        Executor::new(Box::new(op), ExecutionContext::new().with_graph(graph));
                    executor.count().unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(counts, vec![8; 4]);
}
